//! ServiceKind value object
//! The closed set of deployable service types and their on-disk definitions

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A deployable service type
///
/// Each variant carries the fixed layout of that service under the
/// installation root: start/stop binaries, the config template, and the
/// rendered config file name. Adding a service type means adding a variant
/// here; unknown kinds are a typed error, never a runtime lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    Zookeeper,
}

impl ServiceKind {
    /// Stable registry key for this kind
    pub fn service_name(&self) -> &'static str {
        match self {
            ServiceKind::Zookeeper => "zookeeper",
        }
    }

    /// Start binary, relative to the installation root
    pub fn start_binary(&self) -> &'static str {
        match self {
            ServiceKind::Zookeeper => "bin/zookeeper-server-start.sh",
        }
    }

    /// Stop binary, relative to the installation root
    pub fn stop_binary(&self) -> &'static str {
        match self {
            ServiceKind::Zookeeper => "bin/zookeeper-server-stop.sh",
        }
    }

    /// Template file name under the template directory
    pub fn template_file(&self) -> &'static str {
        match self {
            ServiceKind::Zookeeper => "zookeeper.properties.template",
        }
    }

    /// Rendered config file name under `<exec dir>/etc/`
    pub fn config_file(&self) -> &'static str {
        match self {
            ServiceKind::Zookeeper => "zookeeper.properties",
        }
    }
}

impl FromStr for ServiceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zookeeper" => Ok(ServiceKind::Zookeeper),
            other => Err(DomainError::UnknownService(other.to_string())),
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}
