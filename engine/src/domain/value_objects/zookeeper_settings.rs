//! Zookeeper tuning settings
//! Explicit typed fields instead of a generic key/value config object

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Deploy-time tuning values for a Zookeeper instance
///
/// Immutable after construction; the instance keeps these for the whole of
/// its lifetime and they feed the config template exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZookeeperSettings {
    pub client_port: u16,
    pub max_client_cnxns: u32,
    pub tick_time: u64,
    pub verbose: bool,
}

impl Default for ZookeeperSettings {
    fn default() -> Self {
        Self {
            client_port: 2181,
            max_client_cnxns: 0,
            tick_time: 2000,
            verbose: false,
        }
    }
}

impl ZookeeperSettings {
    /// Build the substitution map for the config template
    ///
    /// Keys match the `%placeholder%` names in the shipped template. The
    /// data directory is per-instance and therefore passed in rather than
    /// stored here.
    pub fn substitutions(&self, data_dir: &Path) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("dataDir".to_string(), data_dir.display().to_string());
        map.insert("clientPort".to_string(), self.client_port.to_string());
        map.insert(
            "maxClientCnxns".to_string(),
            self.max_client_cnxns.to_string(),
        );
        map.insert("tickTime".to_string(), self.tick_time.to_string());
        map
    }
}
