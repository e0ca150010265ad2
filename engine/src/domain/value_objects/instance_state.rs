//! InstanceState value object
//! Lifecycle state of a managed service instance

use serde::{Deserialize, Serialize};
use std::fmt;

/// The state of a service instance in its deploy/stop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InstanceState {
    /// Instance constructed but nothing touched on disk yet
    #[default]
    Created,

    /// Execution directory tree created
    DirectoryReady,

    /// Configuration file rendered and written
    Configured,

    /// Daemon process spawned
    Running,

    /// Stop command issued, waiting for it to report back
    Stopping,

    /// Daemon stopped, instance removed from the registry
    Stopped,

    /// A deploy step failed; the instance is discarded
    Failed,
}

impl InstanceState {
    /// Check if the instance occupies a registry slot
    pub fn is_active(&self) -> bool {
        matches!(self, InstanceState::Running | InstanceState::Stopping)
    }

    /// Validate state transition
    pub fn can_transition_to(&self, new_state: InstanceState) -> bool {
        use InstanceState::*;

        match (self, new_state) {
            // Forward deploy path
            (Created, DirectoryReady) => true,
            (DirectoryReady, Configured) => true,
            (Configured, Running) => true,

            // Stop path
            (Running, Stopping) => true,
            (Stopping, Stopped) => true,

            // Any deploy step can fail
            (Created | DirectoryReady | Configured | Running, Failed) => true,

            // Same state is always allowed
            (a, b) if *a == b => true,

            // Everything else is invalid
            _ => false,
        }
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceState::Created => write!(f, "created"),
            InstanceState::DirectoryReady => write!(f, "directory-ready"),
            InstanceState::Configured => write!(f, "configured"),
            InstanceState::Running => write!(f, "running"),
            InstanceState::Stopping => write!(f, "stopping"),
            InstanceState::Stopped => write!(f, "stopped"),
            InstanceState::Failed => write!(f, "failed"),
        }
    }
}
