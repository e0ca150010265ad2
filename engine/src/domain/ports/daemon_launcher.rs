//! Launcher port for spawning and stopping daemon processes
//! This is an interface - the real implementation is in the infrastructure layer

use crate::domain::DomainError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Everything needed to launch one daemon process
#[derive(Debug, Clone)]
pub struct SpawnSpec {
    /// Absolute path of the start binary
    pub binary: PathBuf,

    /// Rendered config file, passed as the binary's single argument
    pub config_path: PathBuf,

    /// File that receives the daemon's stdout and stderr
    pub log_path: PathBuf,
}

/// Launcher port for daemon process control
///
/// The lifecycle state machine owns only a PID; the launcher owns the
/// actual execution unit. Spawning is fire-and-forget: the launcher does
/// not wait for the daemon to become ready. Stopping runs the service's
/// external stop command and reports its exit code.
#[async_trait]
pub trait DaemonLauncher: Send + Sync {
    /// Spawn the daemon, redirecting its output into the log file
    async fn spawn(&self, spec: SpawnSpec) -> Result<u32, DomainError>;

    /// Run the external stop command and return its exit code
    async fn stop(&self, stop_binary: &Path) -> Result<i32, DomainError>;
}
