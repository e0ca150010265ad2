//! Command launcher
//! Real implementation of the DaemonLauncher port using tokio processes

use crate::domain::{
    ports::{DaemonLauncher, SpawnSpec},
    DomainError,
};
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Launches daemons as child processes
///
/// Spawned daemons are detached: the child handle is handed to a reaper
/// task that waits for the exit status, so the process outlives the RPC
/// request that started it and never turns into a zombie under us.
pub struct CommandLauncher;

impl CommandLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CommandLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DaemonLauncher for CommandLauncher {
    async fn spawn(&self, spec: SpawnSpec) -> Result<u32, DomainError> {
        let spawn_err = |message: String| DomainError::Spawn {
            binary: spec.binary.display().to_string(),
            message,
        };

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&spec.log_path)
            .map_err(|e| spawn_err(format!("cannot open log file: {}", e)))?;
        let log_for_stderr = log_file
            .try_clone()
            .map_err(|e| spawn_err(format!("cannot clone log handle: {}", e)))?;

        let mut child = Command::new(&spec.binary)
            .arg(&spec.config_path)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::from(log_for_stderr))
            .spawn()
            .map_err(|e| spawn_err(e.to_string()))?;

        let pid = child
            .id()
            .ok_or_else(|| spawn_err("process exited before a PID was observed".to_string()))?;

        debug!(binary = %spec.binary.display(), pid, "Spawned daemon process");

        // Reap the child in the background so a short-lived daemon does not
        // linger as a zombie.
        let binary = spec.binary.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!(binary = %binary.display(), pid, %status, "Daemon exited"),
                Err(e) => warn!(binary = %binary.display(), pid, error = %e, "Wait on daemon failed"),
            }
        });

        Ok(pid)
    }

    async fn stop(&self, stop_binary: &Path) -> Result<i32, DomainError> {
        let status = Command::new(stop_binary)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| DomainError::Spawn {
                binary: stop_binary.display().to_string(),
                message: e.to_string(),
            })?;

        // Termination by signal reports no code; treat it as failure.
        Ok(status.code().unwrap_or(-1))
    }
}
