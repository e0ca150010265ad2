//! Instance lifecycle service
//! Drives one ServiceInstance through deploy and stop

use crate::domain::{
    constants::STOP_TIMEOUT_SECS,
    ports::{DaemonLauncher, SpawnSpec},
    services::config_template,
    DomainError, ServiceInstance,
};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Drives the deploy and stop sequences of a service instance
///
/// The service owns no state of its own; all lifecycle state lives in the
/// instance entity, and the actual process control sits behind the
/// `DaemonLauncher` port.
pub struct InstanceLifecycleService {
    launcher: Arc<dyn DaemonLauncher>,
}

impl InstanceLifecycleService {
    pub fn new(launcher: Arc<dyn DaemonLauncher>) -> Self {
        Self { launcher }
    }

    /// Drive the instance from `Created` to `Running`
    ///
    /// Directory setup, config materialization, and process launch, in that
    /// order. Any failing step marks the instance `Failed` and returns the
    /// step's error; the caller must discard the instance (it is never
    /// registered half-deployed).
    pub async fn deploy(
        &self,
        instance: &mut ServiceInstance,
        template_path: &Path,
    ) -> Result<(), DomainError> {
        if let Err(err) = self.try_deploy(instance, template_path).await {
            let _ = instance.mark_failed();
            return Err(err);
        }
        Ok(())
    }

    async fn try_deploy(
        &self,
        instance: &mut ServiceInstance,
        template_path: &Path,
    ) -> Result<(), DomainError> {
        self.prepare_directories(instance)?;
        self.materialize_config(instance, template_path)?;
        self.launch(instance).await
    }

    /// Create the execution directory tree
    ///
    /// The root is created with exclusive semantics: a pre-existing
    /// directory is a `DirectoryConflict`, never silently reused. This is
    /// what protects the single-instance invariant on disk.
    fn prepare_directories(&self, instance: &mut ServiceInstance) -> Result<(), DomainError> {
        let exec_dir = instance.exec_dir();
        debug!(exec_dir = %exec_dir.display(), "Preparing execution directory");

        if let Some(parent) = exec_dir.parent() {
            fs::create_dir_all(parent).map_err(|e| DomainError::DirectoryCreate {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        match fs::create_dir(exec_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(DomainError::DirectoryConflict(
                    exec_dir.display().to_string(),
                ));
            }
            Err(e) => {
                return Err(DomainError::DirectoryCreate {
                    path: exec_dir.display().to_string(),
                    message: e.to_string(),
                });
            }
        }

        for subdir in [
            instance.data_dir().to_path_buf(),
            instance
                .config_path()
                .parent()
                .expect("config path always has a parent")
                .to_path_buf(),
        ] {
            debug!(dir = %subdir.display(), "mkdir");
            fs::create_dir(&subdir).map_err(|e| DomainError::DirectoryCreate {
                path: subdir.display().to_string(),
                message: e.to_string(),
            })?;
        }

        instance.mark_directory_ready()
    }

    /// Render the config template and write it into the instance's etc dir
    fn materialize_config(
        &self,
        instance: &mut ServiceInstance,
        template_path: &Path,
    ) -> Result<(), DomainError> {
        debug!(
            config = %instance.config_path().display(),
            template = %template_path.display(),
            "Preparing config file"
        );

        let template =
            fs::read_to_string(template_path).map_err(|e| DomainError::TemplateRead {
                path: template_path.display().to_string(),
                message: e.to_string(),
            })?;

        let rendered = config_template::render(&template, &instance.substitutions());

        fs::write(instance.config_path(), rendered).map_err(|e| DomainError::ConfigWrite {
            path: instance.config_path().display().to_string(),
            message: e.to_string(),
        })?;

        instance.mark_configured()
    }

    /// Spawn the daemon; fire-and-forget, no readiness wait
    async fn launch(&self, instance: &mut ServiceInstance) -> Result<(), DomainError> {
        let spec = SpawnSpec {
            binary: instance.start_binary().to_path_buf(),
            config_path: instance.config_path().to_path_buf(),
            log_path: instance.log_path().to_path_buf(),
        };

        info!(
            service = instance.name(),
            binary = %spec.binary.display(),
            config = %spec.config_path.display(),
            "Deploying service"
        );

        let pid = self.launcher.spawn(spec).await?;
        instance.mark_running(pid)
    }

    /// Drive the instance from `Running` to `Stopped`
    ///
    /// Runs the service's external stop command, bounded by a timeout. A
    /// failing or timed-out stop command is logged and the instance is
    /// still marked stopped: the registry must never get stuck on a stop
    /// command's own failure.
    pub async fn shutdown(&self, instance: &mut ServiceInstance, stop_binary: &Path) {
        if let Err(err) = instance.mark_stopping() {
            warn!(service = instance.name(), error = %err, "Unexpected state on stop");
        }

        info!(
            service = instance.name(),
            stop_binary = %stop_binary.display(),
            "Stopping service"
        );

        let stop = self.launcher.stop(stop_binary);
        match tokio::time::timeout(Duration::from_secs(STOP_TIMEOUT_SECS), stop).await {
            Ok(Ok(0)) => {
                info!(service = instance.name(), "Stop command completed");
            }
            Ok(Ok(status)) => {
                let err = DomainError::StopCommandFailed { status };
                warn!(
                    service = instance.name(),
                    error = %err,
                    "Stop command failed; deregistering anyway"
                );
            }
            Ok(Err(err)) => {
                warn!(
                    service = instance.name(),
                    error = %err,
                    "Could not run stop command; deregistering anyway"
                );
            }
            Err(_) => {
                warn!(
                    service = instance.name(),
                    timeout_secs = STOP_TIMEOUT_SECS,
                    "Stop command timed out; deregistering anyway"
                );
            }
        }

        if let Err(err) = instance.mark_stopped() {
            warn!(service = instance.name(), error = %err, "Unexpected state after stop");
        }
    }
}
