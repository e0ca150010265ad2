//! ServiceInstance entity
//! Core domain entity: one managed daemon and its on-disk state

use crate::domain::{
    constants::{DATA_DIR, ETC_DIR, LOG_FILE},
    DomainError, InstanceState, ServiceKind, ZookeeperSettings,
};
use std::path::{Path, PathBuf};

/// A single managed service instance
///
/// Owns its execution directory exclusively for its lifetime. State
/// transitions go through the `mark_*` methods only, which validate against
/// the lifecycle state machine. The spawned process is tracked by PID; the
/// PID is present exactly while the state is `Running` or `Stopping`.
#[derive(Debug, Clone)]
pub struct ServiceInstance {
    // Identity
    kind: ServiceKind,
    name: String,

    // Filesystem layout, derived once from the execution directory
    exec_dir: PathBuf,
    data_dir: PathBuf,
    config_path: PathBuf,
    log_path: PathBuf,

    // Absolute path of the daemon start binary, for status reporting
    start_binary: PathBuf,

    // Tuning values, immutable after construction
    settings: ZookeeperSettings,

    // State
    state: InstanceState,
    pid: Option<u32>,
}

impl ServiceInstance {
    /// Create a new instance in the `Created` state
    ///
    /// Nothing is touched on disk here; directory creation happens in the
    /// lifecycle service. The execution directory must be absolute because
    /// it becomes part of the rendered daemon config.
    pub fn new(
        kind: ServiceKind,
        exec_dir: PathBuf,
        settings: ZookeeperSettings,
        start_binary: PathBuf,
    ) -> Result<Self, DomainError> {
        if !exec_dir.is_absolute() {
            return Err(DomainError::InvalidExecDir(
                exec_dir.display().to_string(),
            ));
        }

        let data_dir = exec_dir.join(DATA_DIR);
        let config_path = exec_dir.join(ETC_DIR).join(kind.config_file());
        let log_path = exec_dir.join(LOG_FILE);

        Ok(Self {
            kind,
            name: kind.service_name().to_string(),
            exec_dir,
            data_dir,
            config_path,
            log_path,
            start_binary,
            settings,
            state: InstanceState::default(),
            pid: None,
        })
    }

    // ===== Getters =====

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exec_dir(&self) -> &Path {
        &self.exec_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn start_binary(&self) -> &Path {
        &self.start_binary
    }

    pub fn settings(&self) -> &ZookeeperSettings {
        &self.settings
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Substitution map for rendering this instance's config
    pub fn substitutions(&self) -> std::collections::HashMap<String, String> {
        self.settings.substitutions(&self.data_dir)
    }

    // ===== State transitions =====

    /// Mark the execution directory tree as created
    pub fn mark_directory_ready(&mut self) -> Result<(), DomainError> {
        self.transition(InstanceState::DirectoryReady)
    }

    /// Mark the config file as rendered and written
    pub fn mark_configured(&mut self) -> Result<(), DomainError> {
        self.transition(InstanceState::Configured)
    }

    /// Mark the daemon as spawned with the given PID
    pub fn mark_running(&mut self, pid: u32) -> Result<(), DomainError> {
        self.transition(InstanceState::Running)?;
        self.pid = Some(pid);
        Ok(())
    }

    /// Mark the stop command as issued
    pub fn mark_stopping(&mut self) -> Result<(), DomainError> {
        self.transition(InstanceState::Stopping)
    }

    /// Mark the daemon as stopped; the PID is released
    pub fn mark_stopped(&mut self) -> Result<(), DomainError> {
        self.transition(InstanceState::Stopped)?;
        self.pid = None;
        Ok(())
    }

    /// Mark a failed deploy step; the PID is released
    pub fn mark_failed(&mut self) -> Result<(), DomainError> {
        self.transition(InstanceState::Failed)?;
        self.pid = None;
        Ok(())
    }

    fn transition(&mut self, new_state: InstanceState) -> Result<(), DomainError> {
        if !self.state.can_transition_to(new_state) {
            return Err(DomainError::InvalidStateTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }
        self.state = new_state;
        Ok(())
    }

    // ===== Queries =====

    /// Human-readable status block. Side-effect free.
    pub fn status(&self) -> String {
        if !self.state.is_active() {
            return format!("Service not running {}", self.name);
        }

        format!(
            "{} instance\n    address             localhost:{}\n    execution dir       {}\n    binary              {}\n",
            self.name,
            self.settings.client_port,
            self.exec_dir.display(),
            self.start_binary.display(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> ServiceInstance {
        ServiceInstance::new(
            ServiceKind::Zookeeper,
            PathBuf::from("/tmp/x/zookeeper"),
            ZookeeperSettings::default(),
            PathBuf::from("/opt/service-manager/bin/zookeeper-server-start.sh"),
        )
        .unwrap()
    }

    #[test]
    fn test_derived_paths() {
        let inst = instance();
        assert_eq!(inst.data_dir(), Path::new("/tmp/x/zookeeper/data"));
        assert_eq!(
            inst.config_path(),
            Path::new("/tmp/x/zookeeper/etc/zookeeper.properties")
        );
        assert_eq!(inst.log_path(), Path::new("/tmp/x/zookeeper/log"));
    }

    #[test]
    fn test_rejects_relative_exec_dir() {
        let result = ServiceInstance::new(
            ServiceKind::Zookeeper,
            PathBuf::from("relative/dir"),
            ZookeeperSettings::default(),
            PathBuf::from("/opt/bin/start.sh"),
        );
        assert!(matches!(result, Err(DomainError::InvalidExecDir(_))));
    }

    #[test]
    fn test_pid_present_iff_active() {
        let mut inst = instance();
        assert_eq!(inst.pid(), None);

        inst.mark_directory_ready().unwrap();
        inst.mark_configured().unwrap();
        assert_eq!(inst.pid(), None);

        inst.mark_running(4242).unwrap();
        assert_eq!(inst.pid(), Some(4242));

        inst.mark_stopping().unwrap();
        assert_eq!(inst.pid(), Some(4242));

        inst.mark_stopped().unwrap();
        assert_eq!(inst.pid(), None);
    }

    #[test]
    fn test_cannot_skip_lifecycle_steps() {
        let mut inst = instance();
        let err = inst.mark_running(1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_status_while_running() {
        let mut inst = instance();
        inst.mark_directory_ready().unwrap();
        inst.mark_configured().unwrap();
        inst.mark_running(7).unwrap();

        let status = inst.status();
        assert!(status.contains("localhost:2181"));
        assert!(status.contains("/tmp/x/zookeeper"));
        assert!(status.contains("zookeeper-server-start.sh"));
    }

    #[test]
    fn test_status_after_stop() {
        let mut inst = instance();
        inst.mark_directory_ready().unwrap();
        inst.mark_configured().unwrap();
        inst.mark_running(7).unwrap();
        inst.mark_stopping().unwrap();
        inst.mark_stopped().unwrap();

        assert_eq!(inst.status(), "Service not running zookeeper");
    }

    #[test]
    fn test_failed_deploy_releases_pid() {
        let mut inst = instance();
        inst.mark_directory_ready().unwrap();
        inst.mark_configured().unwrap();
        inst.mark_running(7).unwrap();
        inst.mark_failed().unwrap();
        assert_eq!(inst.pid(), None);
    }
}
