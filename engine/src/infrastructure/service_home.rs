//! Service installation layout
//! Resolves daemon binaries and config templates under the installation root

use crate::domain::ServiceKind;
use std::env;
use std::path::{Path, PathBuf};

/// Default installation root when `SM_SERVICE_HOME` is unset
pub const DEFAULT_SERVICE_HOME: &str = "/opt/service-manager";

/// Where the managed daemons and their templates are installed
///
/// The manager never ships the daemons themselves; it only needs to know
/// where an operator installed them. The root comes from `SM_SERVICE_HOME`
/// and the template directory from `SM_TEMPLATE_DIR` (default: `etc/` under
/// the root).
#[derive(Debug, Clone)]
pub struct ServiceHome {
    root: PathBuf,
    template_dir: PathBuf,
}

impl ServiceHome {
    pub fn new(root: impl Into<PathBuf>, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            template_dir: template_dir.into(),
        }
    }

    /// Resolve the layout from environment variables
    pub fn from_env() -> Self {
        let root = env::var("SM_SERVICE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SERVICE_HOME));
        let template_dir = env::var("SM_TEMPLATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| root.join("etc"));
        Self { root, template_dir }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a service's start binary
    pub fn start_binary(&self, kind: ServiceKind) -> PathBuf {
        self.root.join(kind.start_binary())
    }

    /// Absolute path of a service's stop binary
    pub fn stop_binary(&self, kind: ServiceKind) -> PathBuf {
        self.root.join(kind.stop_binary())
    }

    /// Absolute path of a service's config template
    pub fn template_path(&self, kind: ServiceKind) -> PathBuf {
        self.template_dir.join(kind.template_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to serialize tests that modify environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_layout() {
        let _lock = ENV_MUTEX.lock().unwrap();
        env::remove_var("SM_SERVICE_HOME");
        env::remove_var("SM_TEMPLATE_DIR");

        let home = ServiceHome::from_env();
        assert_eq!(home.root(), Path::new(DEFAULT_SERVICE_HOME));
        assert_eq!(
            home.template_path(ServiceKind::Zookeeper),
            Path::new("/opt/service-manager/etc/zookeeper.properties.template")
        );
        assert_eq!(
            home.start_binary(ServiceKind::Zookeeper),
            Path::new("/opt/service-manager/bin/zookeeper-server-start.sh")
        );
        assert_eq!(
            home.stop_binary(ServiceKind::Zookeeper),
            Path::new("/opt/service-manager/bin/zookeeper-server-stop.sh")
        );
    }

    #[test]
    fn test_env_overrides() {
        let _lock = ENV_MUTEX.lock().unwrap();
        env::set_var("SM_SERVICE_HOME", "/srv/daemons");
        env::set_var("SM_TEMPLATE_DIR", "/srv/templates");

        let home = ServiceHome::from_env();
        assert_eq!(home.root(), Path::new("/srv/daemons"));
        assert_eq!(
            home.template_path(ServiceKind::Zookeeper),
            Path::new("/srv/templates/zookeeper.properties.template")
        );

        env::remove_var("SM_SERVICE_HOME");
        env::remove_var("SM_TEMPLATE_DIR");
    }

    #[test]
    fn test_template_dir_defaults_under_root() {
        let _lock = ENV_MUTEX.lock().unwrap();
        env::set_var("SM_SERVICE_HOME", "/srv/daemons");
        env::remove_var("SM_TEMPLATE_DIR");

        let home = ServiceHome::from_env();
        assert_eq!(
            home.template_path(ServiceKind::Zookeeper),
            Path::new("/srv/daemons/etc/zookeeper.properties.template")
        );

        env::remove_var("SM_SERVICE_HOME");
    }
}
