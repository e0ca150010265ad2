//! Service registry
//! At most one running instance per service name; all lifecycle transitions
//! are mediated here

use crate::domain::{
    ports::DaemonLauncher, services::InstanceLifecycleService, DomainError, ServiceInstance,
    ServiceKind, ZookeeperSettings,
};
use crate::infrastructure::ServiceHome;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Authoritative mapping of service name to running instance
///
/// A name is present exactly while its instance is `Running` or `Stopping`.
/// One mutex guards the whole mapping and is held across the entire
/// check-then-deploy sequence, so two concurrent `start` calls for the same
/// name can never both pass the "not present" check. Call volume is a
/// handful of operator commands; the coarse lock is the simplest correct
/// choice.
pub struct ServiceRegistry {
    home: ServiceHome,
    lifecycle: InstanceLifecycleService,
    instances: Mutex<HashMap<String, ServiceInstance>>,
}

impl ServiceRegistry {
    pub fn new(launcher: Arc<dyn DaemonLauncher>, home: ServiceHome) -> Self {
        Self {
            home,
            lifecycle: InstanceLifecycleService::new(launcher),
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Deploy a new instance of `kind` under `exec_root`
    ///
    /// The instance's execution directory is `<exec_root>/<service name>`.
    /// Fails with `AlreadyRunning` if the service already has a registered
    /// instance. On any lifecycle failure the partially-constructed
    /// instance is discarded and never inserted.
    pub async fn start(
        &self,
        kind: ServiceKind,
        exec_root: &Path,
        settings: ZookeeperSettings,
    ) -> Result<String, DomainError> {
        let name = kind.service_name();
        let mut instances = self.instances.lock().await;

        if instances.contains_key(name) {
            return Err(DomainError::AlreadyRunning(name.to_string()));
        }

        let mut instance = ServiceInstance::new(
            kind,
            exec_root.join(name),
            settings,
            self.home.start_binary(kind),
        )?;

        debug!(
            service = name,
            exec_dir = %instance.exec_dir().display(),
            verbose = instance.settings().verbose,
            "Starting service deploy"
        );

        self.lifecycle
            .deploy(&mut instance, &self.home.template_path(kind))
            .await?;

        let message = format!("Deployed {} at {}", name, instance.exec_dir().display());
        info!(
            service = name,
            pid = instance.pid(),
            exec_dir = %instance.exec_dir().display(),
            "Service registered"
        );
        instances.insert(name.to_string(), instance);

        Ok(message)
    }

    /// Stop a running instance and remove it from the registry
    ///
    /// Fails with `NotRunning` if the name is absent. A failed stop
    /// command still deregisters (logged inside the lifecycle service), so
    /// the registry cannot get stuck on a broken stop script.
    pub async fn stop(&self, name: &str) -> Result<String, DomainError> {
        let mut instances = self.instances.lock().await;

        let instance = instances
            .get_mut(name)
            .ok_or_else(|| DomainError::NotRunning(name.to_string()))?;

        let stop_binary = self.home.stop_binary(instance.kind());
        self.lifecycle.shutdown(instance, &stop_binary).await;

        instances.remove(name);
        info!(service = name, "Service removed from registry");

        Ok(format!("Stopped service {}", name))
    }

    /// Pure lookup: is an instance of `name` registered?
    pub async fn has(&self, name: &str) -> bool {
        self.instances.lock().await.contains_key(name)
    }

    /// Status block for `name`, or a "not running" message if absent
    pub async fn describe(&self, name: &str) -> String {
        match self.instances.lock().await.get(name) {
            Some(instance) => instance.status(),
            None => format!("Not running service {}", name),
        }
    }
}
