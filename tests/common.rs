//! Shared test utilities
//!
//! All tests run against an in-process `ServiceRegistry` with a mock
//! launcher, so no real daemon binaries are needed. The fixture lays out a
//! temporary installation with a config template and a temporary execution
//! root, both removed when the fixture drops.

use sm_engine::application::ServiceRegistry;
use sm_engine::domain::ports::{DaemonLauncher, SpawnSpec};
use sm_engine::domain::DomainError;
use sm_engine::infrastructure::ServiceHome;
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Template installed into the fixture's etc directory
pub const TEMPLATE: &str =
    "dataDir=%dataDir%\nclientPort=%clientPort%\nmaxClientCnxns=%maxClientCnxns%\ntickTime=%tickTime%\n";

/// Scriptable launcher double
///
/// Hands out increasing fake PIDs and records every spawn spec. Stop exit
/// status and spawn failure are settable per test.
pub struct MockLauncher {
    next_pid: AtomicU32,
    spawned: Mutex<Vec<SpawnSpec>>,
    stop_calls: AtomicU32,
    stop_status: AtomicI32,
    fail_spawn: AtomicBool,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self {
            next_pid: AtomicU32::new(1000),
            spawned: Mutex::new(Vec::new()),
            stop_calls: AtomicU32::new(0),
            stop_status: AtomicI32::new(0),
            fail_spawn: AtomicBool::new(false),
        }
    }

    /// Exit status the next stop commands report
    pub fn set_stop_status(&self, status: i32) {
        self.stop_status.store(status, Ordering::SeqCst);
    }

    /// Make spawns fail until reset
    pub fn set_fail_spawn(&self, fail: bool) {
        self.fail_spawn.store(fail, Ordering::SeqCst);
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.lock().unwrap().len()
    }

    pub fn stop_calls(&self) -> u32 {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn spawned_specs(&self) -> Vec<SpawnSpec> {
        self.spawned.lock().unwrap().clone()
    }
}

impl Default for MockLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DaemonLauncher for MockLauncher {
    async fn spawn(&self, spec: SpawnSpec) -> Result<u32, DomainError> {
        if self.fail_spawn.load(Ordering::SeqCst) {
            return Err(DomainError::Spawn {
                binary: spec.binary.display().to_string(),
                message: "mock spawn failure".to_string(),
            });
        }
        self.spawned.lock().unwrap().push(spec);
        Ok(self.next_pid.fetch_add(1, Ordering::SeqCst))
    }

    async fn stop(&self, _stop_binary: &Path) -> Result<i32, DomainError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stop_status.load(Ordering::SeqCst))
    }
}

/// Temporary installation plus an in-process registry
pub struct Fixture {
    pub home: TempDir,
    pub exec_root: TempDir,
    pub launcher: Arc<MockLauncher>,
    pub registry: Arc<ServiceRegistry>,
}

impl Fixture {
    pub fn new() -> Self {
        let home = TempDir::new().expect("create home dir");
        let exec_root = TempDir::new().expect("create exec root");

        let template_dir = home.path().join("etc");
        std::fs::create_dir_all(&template_dir).expect("create template dir");
        std::fs::write(template_dir.join("zookeeper.properties.template"), TEMPLATE)
            .expect("write template");

        let launcher = Arc::new(MockLauncher::new());
        let service_home = ServiceHome::new(home.path(), template_dir);
        let registry = Arc::new(ServiceRegistry::new(launcher.clone(), service_home));

        Self {
            home,
            exec_root,
            launcher,
            registry,
        }
    }

    /// Path of the instance directory the registry will use for `service`
    pub fn instance_dir(&self, service: &str) -> std::path::PathBuf {
        self.exec_root.path().join(service)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
