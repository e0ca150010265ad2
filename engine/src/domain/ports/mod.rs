pub mod daemon_launcher;

pub use daemon_launcher::{DaemonLauncher, SpawnSpec};
