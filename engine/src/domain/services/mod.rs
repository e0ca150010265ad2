pub mod config_template;
pub mod lifecycle;

pub use lifecycle::InstanceLifecycleService;
