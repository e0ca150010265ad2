pub mod instance_state;
pub mod service_kind;
pub mod zookeeper_settings;

pub use instance_state::InstanceState;
pub use service_kind::ServiceKind;
pub use zookeeper_settings::ZookeeperSettings;
