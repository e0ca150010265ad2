pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::ServiceInstance;
pub use error::{DomainError, Result};
pub use value_objects::{InstanceState, ServiceKind, ZookeeperSettings};
