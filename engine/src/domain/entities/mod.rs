pub mod instance;

pub use instance::ServiceInstance;
