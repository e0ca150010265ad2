pub mod mappers;
pub mod service;

pub use service::ServiceManagerService;
