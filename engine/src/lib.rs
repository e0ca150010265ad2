pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod transport;

pub mod proto {
    tonic::include_proto!("service_manager");
}
