//! gRPC transport setup
//! TCP serving for the daemon's control surface

use std::error::Error;
use std::future::Future;
use std::net::SocketAddr;

use tonic::transport::Server;

use crate::adapters::grpc::ServiceManagerService;
use crate::proto::service_manager_server::ServiceManagerServer;

/// Serve the control surface on a TCP address until `shutdown` resolves
pub async fn serve<F>(
    addr: SocketAddr,
    service: ServiceManagerServer<ServiceManagerService>,
    shutdown: F,
) -> Result<(), Box<dyn Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    Server::builder()
        .add_service(service)
        .serve_with_shutdown(addr, shutdown)
        .await?;
    Ok(())
}
