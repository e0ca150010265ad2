//! gRPC ServiceManager service implementation
//! Driving adapter that exposes the registry through gRPC

use crate::application::ServiceRegistry;
use crate::domain::DomainError;
use crate::proto::{
    service_manager_server::ServiceManager, DeployRequest, DeployResponse,
    HasServiceRunningRequest, HasServiceRunningResponse, InfoRequest, InfoResponse, StopRequest,
    StopResponse,
};
use std::path::Path;
use std::sync::Arc;
use tonic::{Request, Response, Status};
use tracing::{error, info};

use super::mappers::{domain_error_to_status, parse_service_kind, settings_from_request};

/// gRPC service implementation
pub struct ServiceManagerService {
    registry: Arc<ServiceRegistry>,
}

impl ServiceManagerService {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }
}

#[tonic::async_trait]
impl ServiceManager for ServiceManagerService {
    async fn deploy(
        &self,
        request: Request<DeployRequest>,
    ) -> Result<Response<DeployResponse>, Status> {
        let req = request.into_inner();

        info!(
            service = %req.service,
            exec_dir = %req.exec_dir,
            "gRPC Deploy request received"
        );

        let kind = parse_service_kind(&req.service)?;
        let settings = settings_from_request(&req)?;

        let message = self
            .registry
            .start(kind, Path::new(&req.exec_dir), settings)
            .await
            .map_err(|e| {
                error!(service = %req.service, error = %e, "Deploy failed");
                domain_error_to_status(e)
            })?;

        Ok(Response::new(DeployResponse { message }))
    }

    async fn stop(&self, request: Request<StopRequest>) -> Result<Response<StopResponse>, Status> {
        let req = request.into_inner();

        info!(service = %req.service, "gRPC Stop request received");

        let message = match self.registry.stop(&req.service).await {
            Ok(message) => message,
            // Stopping an absent service is answered, not rejected; the
            // caller asked for a state the registry is already in.
            Err(DomainError::NotRunning(name)) => format!("Service not running {}", name),
            Err(e) => {
                error!(service = %req.service, error = %e, "Stop failed");
                return Err(domain_error_to_status(e));
            }
        };

        Ok(Response::new(StopResponse { message }))
    }

    async fn info(&self, request: Request<InfoRequest>) -> Result<Response<InfoResponse>, Status> {
        let req = request.into_inner();

        info!(service = %req.service, "gRPC Info request received");

        let message = self.registry.describe(&req.service).await;
        Ok(Response::new(InfoResponse { message }))
    }

    async fn has_service_running(
        &self,
        request: Request<HasServiceRunningRequest>,
    ) -> Result<Response<HasServiceRunningResponse>, Status> {
        let req = request.into_inner();

        info!(service = %req.service, "gRPC HasServiceRunning request received");

        let running = self.registry.has(&req.service).await;
        Ok(Response::new(HasServiceRunningResponse { running }))
    }
}
