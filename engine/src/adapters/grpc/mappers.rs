//! Proto <-> domain conversions for the gRPC adapter

use crate::domain::{DomainError, ServiceKind, ZookeeperSettings};
use crate::proto::DeployRequest;
use tonic::Status;

/// Map a domain error onto a gRPC status code
///
/// Caller mistakes map to client-side codes; everything the server did to
/// itself (filesystem, spawn) is internal.
pub fn domain_error_to_status(err: DomainError) -> Status {
    match err {
        DomainError::AlreadyRunning(_) => Status::already_exists(err.to_string()),
        DomainError::NotRunning(_) => Status::not_found(err.to_string()),
        DomainError::UnknownService(_) | DomainError::InvalidExecDir(_) => {
            Status::invalid_argument(err.to_string())
        }
        DomainError::DirectoryConflict(_) => Status::failed_precondition(err.to_string()),
        _ => Status::internal(err.to_string()),
    }
}

/// Parse the service kind out of a request's `service` field
pub fn parse_service_kind(service: &str) -> Result<ServiceKind, Status> {
    service
        .parse::<ServiceKind>()
        .map_err(domain_error_to_status)
}

/// Build settings from a deploy request
///
/// Zero-valued `client_port` and `tick_time` select the server-side
/// defaults; `max_client_cnxns = 0` is a real value (unlimited).
pub fn settings_from_request(req: &DeployRequest) -> Result<ZookeeperSettings, Status> {
    let defaults = ZookeeperSettings::default();

    let client_port = if req.client_port == 0 {
        defaults.client_port
    } else {
        u16::try_from(req.client_port)
            .map_err(|_| Status::invalid_argument(format!("client port out of range: {}", req.client_port)))?
    };

    Ok(ZookeeperSettings {
        client_port,
        max_client_cnxns: req.max_client_cnxns,
        tick_time: if req.tick_time == 0 {
            defaults.tick_time
        } else {
            req.tick_time
        },
        verbose: req.verbose,
    })
}
