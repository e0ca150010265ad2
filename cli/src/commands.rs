//! Command handlers

use crate::options::DeployOptions;
use crate::service_manager::service_manager_client::ServiceManagerClient;
use crate::service_manager::{
    DeployRequest, HasServiceRunningRequest, InfoRequest, StopRequest,
};
use std::env;
use std::path::PathBuf;
use tonic::transport::Channel;
use uuid::Uuid;

const DEFAULT_SERVICE_HOME: &str = "/opt/service-manager";

/// Default execution root: a fresh uuid-named directory under the
/// installation's `exec/` area, so repeated deploys never collide.
fn default_exec_dir() -> PathBuf {
    let home = env::var("SM_SERVICE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SERVICE_HOME));
    home.join("exec").join(Uuid::new_v4().to_string())
}

pub async fn handle_deploy(
    client: &mut ServiceManagerClient<Channel>,
    service: &str,
    args: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let opts = DeployOptions::parse(args)?;

    // Cheap pre-check; the daemon still enforces this atomically.
    let running = client
        .has_service_running(HasServiceRunningRequest {
            service: service.to_string(),
        })
        .await?
        .into_inner()
        .running;
    if running {
        eprintln!("Service already running {}", service);
        std::process::exit(1);
    }

    let exec_dir = opts
        .exec_dir
        .map(PathBuf::from)
        .unwrap_or_else(default_exec_dir);

    let response = client
        .deploy(DeployRequest {
            service: service.to_string(),
            exec_dir: exec_dir.display().to_string(),
            client_port: u32::from(opts.client_port),
            max_client_cnxns: opts.max_client_cnxns,
            tick_time: opts.tick_time,
            verbose: opts.verbose,
        })
        .await?
        .into_inner();

    println!("{}", response.message);
    Ok(())
}

pub async fn handle_stop(
    client: &mut ServiceManagerClient<Channel>,
    service: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .stop(StopRequest {
            service: service.to_string(),
        })
        .await?
        .into_inner();

    println!("{}", response.message);
    Ok(())
}

pub async fn handle_info(
    client: &mut ServiceManagerClient<Channel>,
    service: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .info(InfoRequest {
            service: service.to_string(),
        })
        .await?
        .into_inner();

    println!("{}", response.message);
    Ok(())
}

pub async fn handle_status(
    client: &mut ServiceManagerClient<Channel>,
    service: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .has_service_running(HasServiceRunningRequest {
            service: service.to_string(),
        })
        .await?
        .into_inner();

    if response.running {
        println!("Service running {}", service);
    } else {
        println!("Service not running {}", service);
    }
    Ok(())
}
