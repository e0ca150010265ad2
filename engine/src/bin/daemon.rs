//! Service manager daemon
//! Binds the gRPC control surface and, optionally, an interactive console

mod daemon {
    pub mod config;
}

use daemon::config::DaemonConfig;
use sm_engine::adapters::grpc::ServiceManagerService;
use sm_engine::application::ServiceRegistry;
use sm_engine::infrastructure::{CommandLauncher, ServiceHome};
use sm_engine::proto::service_manager_server::ServiceManagerServer;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const BANNER: &str = "\
Service manager daemon
    deploy            deploy a service instance
    stop              stop a running service instance
    info              show a service's status
    status            check whether a service is running
Connect with the svcman client; type \"quit\" in the console to exit.
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DaemonConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    config.validate().map_err(|e| {
        error!(error = %e, "Invalid daemon configuration");
        e
    })?;
    let addr = config.bind_addr()?;

    let home = ServiceHome::from_env();
    let registry = Arc::new(ServiceRegistry::new(Arc::new(CommandLauncher::new()), home));
    let service = ServiceManagerServer::new(ServiceManagerService::new(registry));

    println!("{}", BANNER);
    info!(%addr, console = config.console, "Service manager daemon starting");

    let console_quit = if config.console {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(run_console(tx));
        Some(rx)
    } else {
        None
    };

    sm_engine::transport::serve(addr, service, shutdown_signal(console_quit)).await?;

    info!("Service manager daemon stopped");
    Ok(())
}

/// Resolve when ctrl-c arrives or the console asks to quit
async fn shutdown_signal(console_quit: Option<oneshot::Receiver<()>>) {
    match console_quit {
        Some(quit) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = quit => {}
            }
        }
        None => {
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

/// Minimal operator console on stdin; "quit" shuts the daemon down
async fn run_console(quit: oneshot::Sender<()>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" {
                    info!("Console requested shutdown");
                    break;
                }
                println!("Your command is {}", line);
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Console read failed");
                break;
            }
        }
    }

    let _ = quit.send(());
}
