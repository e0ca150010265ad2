mod commands;
mod options;

use options::ConnectionOptions;
use std::env;
use std::time::Duration;
use tonic::transport::Channel;

mod service_manager {
    tonic::include_proto!("service_manager");
}
use service_manager::service_manager_client::ServiceManagerClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Deploy,
    Stop,
    Info,
    Status,
}

impl Command {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "deploy" => Some(Command::Deploy),
            "stop" => Some(Command::Stop),
            "info" => Some(Command::Info),
            "status" => Some(Command::Status),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_usage();
        std::process::exit(1);
    }

    // Validate the command line fully before dialing the daemon.
    let cmd = match Command::parse(&args[1]) {
        Some(cmd) => cmd,
        None => {
            eprintln!("unknown command: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    };
    let service = args[2].as_str();
    let rest = &args[3..];

    let conn = ConnectionOptions::parse(&args[2..])?;
    let channel = Channel::from_shared(conn.endpoint())?
        .timeout(REQUEST_TIMEOUT)
        .connect()
        .await?;
    let mut client = ServiceManagerClient::new(channel);

    match cmd {
        Command::Deploy => commands::handle_deploy(&mut client, service, rest).await?,
        Command::Stop => commands::handle_stop(&mut client, service).await?,
        Command::Info => commands::handle_info(&mut client, service).await?,
        Command::Status => commands::handle_status(&mut client, service).await?,
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Service Manager CLI");
    eprintln!();
    eprintln!("Usage: svcman <command> <service> [options...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  deploy <service> [options]   Deploy a service instance");
    eprintln!("  stop <service>               Stop a running service instance");
    eprintln!("  info <service>               Show a service's status");
    eprintln!("  status <service>             Check whether a service is running");
    eprintln!();
    eprintln!("Deploy options:");
    eprintln!("  --exec-dir <path>            Execution root (default: fresh dir under exec/)");
    eprintln!("  --client-port <port>         Zookeeper client port (default: 2181)");
    eprintln!("  --max-client-cnxns <n>       Connection limit, 0 = unlimited (default: 0)");
    eprintln!("  --tick-time <ms>             Zookeeper tick time (default: 2000)");
    eprintln!("  --verbose                    Verbose daemon logging");
    eprintln!();
    eprintln!("Connection options (any command):");
    eprintln!("  --protocol <proto>           Wire protocol, only \"tcp\" (default: tcp)");
    eprintln!("  --host <host>                Daemon host (default: $SM_HOST or localhost)");
    eprintln!("  --port <port>                Daemon port (default: $SM_PORT or 4242)");
}
