//! Command-line options parsing

use std::env;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 4242;
const DEFAULT_PROTOCOL: &str = "tcp";

/// How to reach the daemon
///
/// Flags win over the `SM_HOST`/`SM_PORT` environment variables, which win
/// over the defaults. These flags may appear anywhere on the command line,
/// so per-command parsers skip them via `is_connection_flag`.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl ConnectionOptions {
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            host: env::var("SM_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("SM_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--protocol" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--protocol requires a value".to_string());
                    }
                    opts.protocol = args[i].clone();
                }
                "--host" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--host requires a value".to_string());
                    }
                    opts.host = args[i].clone();
                }
                "--port" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--port requires a value".to_string());
                    }
                    opts.port = args[i]
                        .parse()
                        .map_err(|_| format!("invalid --port value: {}", args[i]))?;
                }
                _ => {}
            }
            i += 1;
        }

        if opts.protocol != "tcp" {
            return Err(format!(
                "unsupported protocol {:?}; only \"tcp\" is available",
                opts.protocol
            ));
        }

        Ok(opts)
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Is `flag` a connection flag (which always takes one value)?
pub fn is_connection_flag(flag: &str) -> bool {
    matches!(flag, "--protocol" | "--host" | "--port")
}

/// Options for the deploy command
#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub exec_dir: Option<String>,
    pub client_port: u16,
    pub max_client_cnxns: u32,
    pub tick_time: u64,
    pub verbose: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            exec_dir: None,
            client_port: 2181,
            max_client_cnxns: 0,
            tick_time: 2000,
            verbose: false,
        }
    }
}

impl DeployOptions {
    /// Parse deploy flags from the arguments after the service name
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Self::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--exec-dir" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--exec-dir requires a value".to_string());
                    }
                    opts.exec_dir = Some(args[i].clone());
                }
                "--client-port" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--client-port requires a value".to_string());
                    }
                    opts.client_port = args[i]
                        .parse()
                        .map_err(|_| format!("invalid --client-port value: {}", args[i]))?;
                }
                "--max-client-cnxns" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--max-client-cnxns requires a value".to_string());
                    }
                    opts.max_client_cnxns = args[i]
                        .parse()
                        .map_err(|_| format!("invalid --max-client-cnxns value: {}", args[i]))?;
                }
                "--tick-time" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--tick-time requires a value".to_string());
                    }
                    opts.tick_time = args[i]
                        .parse()
                        .map_err(|_| format!("invalid --tick-time value: {}", args[i]))?;
                }
                "--verbose" => {
                    opts.verbose = true;
                }
                flag if is_connection_flag(flag) => {
                    // Connection flags are handled globally; skip the value.
                    i += 1;
                }
                other => {
                    return Err(format!("unknown deploy option: {}", other));
                }
            }
            i += 1;
        }

        Ok(opts)
    }
}
