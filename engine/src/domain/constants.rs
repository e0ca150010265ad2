//! Domain constants

/// Subdirectory for the daemon's data area under the execution directory
pub const DATA_DIR: &str = "data";

/// Subdirectory for the rendered config under the execution directory
pub const ETC_DIR: &str = "etc";

/// Instance log file name under the execution directory
pub const LOG_FILE: &str = "log";

/// Upper bound on waiting for the external stop command (seconds)
pub const STOP_TIMEOUT_SECS: u64 = 20;
