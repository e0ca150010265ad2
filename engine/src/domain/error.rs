//! Domain-level errors
//! These represent lifecycle and registry rule violations, not transport failures

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum DomainError {
    // Registry errors
    #[error("Service '{0}' is already running")]
    AlreadyRunning(String),

    #[error("Service '{0}' is not running")]
    NotRunning(String),

    #[error("Unknown service kind: {0}")]
    UnknownService(String),

    // Deploy errors
    #[error("Execution directory already exists: {0}")]
    DirectoryConflict(String),

    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: String, message: String },

    #[error("Failed to read template '{path}': {message}")]
    TemplateRead { path: String, message: String },

    #[error("Failed to write config '{path}': {message}")]
    ConfigWrite { path: String, message: String },

    #[error("Failed to spawn '{binary}': {message}")]
    Spawn { binary: String, message: String },

    // Stop errors. Reported in logs only; a failed stop command never
    // blocks deregistration.
    #[error("Stop command exited with status {status}")]
    StopCommandFailed { status: i32 },

    // Validation errors
    #[error("Execution directory must be an absolute path: {0}")]
    InvalidExecDir(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;
