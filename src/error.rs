//! Error types for dayplan
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown project, bad date)
//! - 3: Blocked by data/state (malformed backlog, out-of-order journal append)
//! - 4: Operation failed (I/O, serialization, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the dayplan CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const STATE_BLOCKED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for dayplan operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Store not initialized at {0}")]
    StoreNotFound(PathBuf),

    #[error("Invalid start date: {0}")]
    InvalidStartDate(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Data/state blocks (exit code 3)
    #[error("Malformed backlog: {0}")]
    MalformedBacklog(String),

    #[error("Out-of-order day for {project}: journal expects day {expected}, got {got}")]
    OutOfOrderDay {
        project: String,
        expected: u32,
        got: u32,
    },

    #[error("Project already exists: {0}")]
    ProjectExists(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::ProjectNotFound(_)
            | Error::StoreNotFound(_)
            | Error::InvalidStartDate(_)
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Data/state blocks
            Error::MalformedBacklog(_)
            | Error::OutOfOrderDay { .. }
            | Error::ProjectExists(_) => exit_codes::STATE_BLOCKED,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for dayplan operations
pub type Result<T> = std::result::Result<T, Error>;
