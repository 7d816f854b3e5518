#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use thiserror::Error;

/// Error code constants for type-safe error handling
pub mod code {
    pub const CLI_ERROR: &str = "CLI_ERROR";
    pub const NOT_READY: &str = "NOT_READY";
    pub const NOTFOUND: &str = "NOTFOUND";
    pub const INVALID: &str = "INVALID";
    pub const STORAGE: &str = "STORAGE";
    pub const DEPENDENCY: &str = "DEPENDENCY";
    pub const INTERNAL: &str = "INTERNAL";
}

#[derive(Error, Debug)]
pub enum WorkforceError {
    #[error("Record store is not open yet")]
    NotReady,

    #[error("Mission not found: {0}")]
    NotFound(String),

    #[error("Invalid mission: {0}")]
    InvalidMission(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl WorkforceError {
    /// Wraps a rejected store call, keeping the operation name in the message.
    pub fn storage(operation: &str, err: impl std::fmt::Display) -> Self {
        Self::StorageFailure(format!("{operation}: {err}"))
    }

    /// Returns the protocol error code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotReady => code::NOT_READY,
            Self::NotFound(_) => code::NOTFOUND,
            Self::InvalidMission(_) | Self::ConfigError(_) | Self::SerializationError(_) => {
                code::INVALID
            }
            Self::StorageFailure(_) => code::STORAGE,
            Self::CatalogError(_) => code::INTERNAL,
            Self::IoError(_) => code::DEPENDENCY,
        }
    }

    /// Returns the exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigError(_) => 2,
            Self::NotReady => 3,
            Self::StorageFailure(_) => 4,
            Self::NotFound(_) => 5,
            Self::InvalidMission(_) => 6,
            Self::IoError(_) => 7,
            Self::SerializationError(_) => 8,
            Self::CatalogError(_) => 9,
        }
    }
}

/// Protocol error codes as documented in the CLI
pub const ERROR_CODES: &[(&str, &str, &str)] = &[
    (
        code::CLI_ERROR,
        "Invalid CLI usage",
        "Run 'workforce --help' for valid options",
    ),
    (
        code::NOT_READY,
        "Record store has not been opened",
        "Open the store before issuing mission operations",
    ),
    (
        code::NOTFOUND,
        "Mission was not found",
        "List missions and verify the identifier",
    ),
    (
        code::INVALID,
        "Invalid mission or configuration payload",
        "Ensure mission_id, name and category are present and match the domain",
    ),
    (
        code::STORAGE,
        "Record store rejected the operation",
        "Check disk space and database file permissions",
    ),
    (
        code::DEPENDENCY,
        "Filesystem access failed",
        "Verify the path exists and is readable",
    ),
    (
        code::INTERNAL,
        "Unexpected internal failure",
        "Inspect logs and retry command",
    ),
];

/// Get error code details (description and fix) for a given error code
#[must_use]
pub fn get_error_info(error_code: &str) -> Option<(&'static str, &'static str)> {
    ERROR_CODES
        .iter()
        .find(|(code, _, _)| *code == error_code)
        .map(|(_, desc, fix)| (*desc, *fix))
}

pub type Result<T> = std::result::Result<T, WorkforceError>;
