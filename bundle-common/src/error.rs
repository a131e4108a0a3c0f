//! Common error types for BundleBoard

use thiserror::Error;

/// Common result type for BundleBoard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the BundleBoard crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Card (de)serialization error for the JSON data column
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP server error
    #[error("HTTP server error: {0}")]
    Http(String),
}
