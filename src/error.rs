//! Error types for tagspan

use thiserror::Error;

/// Result type alias for tagspan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Range {start}..{end} is outside buffer of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("{0}")]
    Usage(String),
}
