//! Error types for extras-value

/// Result type for extras-value operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in extras-value operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown type tag: {0}")]
    UnknownTypeTag(String),

    #[error("Unknown conversion: {0}")]
    UnknownConversion(String),

    #[error("Invalid pattern /{pattern}/{flags}: {message}")]
    InvalidPattern {
        pattern: String,
        flags: String,
        message: String,
    },
}
