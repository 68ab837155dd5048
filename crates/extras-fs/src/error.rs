//! Error types for extras-fs

use std::path::PathBuf;

/// Result type for extras-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in extras-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} content at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} content for {path}: {message}")]
    Serialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Cannot write structured content to {path}: unsupported format '{extension}'")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Unknown format name: {0}")]
    UnknownFormat(String),

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("Content of {path} is not valid {encoding}")]
    Encoding { path: PathBuf, encoding: String },

    #[error("Failed to load module {path}: {message}")]
    Module { path: PathBuf, message: String },

    #[error("No trusted module loader installed; refusing to evaluate {path}")]
    UntrustedModule { path: PathBuf },

    #[error("Could not determine the home directory")]
    HomeDirNotFound,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The failing path, for variants that carry one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Serialize { path, .. }
            | Self::UnsupportedFormat { path, .. }
            | Self::Encoding { path, .. }
            | Self::Module { path, .. }
            | Self::UntrustedModule { path } => Some(path),
            _ => None,
        }
    }

    /// Operating-system error code of an I/O failure.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}
