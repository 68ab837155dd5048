//! Error types for command execution

/// Errors that can occur while running a command
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The process could not be started or its output could not be read
    #[error("Failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully
    #[error("Command failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured stderr output
        stderr: String,
    },
}

/// Result type alias for command execution
pub type Result<T> = std::result::Result<T, ExecError>;
