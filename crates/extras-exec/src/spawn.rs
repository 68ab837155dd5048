//! Running commands and capturing their output
//!
//! Every call blocks until the child exits. There is no timeout and no
//! retry; a failure to start surfaces immediately as [`ExecError::Io`].

use std::path::PathBuf;
use std::process::Command;

use crate::error::{ExecError, Result};

/// Options for a single command invocation.
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    /// Suppress echoing captured output to the console.
    pub silent: bool,
    /// Working directory for the child; inherits the caller's when `None`.
    pub cwd: Option<PathBuf>,
}

impl SpawnOptions {
    /// Options that capture without echoing.
    pub fn silent() -> Self {
        Self {
            silent: true,
            cwd: None,
        }
    }

    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error, kept only when the command failed
    pub stderr: Option<String>,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl Output {
    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn an unsuccessful exit into [`ExecError::CommandFailed`].
    pub fn into_result(self) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(ExecError::CommandFailed {
                code: self.code,
                stderr: self.stderr.unwrap_or_default(),
            })
        }
    }
}

/// Seam for anything that can run a program and capture its output.
pub trait CommandRunner {
    /// Run `program` directly with `args`, without a shell.
    fn spawn(&self, program: &str, args: &[&str], options: &SpawnOptions) -> Result<Output>;

    /// Run a full command line through the platform shell.
    fn shell(&self, command_line: &str, options: &SpawnOptions) -> Result<Output> {
        let (shell, flag) = platform_shell();
        self.spawn(shell, &[flag, command_line], options)
    }
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn spawn(&self, program: &str, args: &[&str], options: &SpawnOptions) -> Result<Output> {
        tracing::debug!(program, ?args, cwd = ?options.cwd, "Spawning command");

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        let output = cmd.output().map_err(|source| ExecError::Io {
            program: program.to_string(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !options.silent {
            if !stdout.is_empty() {
                println!("{stdout}");
            }
            if !stderr.is_empty() {
                eprintln!("{stderr}");
            }
        }

        let success = output.status.success();
        Ok(Output {
            stdout,
            stderr: (!success).then_some(stderr),
            code: output.status.code(),
        })
    }
}

/// Run `program` with `args` using the system runner.
pub fn spawn(program: &str, args: &[&str], options: &SpawnOptions) -> Result<Output> {
    SystemRunner.spawn(program, args, options)
}

/// Run a command line through the platform shell using the system runner.
pub fn shell(command_line: &str, options: &SpawnOptions) -> Result<Output> {
    SystemRunner.shell(command_line, options)
}

fn platform_shell() -> (&'static str, &'static str) {
    if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") }
}
