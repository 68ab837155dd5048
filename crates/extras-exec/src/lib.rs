//! Synchronous subprocess execution for extras
//!
//! A thin capture-and-return layer over [`std::process::Command`]:
//!
//! - [`spawn`] runs a program directly, [`shell`] runs a command line through
//!   the platform shell
//! - [`SpawnOptions::silent`] suppresses echoing captured output
//! - [`CommandRunner`] is the seam other crates depend on, so they can be
//!   driven by a fake in tests

pub mod error;
pub mod sh;
pub mod spawn;

pub use error::{ExecError, Result};
pub use spawn::{CommandRunner, Output, SpawnOptions, SystemRunner, shell, spawn};
