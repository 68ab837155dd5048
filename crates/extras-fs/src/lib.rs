//! Format-aware filesystem helpers for extras
//!
//! This crate provides:
//! - Normalized path handling with home and working-directory anchoring
//! - Extension-driven reads and writes for JSON, YAML, TOML and text
//! - Atomic writes that create missing parent directories
//! - Recursive traversal with numeric-aware ordering
//! - An opt-in [`ModuleLoader`] seam for executable module files

pub mod constants;
pub mod error;
pub mod files;
pub mod format;
pub mod io;
pub mod loader;
pub mod logging;
pub mod path;
pub mod resolve;
pub mod walk;

pub use error::{Error, Result};
pub use files::{Content, Files, ReadOptions};
pub use format::Format;
pub use io::Encoding;
pub use loader::{InterpreterLoader, ModuleLoader};
pub use path::{FileRecord, NormalizedPath, basext};
pub use resolve::Resolver;
pub use walk::{compare_by_number, sort_by_number, sort_by_number_with};

pub use extras_value::Value;
