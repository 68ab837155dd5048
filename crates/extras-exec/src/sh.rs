//! Silent wrappers around common file commands
//!
//! `options` is passed through as a single flag argument (`"-r"`, `"-p"`);
//! an empty string passes nothing.

use crate::error::Result;
use crate::spawn::{Output, SpawnOptions, spawn};

fn run(program: &str, options: &str, operands: &[&str]) -> Result<Output> {
    let args: Vec<&str> = std::iter::once(options)
        .filter(|o| !o.is_empty())
        .chain(operands.iter().copied())
        .collect();
    spawn(program, &args, &SpawnOptions::silent())
}

pub fn cp(options: &str, from: &str, to: &str) -> Result<Output> {
    run("cp", options, &[from, to])
}

pub fn mv(from: &str, to: &str) -> Result<Output> {
    run("mv", "", &[from, to])
}

pub fn mkdir(options: &str, dirs: &[&str]) -> Result<Output> {
    run("mkdir", options, dirs)
}

pub fn rm(options: &str, files: &[&str]) -> Result<Output> {
    run("rm", options, files)
}
