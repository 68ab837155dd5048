//! Shared test utilities for the extras workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixture`]: [`FixtureDir`] builder for scratch directory trees

pub mod fixture;

pub use fixture::FixtureDir;
