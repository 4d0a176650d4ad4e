//! Remote desktop status monitor library.
//!
//! Periodically samples session and network state to decide whether a remote
//! desktop connection is active, confirms transitions before committing them,
//! and serves the result over a small HTTP API.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
