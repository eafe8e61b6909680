//! Command-line front end for nds-events.
//!
//! This crate provides the `nds-events` binary: date pattern translation,
//! date rendering, and the admin and widget views over a JSON list of events.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;

pub use cli::Cli;
pub use error::{CliError, CliResult};
