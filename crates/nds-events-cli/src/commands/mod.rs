//! Subcommand implementations.
//!
//! Each command returns its output so `main` decides where it goes.

pub mod admin;
pub mod config;
pub mod date;
pub mod datepicker;
pub mod metabox;
pub mod upcoming;
