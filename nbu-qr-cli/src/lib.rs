//! Command-line front end for the `nbu-qr` library.
//!
//! - [`cli`] - Argument parsing
//! - [`config`] - Payment files with environment variable expansion
//! - [`commands`] - Subcommand implementations

pub mod cli;
pub mod commands;
pub mod config;
