//! `nbu-qr` command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Check a payment file
//! nbu-qr validate --config payment.toml
//!
//! # Print the payment URL, overriding the amount
//! nbu-qr encode --config payment.toml --amount 150.00
//!
//! # Show the fields of a scanned URL
//! nbu-qr decode https://qr.bank.gov.ua/QkNECjAwMwoy...
//!
//! # Configure logging level
//! RUST_LOG=debug nbu-qr encode
//! ```
//!
//! # Environment Variables
//!
//! - `NBU_QR_CONFIG` - Path to the payment file (default: `payment.toml`)
//! - `NBU_QR_BASE_URL` - Base URL. `--base-url` wins over it, and it wins over
//!   `base_url` in the payment file (default: `https://qr.bank.gov.ua/`)
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! Variables may also be placed in a `.env` file in the current directory.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nbu_qr_cli::cli::Cli;
use nbu_qr_cli::commands::{self, Outcome};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match commands::run(cli, &mut std::io::stdout().lock()) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Invalid) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("nbu-qr failed: {e}");
            ExitCode::FAILURE
        }
    }
}
