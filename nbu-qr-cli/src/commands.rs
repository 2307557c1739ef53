//! Subcommand implementations.
//!
//! Output goes to the supplied writer so the commands can be exercised
//! without a terminal; logging goes through `tracing`.

use std::io::Write;

use nbu_qr::{DEFAULT_BASE_URL, FormatError, PaymentFieldSet, PaymentQr, QrError, decode_url};
use serde::Serialize;

use crate::cli::{Cli, Command, PaymentArgs};
use crate::config::{ConfigError, PaymentConfig};

/// Errors that abort a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The payment file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Encoding failed.
    #[error(transparent)]
    Qr(#[from] QrError),
    /// Decoding failed.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// JSON output failed.
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a command that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command succeeded.
    Success,
    /// The payment has violations.
    Invalid,
}

#[derive(Debug, Serialize)]
struct ViolationReport {
    code: &'static str,
    message: String,
}

/// Runs the parsed command line, writing results to `out`.
///
/// # Errors
///
/// Returns [`CommandError`] if the payment cannot be loaded, encoded,
/// decoded or written.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<Outcome, CommandError> {
    match cli.command {
        Command::Validate { payment, json } => {
            let (fields, _) = load_payment(payment, cli.base_url)?;
            validate(&fields, json, out)
        }
        Command::Encode { payment } => {
            let (fields, base_url) = load_payment(payment, cli.base_url)?;
            encode(fields, &base_url, out)
        }
        Command::Decode { url } => {
            let base_url = cli.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
            decode(&url, &base_url, out)
        }
    }
}

/// Loads the payment file and applies command-line overrides.
///
/// `base_url` comes from `--base-url` or `NBU_QR_BASE_URL` and wins over the
/// file.
fn load_payment(
    args: PaymentArgs,
    base_url: Option<String>,
) -> Result<(PaymentFieldSet, String), ConfigError> {
    let mut config = PaymentConfig::load(args.config.as_deref())?;
    args.apply(&mut config.payment);
    let base_url = base_url.unwrap_or(config.base_url);
    Ok((config.payment, base_url))
}

fn validate<W: Write>(
    fields: &PaymentFieldSet,
    json: bool,
    out: &mut W,
) -> Result<Outcome, CommandError> {
    let violations = nbu_qr::validate(fields);

    if json {
        let reports: Vec<_> = violations
            .iter()
            .map(|v| ViolationReport {
                code: v.code(),
                message: v.to_string(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    } else if violations.is_empty() {
        writeln!(out, "OK")?;
    } else {
        for violation in &violations {
            writeln!(out, "{violation}")?;
        }
    }

    if violations.is_empty() {
        Ok(Outcome::Success)
    } else {
        tracing::info!(count = violations.len(), "Payment has violations");
        Ok(Outcome::Invalid)
    }
}

fn encode<W: Write>(
    fields: PaymentFieldSet,
    base_url: &str,
    out: &mut W,
) -> Result<Outcome, CommandError> {
    let qr = PaymentQr::with_base_url(fields, base_url);
    for violation in qr.errors() {
        tracing::warn!(code = violation.code(), "{violation}");
    }

    let url = qr.generate_url()?;
    tracing::info!(length = url.len(), base_url = qr.base_url(), "Generated payment URL");
    writeln!(out, "{url}")?;
    Ok(Outcome::Success)
}

fn decode<W: Write>(url: &str, base_url: &str, out: &mut W) -> Result<Outcome, CommandError> {
    let record = decode_url(url, base_url)?;
    serde_json::to_writer_pretty(&mut *out, &record)?;
    writeln!(out)?;
    Ok(Outcome::Success)
}
