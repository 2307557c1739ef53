//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use nbu_qr::{Encoding, Function, PaymentFieldSet};
use rust_decimal::Decimal;

/// Encode and decode NBU payment QR links.
#[derive(Debug, Parser)]
#[command(name = "nbu-qr", version, about)]
pub struct Cli {
    /// Base URL of the payment links.
    #[arg(long, env = "NBU_QR_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a payment and list every violation.
    Validate {
        #[command(flatten)]
        payment: PaymentArgs,
        /// Print violations as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the payment URL.
    Encode {
        #[command(flatten)]
        payment: PaymentArgs,
    },
    /// Print the fields of a payment URL as JSON.
    Decode {
        /// Payment URL.
        url: String,
    },
}

/// A payment file plus per-field overrides.
#[derive(Debug, Default, Args)]
pub struct PaymentArgs {
    /// Payment TOML file.
    #[arg(short, long, env = "NBU_QR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Function code (UCT, ICT or XCT).
    #[arg(long)]
    pub function: Option<Function>,

    /// Encoding flag (1 = UTF-8, 2 = Windows-1251).
    #[arg(long)]
    pub encoding: Option<Encoding>,

    /// Recipient name.
    #[arg(long)]
    pub recipient: Option<String>,

    /// Recipient IBAN.
    #[arg(long)]
    pub account: Option<String>,

    /// Amount in UAH.
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Recipient tax code.
    #[arg(long)]
    pub recipient_code: Option<String>,

    /// Purpose category.
    #[arg(long)]
    pub category: Option<String>,

    /// Payment reference.
    #[arg(long)]
    pub reference: Option<String>,

    /// Purpose of the payment.
    #[arg(long)]
    pub purpose: Option<String>,

    /// Text displayed to the payer.
    #[arg(long)]
    pub display: Option<String>,

    /// Lock mask, four uppercase hex digits.
    #[arg(long)]
    pub lock_mask: Option<String>,

    /// End of validity, e.g. `2025-09-30T23:59:00`.
    #[arg(long)]
    pub valid_until: Option<NaiveDateTime>,

    /// Creation time, e.g. `2025-09-21T12:30:00`.
    #[arg(long)]
    pub created_at: Option<NaiveDateTime>,
}

impl PaymentArgs {
    /// Applies every given override on top of `fields`.
    pub fn apply(self, fields: &mut PaymentFieldSet) {
        if let Some(function) = self.function {
            fields.function = function.as_str().to_owned();
        }
        if let Some(encoding) = self.encoding {
            fields.encoding = encoding.as_str().to_owned();
        }
        let texts = [
            (self.recipient, &mut fields.recipient),
            (self.account, &mut fields.account),
            (self.recipient_code, &mut fields.recipient_code),
            (self.category, &mut fields.category),
            (self.reference, &mut fields.reference),
            (self.purpose, &mut fields.purpose),
            (self.display, &mut fields.display),
            (self.lock_mask, &mut fields.lock_mask),
        ];
        for (value, slot) in texts {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if self.amount.is_some() {
            fields.amount = self.amount;
        }
        if self.valid_until.is_some() {
            fields.valid_until = self.valid_until;
        }
        if self.created_at.is_some() {
            fields.created_at = self.created_at;
        }
    }
}
