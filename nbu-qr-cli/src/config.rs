//! Payment description file.
//!
//! Loads a payment from a TOML file with support for environment variable
//! expansion in string values. Variables use `$VAR` or `${VAR}` syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! base_url = "https://qr.bank.gov.ua/"
//!
//! [payment]
//! function = "ICT"
//! encoding = "1"
//! recipient = "ТОВ \"Ромашка\""
//! account = "$SHOP_IBAN"
//! amount = "1250.00"
//! recipient_code = "12345678"
//! purpose = "Оплата замовлення ${ORDER_ID}"
//! valid_until = "2025-09-30T23:59:00"
//! ```
//!
//! # Environment Variables
//!
//! Any variable referenced by `$VAR` in a string value is substituted after
//! the file is parsed. Keys, comments and non-string values are left as
//! written.

use std::path::Path;

use nbu_qr::{DEFAULT_BASE_URL, PaymentFieldSet};
use serde::{Deserialize, Serialize};

/// Default payment file name.
pub const DEFAULT_CONFIG_PATH: &str = "payment.toml";

/// Errors raised while loading a payment file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but cannot be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for a payment.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// Path of the file.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Top-level payment file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Base URL of the payment links (default: `https://qr.bank.gov.ua/`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// The payment itself. Missing keys take the standard defaults.
    #[serde(default)]
    pub payment: PaymentFieldSet,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            payment: PaymentFieldSet::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl PaymentConfig {
    /// Loads the payment from `path`, falling back to `payment.toml` in the
    /// current directory.
    ///
    /// A missing file yields the defaults so that a payment can be described
    /// entirely on the command line. Environment overrides (`NBU_QR_CONFIG`,
    /// `NBU_QR_BASE_URL`) are resolved by the argument parser, not here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map_or_else(
            || DEFAULT_CONFIG_PATH.to_owned(),
            |p| p.display().to_string(),
        );
        Self::load_from(&path)
    }

    /// Loads the payment from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let content = if Path::new(path).exists() {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?
        } else {
            tracing::debug!(path, "Payment file not found, using defaults");
            String::new()
        };

        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Parses payment TOML, then expands environment variables inside its
    /// string values.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is not a valid payment.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        Self::parse_with(content, &|name| std::env::var(name).ok())
    }

    fn parse_with(
        content: &str,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self, toml::de::Error> {
        let mut value: toml::Value = toml::from_str(content)?;
        expand_strings(&mut value, lookup);
        value.try_into()
    }
}

/// Expands variables in every string of a parsed document.
///
/// Expansion happens after parsing, so substituted values may contain quotes
/// or line breaks without breaking the TOML syntax.
fn expand_strings(value: &mut toml::Value, lookup: &dyn Fn(&str) -> Option<String>) {
    match value {
        toml::Value::String(text) => *text = expand_env_vars(text, lookup),
        toml::Value::Array(items) => {
            for item in items {
                expand_strings(item, lookup);
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                expand_strings(item, lookup);
            }
        }
        _ => {}
    }
}

/// Expands `$VAR` and `${VAR}` patterns in a string.
///
/// Unresolved variables are left as-is.
fn expand_env_vars(input: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut name = String::new();
        let mut closed = false;
        while let Some(&c) = chars.peek() {
            if braced && c == '}' {
                chars.next();
                closed = true;
                break;
            }
            if !braced && !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            name.push(c);
            chars.next();
        }

        let value = if name.is_empty() { None } else { lookup(&name) };

        match value {
            Some(value) => result.push_str(&value),
            None => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&name);
                if closed {
                    result.push('}');
                }
            }
        }
    }

    result
}
