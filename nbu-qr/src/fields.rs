//! The payment field set and its enumerations.
//!
//! [`PaymentFieldSet`] is the in-memory, named form of a payment instruction.
//! It is deliberately permissive: any text can be stored in any field, and
//! [`crate::validate`] decides whether the result is acceptable. This keeps
//! invalid input representable as data instead of failing at construction.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::proto::{self, PaymentRecord};

/// Currency code accepted by the standard.
pub const CURRENCY_UAH: &str = "UAH";

/// Credit transfer function code.
///
/// Serialized as the three-letter code used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    /// Urgent credit transfer.
    #[serde(rename = "UCT")]
    Uct,
    /// Instant credit transfer.
    #[serde(rename = "ICT")]
    Ict,
    /// Any credit transfer the payer's bank chooses.
    #[serde(rename = "XCT")]
    Xct,
}

impl Function {
    /// All function codes in wire order.
    pub const ALL: [Self; 3] = [Self::Uct, Self::Ict, Self::Xct];

    /// Returns the wire representation (`"UCT"`, `"ICT"` or `"XCT"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uct => "UCT",
            Self::Ict => "ICT",
            Self::Xct => "XCT",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown function code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown function code {0}")]
pub struct UnknownFunction(String);

impl FromStr for Function {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.as_str() == s)
            .ok_or_else(|| UnknownFunction(s.into()))
    }
}

/// Character encoding flag carried in the payload.
///
/// The flag only tells the reading application how to interpret the text;
/// the encoder itself always emits UTF-8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// UTF-8, wire value `"1"`.
    #[serde(rename = "1")]
    Utf8,
    /// Windows-1251, wire value `"2"`.
    #[serde(rename = "2")]
    Win1251,
}

impl Encoding {
    /// All encodings in wire order.
    pub const ALL: [Self; 2] = [Self::Utf8, Self::Win1251];

    /// Returns the wire representation (`"1"` or `"2"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "1",
            Self::Win1251 => "2",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown encoding flag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown encoding flag {0}")]
pub struct UnknownEncoding(String);

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.as_str() == s)
            .ok_or_else(|| UnknownEncoding(s.into()))
    }
}

/// A single payment instruction.
///
/// `function` and `encoding` hold the raw supplied text so that unknown
/// codes can be reported by the validator; use [`Self::with_function`] and
/// [`Self::with_encoding`] to set them from the typed enums.
///
/// Missing keys fall back to [`Default`] when deserializing, which matches
/// the defaults of the standard's reference generator: function `ICT`,
/// encoding `2` and currency `UAH`.
///
/// # Example
///
/// ```toml
/// recipient = "ФОП Петренко"
/// account = "UA123456789012345678901234567"
/// amount = "250.00"
/// recipient_code = "1234567890"
/// purpose = "Оплата рахунку 17"
/// valid_until = "2025-09-30T23:59:00"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentFieldSet {
    /// Credit transfer function code.
    pub function: String,
    /// Encoding flag (`"1"` or `"2"`).
    pub encoding: String,
    /// Recipient name.
    pub recipient: String,
    /// Recipient IBAN, whitespace allowed.
    pub account: String,
    /// Amount in currency units, absent for an open amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Currency code of the amount.
    pub currency: String,
    /// Recipient tax code (EDRPOU / RNOKPP).
    pub recipient_code: String,
    /// Purpose category code.
    pub category: String,
    /// Payment reference.
    pub reference: String,
    /// Purpose of the payment.
    pub purpose: String,
    /// Text displayed to the payer.
    pub display: String,
    /// Mask of fields the payer may not edit, four uppercase hex digits.
    pub lock_mask: String,
    /// End of the validity window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDateTime>,
    /// Moment the instruction was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Default for PaymentFieldSet {
    fn default() -> Self {
        Self {
            function: Function::Ict.as_str().to_owned(),
            encoding: Encoding::Win1251.as_str().to_owned(),
            recipient: String::new(),
            account: String::new(),
            amount: None,
            currency: CURRENCY_UAH.to_owned(),
            recipient_code: String::new(),
            category: String::new(),
            reference: String::new(),
            purpose: String::new(),
            display: String::new(),
            lock_mask: String::new(),
            valid_until: None,
            created_at: None,
        }
    }
}

impl PaymentFieldSet {
    /// Sets the function code.
    #[must_use]
    pub fn with_function(mut self, function: Function) -> Self {
        self.function = function.as_str().to_owned();
        self
    }

    /// Sets the encoding flag.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding.as_str().to_owned();
        self
    }

    /// Sets the recipient name.
    #[must_use]
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    /// Sets the recipient account.
    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    /// Sets the amount.
    #[must_use]
    pub const fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the currency code.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Sets the recipient tax code.
    #[must_use]
    pub fn with_recipient_code(mut self, code: impl Into<String>) -> Self {
        self.recipient_code = code.into();
        self
    }

    /// Sets the purpose category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the payment reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Sets the purpose of the payment.
    #[must_use]
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Sets the display text.
    #[must_use]
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    /// Sets the lock mask.
    #[must_use]
    pub fn with_lock_mask(mut self, lock_mask: impl Into<String>) -> Self {
        self.lock_mask = lock_mask.into();
        self
    }

    /// Sets the end of the validity window.
    #[must_use]
    pub const fn with_valid_until(mut self, valid_until: NaiveDateTime) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    /// Sets the creation time.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Returns the account with all ASCII whitespace removed.
    #[must_use]
    pub fn stripped_account(&self) -> String {
        self.account
            .chars()
            .filter(|c| !is_account_whitespace(*c))
            .collect()
    }

    /// Returns the positional 17-field view used on the wire.
    ///
    /// Reserved slots (unique id and signature) are always empty.
    #[must_use]
    pub fn canonical(&self) -> PaymentRecord {
        PaymentRecord {
            service_tag: proto::SERVICE_TAG.to_owned(),
            version: proto::FORMAT_VERSION.to_owned(),
            encoding: self.encoding.clone(),
            function: self.function.clone(),
            unique_id: String::new(),
            recipient: self.recipient.clone(),
            account: self.stripped_account(),
            amount: proto::format_amount(self.amount, &self.currency),
            recipient_code: self.recipient_code.clone(),
            category: self.category.clone(),
            reference: self.reference.clone(),
            purpose: self.purpose.clone(),
            display: self.display.clone(),
            lock_mask: self.lock_mask.clone(),
            valid_until: proto::format_timestamp(self.valid_until),
            created_at: proto::format_timestamp(self.created_at),
            signature: String::new(),
        }
    }
}

/// Whitespace removed from account numbers: space, tab, LF, VT, FF and CR.
const fn is_account_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
