//! Syntax rules of the payment field set.
//!
//! Every rule is evaluated independently so that all problems surface in a
//! single pass. Invalid input is the expected case here, so [`validate`]
//! returns data instead of an error.
//!
//! Length limits count characters for free-text fields and bytes for the
//! account number, matching the reference generator.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fields::{CURRENCY_UAH, Encoding, Function, PaymentFieldSet};

/// Maximum recipient name length, in characters.
pub const MAX_RECIPIENT_LEN: usize = 140;
/// Exact account length after whitespace removal, in bytes.
pub const ACCOUNT_LEN: usize = 29;
/// Maximum recipient code length, in characters.
pub const MAX_RECIPIENT_CODE_LEN: usize = 10;
/// Maximum category length, in characters.
pub const MAX_CATEGORY_LEN: usize = 9;
/// Maximum reference length, in characters.
pub const MAX_REFERENCE_LEN: usize = 35;
/// Maximum purpose length, in characters.
pub const MAX_PURPOSE_LEN: usize = 420;
/// Maximum display text length, in characters.
pub const MAX_DISPLAY_LEN: usize = 140;

/// Largest amount the standard can carry: `999999999.99`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_215_752_191, 23, 0, false, 2);

static UA_IBAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^UA[0-9]{27}$").expect("static IBAN pattern is valid")
});

static LOCK_MASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-F]{4}$").expect("static lock mask pattern is valid")
});

/// A single failed rule.
///
/// [`Display`](std::fmt::Display) yields the human-readable message;
/// [`Violation::code`] yields a stable machine identifier, which is also the
/// serialized form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Violation {
    /// Function code is not UCT, ICT or XCT.
    #[error("Invalid function")]
    InvalidFunction,
    /// Encoding flag is not `1` or `2`.
    #[error("Invalid encoding")]
    InvalidEncoding,
    /// Recipient name is empty.
    #[error("Recipient is required")]
    RecipientRequired,
    /// Recipient name is longer than 140 characters.
    #[error("Recipient name too long (max 140 characters)")]
    RecipientTooLong,
    /// Account is empty.
    #[error("Account is required")]
    AccountRequired,
    /// Account is not 29 characters once whitespace is removed.
    #[error("Account must be exactly 29 characters")]
    AccountLength,
    /// Account is not `UA` followed by 27 digits.
    #[error("Invalid Ukrainian IBAN format")]
    InvalidIban,
    /// Amount is negative or above the maximum.
    #[error("Amount must be between 0 and 999999999.99")]
    AmountOutOfRange,
    /// An amount is given in a currency other than UAH.
    #[error("Only UAH currency is supported")]
    UnsupportedCurrency,
    /// Recipient code is empty.
    #[error("Recipient code is required")]
    RecipientCodeRequired,
    /// Recipient code is longer than 10 characters.
    #[error("Recipient code too long (max 10 characters)")]
    RecipientCodeTooLong,
    /// Category is longer than 9 characters.
    #[error("Category too long (max 9 characters)")]
    CategoryTooLong,
    /// Reference is longer than 35 characters.
    #[error("Reference too long (max 35 characters)")]
    ReferenceTooLong,
    /// Purpose is empty.
    #[error("Purpose is required")]
    PurposeRequired,
    /// Purpose is longer than 420 characters.
    #[error("Purpose too long (max 420 characters)")]
    PurposeTooLong,
    /// Display text is longer than 140 characters.
    #[error("Display text too long (max 140 characters)")]
    DisplayTooLong,
    /// Lock mask is not four uppercase hex digits.
    #[error("Lock mask must be 4 hex characters")]
    InvalidLockMask,
    /// A free-text field contains a line break, which would shift every
    /// later payload slot.
    #[error("Text fields must not contain line breaks")]
    LineBreak,
}

impl Violation {
    /// Returns the `snake_case` identifier matching the serialized form.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidFunction => "invalid_function",
            Self::InvalidEncoding => "invalid_encoding",
            Self::RecipientRequired => "recipient_required",
            Self::RecipientTooLong => "recipient_too_long",
            Self::AccountRequired => "account_required",
            Self::AccountLength => "account_length",
            Self::InvalidIban => "invalid_iban",
            Self::AmountOutOfRange => "amount_out_of_range",
            Self::UnsupportedCurrency => "unsupported_currency",
            Self::RecipientCodeRequired => "recipient_code_required",
            Self::RecipientCodeTooLong => "recipient_code_too_long",
            Self::CategoryTooLong => "category_too_long",
            Self::ReferenceTooLong => "reference_too_long",
            Self::PurposeRequired => "purpose_required",
            Self::PurposeTooLong => "purpose_too_long",
            Self::DisplayTooLong => "display_too_long",
            Self::InvalidLockMask => "invalid_lock_mask",
            Self::LineBreak => "line_break",
        }
    }
}

/// Checks a field set against every rule and returns the failures in rule
/// order. An empty list means the field set can be encoded.
#[must_use]
pub fn validate(fields: &PaymentFieldSet) -> Vec<Violation> {
    let mut violations = Vec::new();

    if fields.function.parse::<Function>().is_err() {
        violations.push(Violation::InvalidFunction);
    }
    if fields.encoding.parse::<Encoding>().is_err() {
        violations.push(Violation::InvalidEncoding);
    }

    check_required(
        &fields.recipient,
        MAX_RECIPIENT_LEN,
        Violation::RecipientRequired,
        Violation::RecipientTooLong,
        &mut violations,
    );

    if fields.account.is_empty() {
        violations.push(Violation::AccountRequired);
    } else {
        let account = fields.stripped_account();
        if account.len() != ACCOUNT_LEN {
            violations.push(Violation::AccountLength);
        } else if !UA_IBAN.is_match(&account) {
            violations.push(Violation::InvalidIban);
        }
    }

    if let Some(amount) = fields.amount {
        if amount < Decimal::ZERO || amount > MAX_AMOUNT {
            violations.push(Violation::AmountOutOfRange);
        }
        if fields.currency != CURRENCY_UAH {
            violations.push(Violation::UnsupportedCurrency);
        }
    }

    check_required(
        &fields.recipient_code,
        MAX_RECIPIENT_CODE_LEN,
        Violation::RecipientCodeRequired,
        Violation::RecipientCodeTooLong,
        &mut violations,
    );

    check_optional(
        &fields.category,
        MAX_CATEGORY_LEN,
        Violation::CategoryTooLong,
        &mut violations,
    );
    check_optional(
        &fields.reference,
        MAX_REFERENCE_LEN,
        Violation::ReferenceTooLong,
        &mut violations,
    );

    check_required(
        &fields.purpose,
        MAX_PURPOSE_LEN,
        Violation::PurposeRequired,
        Violation::PurposeTooLong,
        &mut violations,
    );

    check_optional(
        &fields.display,
        MAX_DISPLAY_LEN,
        Violation::DisplayTooLong,
        &mut violations,
    );

    if !fields.lock_mask.is_empty() && !LOCK_MASK.is_match(&fields.lock_mask) {
        violations.push(Violation::InvalidLockMask);
    }

    let texts = [
        &fields.recipient,
        &fields.recipient_code,
        &fields.category,
        &fields.reference,
        &fields.purpose,
        &fields.display,
    ];
    if texts.iter().any(|text| text.contains(['\n', '\r'])) {
        violations.push(Violation::LineBreak);
    }

    violations
}

fn check_required(
    value: &str,
    max_chars: usize,
    missing: Violation,
    too_long: Violation,
    violations: &mut Vec<Violation>,
) {
    if value.is_empty() {
        violations.push(missing);
    } else if value.chars().count() > max_chars {
        violations.push(too_long);
    }
}

fn check_optional(
    value: &str,
    max_chars: usize,
    too_long: Violation,
    violations: &mut Vec<Violation>,
) {
    if value.chars().count() > max_chars {
        violations.push(too_long);
    }
}
