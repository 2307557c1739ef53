//! Wire format of the NBU payment payload.
//!
//! The payload is a newline-joined sequence of exactly [`FIELD_COUNT`] text
//! slots in a fixed order. [`PaymentRecord`] names each slot; its
//! [`to_wire`](PaymentRecord::to_wire) and
//! [`from_wire`](PaymentRecord::from_wire) methods are the only place where
//! the positional layout is known.

pub mod encoding;

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

pub use encoding::Base64Url;

/// Service tag opening every payload.
pub const SERVICE_TAG: &str = "BCD";

/// Payload format version.
pub const FORMAT_VERSION: &str = "003";

/// Base URL used when the caller does not provide one.
pub const DEFAULT_BASE_URL: &str = "https://qr.bank.gov.ua/";

/// Maximum length, in bytes, of an encoded payment URL.
pub const MAX_URL_LEN: usize = 507;

/// Number of slots in a payload.
pub const FIELD_COUNT: usize = 17;

/// Separator between payload slots.
pub const FIELD_SEPARATOR: &str = "\n";

/// The 17 payload slots, by name.
///
/// Produced either from a [`crate::PaymentFieldSet`] via
/// [`canonical`](crate::PaymentFieldSet::canonical) or from a decoded URL.
/// Values are kept exactly as they appear on the wire; no semantic checks
/// are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Service tag, `BCD`.
    pub service_tag: String,
    /// Format version, `003`.
    pub version: String,
    /// Encoding flag.
    pub encoding: String,
    /// Function code.
    pub function: String,
    /// Reserved unique identifier, always empty.
    pub unique_id: String,
    /// Recipient name.
    pub recipient: String,
    /// Account with whitespace removed.
    pub account: String,
    /// Currency-prefixed amount, or empty.
    pub amount: String,
    /// Recipient tax code.
    pub recipient_code: String,
    /// Purpose category.
    pub category: String,
    /// Payment reference.
    pub reference: String,
    /// Purpose of the payment.
    pub purpose: String,
    /// Display text.
    pub display: String,
    /// Lock mask.
    pub lock_mask: String,
    /// Compact end of validity, or empty.
    pub valid_until: String,
    /// Compact creation time, or empty.
    pub created_at: String,
    /// Reserved signature, always empty.
    pub signature: String,
}

impl PaymentRecord {
    /// Returns the slots in wire order.
    #[must_use]
    pub fn slots(&self) -> [&str; FIELD_COUNT] {
        [
            &self.service_tag,
            &self.version,
            &self.encoding,
            &self.function,
            &self.unique_id,
            &self.recipient,
            &self.account,
            &self.amount,
            &self.recipient_code,
            &self.category,
            &self.reference,
            &self.purpose,
            &self.display,
            &self.lock_mask,
            &self.valid_until,
            &self.created_at,
            &self.signature,
        ]
    }

    /// Joins the slots into the payload text.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.slots().join(FIELD_SEPARATOR)
    }

    /// Splits payload text into its slots.
    ///
    /// Slots beyond the 17th are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidStructure`] if the text holds fewer than
    /// 17 slots.
    pub fn from_wire(text: &str) -> Result<Self, FormatError> {
        if text.split(FIELD_SEPARATOR).count() < FIELD_COUNT {
            return Err(FormatError::InvalidStructure);
        }

        let mut slots = text.split(FIELD_SEPARATOR);
        let mut next = || slots.next().unwrap_or_default().to_owned();

        Ok(Self {
            service_tag: next(),
            version: next(),
            encoding: next(),
            function: next(),
            unique_id: next(),
            recipient: next(),
            account: next(),
            amount: next(),
            recipient_code: next(),
            category: next(),
            reference: next(),
            purpose: next(),
            display: next(),
            lock_mask: next(),
            valid_until: next(),
            created_at: next(),
            signature: next(),
        })
    }
}

/// Formats an amount as the currency code followed by the shortest decimal.
///
/// The amount is rounded to two fractional digits, then trailing zeros and
/// a dangling decimal point are dropped: `100.50` becomes `UAH100.5`, `0`
/// becomes `UAH0`. An absent amount yields an empty string.
#[must_use]
pub fn format_amount(amount: Option<Decimal>, currency: &str) -> String {
    let Some(amount) = amount else {
        return String::new();
    };

    let text = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_string();
    let digits = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        &text
    };

    format!("{currency}{digits}")
}

/// Formats a timestamp as `YYMMDDhhmm` followed by `00` seconds.
///
/// Seconds of the input are discarded. An absent timestamp yields an empty
/// string.
#[must_use]
pub fn format_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    timestamp.map_or_else(String::new, |ts| format!("{}00", ts.format("%y%m%d%H%M")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> PaymentRecord {
        PaymentRecord {
            service_tag: SERVICE_TAG.into(),
            version: FORMAT_VERSION.into(),
            encoding: "1".into(),
            function: "UCT".into(),
            recipient: "Recipient".into(),
            account: "UA123456789012345678901234567".into(),
            amount: "UAH1".into(),
            recipient_code: "12345678".into(),
            purpose: "Purpose".into(),
            ..PaymentRecord::default()
        }
    }

    #[test]
    fn test_to_wire_has_seventeen_slots() {
        let wire = record().to_wire();
        assert_eq!(wire.split('\n').count(), FIELD_COUNT);
        assert!(wire.starts_with("BCD\n003\n1\nUCT\n\nRecipient\n"));
        assert!(wire.ends_with("Purpose\n\n\n\n\n"));
    }

    #[test]
    fn test_from_wire_roundtrip() {
        let original = record();
        let parsed = PaymentRecord::from_wire(&original.to_wire()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_from_wire_too_few_slots() {
        let result = PaymentRecord::from_wire("BCD\n003\n1");
        assert!(matches!(result, Err(FormatError::InvalidStructure)));
    }

    #[test]
    fn test_from_wire_ignores_extra_slots() {
        let wire = format!("{}\nextra\nmore", record().to_wire());
        let parsed = PaymentRecord::from_wire(&wire).unwrap();
        assert_eq!(parsed, record());
    }

    #[test]
    fn test_format_amount_table() {
        let uah = |mantissa, scale| format_amount(Some(Decimal::new(mantissa, scale)), "UAH");
        assert_eq!(uah(100, 0), "UAH100");
        assert_eq!(uah(1005, 1), "UAH100.5");
        assert_eq!(uah(10050, 2), "UAH100.5");
        assert_eq!(uah(10099, 2), "UAH100.99");
        assert_eq!(uah(0, 0), "UAH0");
        assert_eq!(uah(0, 2), "UAH0");
        assert_eq!(uah(1000, 2), "UAH10");
        assert_eq!(uah(99_999_999_999, 2), "UAH999999999.99");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(Some(Decimal::new(10_005, 3)), "UAH"), "UAH10.01");
        assert_eq!(format_amount(Some(Decimal::new(10_004, 3)), "UAH"), "UAH10");
    }

    #[test]
    fn test_format_amount_absent() {
        assert_eq!(format_amount(None, "UAH"), "");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2025, 9, 21)
            .unwrap()
            .and_hms_opt(12, 30, 45)
            .unwrap();
        assert_eq!(format_timestamp(Some(ts)), "250921123000");
        assert_eq!(format_timestamp(None), "");
    }

    #[test]
    fn test_format_timestamp_pads_day() {
        let ts = NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(7, 3, 0)
            .unwrap();
        assert_eq!(format_timestamp(Some(ts)), "260105070300");
    }
}
