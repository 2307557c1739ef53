//! Round-trip behaviour of payment URLs across the public API.

use chrono::NaiveDate;
use nbu_qr::{
    DEFAULT_BASE_URL, Encoding, Function, MAX_URL_LEN, PaymentFieldSet, PaymentQr, QrError,
    Violation, decode_url, encode_url, validate,
};
use rust_decimal::Decimal;

fn base_fields() -> PaymentFieldSet {
    PaymentFieldSet::default()
        .with_recipient("ТОВ \"Тестова компанія\"")
        .with_account("UA123456789012345678901234567")
        .with_recipient_code("12345678")
        .with_purpose("Тестовий платіж")
}

fn variants() -> Vec<PaymentFieldSet> {
    let ts = NaiveDate::from_ymd_opt(2025, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .unwrap();

    let mut all = vec![base_fields()];
    for function in Function::ALL {
        for encoding in Encoding::ALL {
            all.push(
                base_fields()
                    .with_function(function)
                    .with_encoding(encoding),
            );
        }
    }
    all.push(base_fields().with_amount(Decimal::ZERO));
    all.push(base_fields().with_amount(Decimal::new(99_999_999_999, 2)));
    all.push(
        base_fields()
            .with_account("UA12 3456 7890 1234 5678 9012 3456 7")
            .with_amount(Decimal::new(1, 2))
            .with_category("MP2B/GSCB")
            .with_reference("INV-2025-0001")
            .with_display("Замовлення №42")
            .with_lock_mask("FFFF")
            .with_valid_until(ts)
            .with_created_at(ts),
    );
    all.push(base_fields().with_purpose("Multi word purpose: with / slashes + plus"));
    all
}

#[test]
fn test_valid_field_sets_roundtrip() {
    for fields in variants() {
        assert!(validate(&fields).is_empty(), "{fields:?}");

        let url = encode_url(&fields, DEFAULT_BASE_URL).unwrap();
        assert!(url.starts_with(DEFAULT_BASE_URL));
        assert!(url.len() <= MAX_URL_LEN);

        let record = decode_url(&url, DEFAULT_BASE_URL).unwrap();
        assert_eq!(record, fields.canonical());
        assert!(record.unique_id.is_empty());
        assert!(record.signature.is_empty());
    }
}

#[test]
fn test_amount_formatting_through_url() {
    let cases = [
        (Decimal::new(100, 0), "UAH100"),
        (Decimal::new(1005, 1), "UAH100.5"),
        (Decimal::new(10050, 2), "UAH100.5"),
        (Decimal::new(10099, 2), "UAH100.99"),
        (Decimal::ZERO, "UAH0"),
    ];
    for (amount, expected) in cases {
        let qr = PaymentQr::new(base_fields().with_amount(amount));
        let url = qr.generate_url().unwrap();
        let record = qr.parse_url(&url).unwrap();
        assert_eq!(record.amount, expected, "amount {amount}");
    }
}

#[test]
fn test_timestamps_through_url() {
    let ts = NaiveDate::from_ymd_opt(2025, 9, 21)
        .and_then(|d| d.and_hms_opt(12, 30, 45))
        .unwrap();
    let fields = base_fields().with_valid_until(ts).with_created_at(ts);
    let url = encode_url(&fields, DEFAULT_BASE_URL).unwrap();
    let record = decode_url(&url, DEFAULT_BASE_URL).unwrap();
    assert_eq!(record.valid_until, "250921123000");
    assert_eq!(record.created_at, "250921123000");
}

#[test]
fn test_decoded_record_is_not_revalidated() {
    let url = encode_url(&base_fields(), DEFAULT_BASE_URL).unwrap();
    let record = decode_url(&url, DEFAULT_BASE_URL).unwrap();
    assert_eq!(record.amount, "");
    assert_eq!(record.valid_until, "");
}

#[test]
fn test_missing_required_fields_block_encoding() {
    let fields = PaymentFieldSet::default();
    let err = encode_url(&fields, DEFAULT_BASE_URL).unwrap_err();
    let QrError::Validation(err) = err else {
        panic!("expected validation error");
    };
    assert_eq!(
        err.violations,
        vec![
            Violation::RecipientRequired,
            Violation::AccountRequired,
            Violation::RecipientCodeRequired,
            Violation::PurposeRequired,
        ]
    );
    assert_eq!(
        err.to_string(),
        "Validation failed: Recipient is required, Account is required, \
         Recipient code is required, Purpose is required"
    );
}

#[test]
fn test_line_break_cannot_shift_slots() {
    let fields = base_fields()
        .with_recipient("ТОВ\nРомашка")
        .with_amount(Decimal::new(125_000, 2));
    assert_eq!(validate(&fields), vec![Violation::LineBreak]);

    let err = encode_url(&fields, DEFAULT_BASE_URL).unwrap_err();
    let QrError::Validation(err) = err else {
        panic!("expected validation error");
    };
    assert_eq!(
        err.to_string(),
        "Validation failed: Text fields must not contain line breaks"
    );

    let qr = PaymentQr::new(fields);
    assert!(!qr.is_valid());
    assert!(qr.generate_url().is_err());
}

#[test]
fn test_record_serializes_to_json() {
    let url = encode_url(&base_fields(), DEFAULT_BASE_URL).unwrap();
    let record = decode_url(&url, DEFAULT_BASE_URL).unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["service_tag"], "BCD");
    assert_eq!(json["recipient_code"], "12345678");
    assert_eq!(json.as_object().unwrap().len(), 17);
}
