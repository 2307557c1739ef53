//! Encoding payment field sets into URLs and back.
//!
//! ```text
//! PaymentFieldSet --validate--> canonical text --base64url--> base URL + payload
//! ```
//!
//! Decoding runs the pipeline in reverse and stops at [`PaymentRecord`]; it
//! does not re-apply the validation rules.

use crate::error::{FormatError, QrError, SizeError, ValidationError};
use crate::fields::PaymentFieldSet;
use crate::proto::{Base64Url, MAX_URL_LEN, PaymentRecord};
use crate::validate::validate;

/// Normalizes a base URL to end with exactly one `/`.
#[must_use]
pub fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// Builds the newline-delimited payload text of a field set.
///
/// The field set is not validated; see [`encode_url`].
#[must_use]
pub fn build_canonical_text(fields: &PaymentFieldSet) -> String {
    fields.canonical().to_wire()
}

/// Encodes a field set as a payment URL under `base_url`.
///
/// # Errors
///
/// Returns [`QrError::Validation`] listing every violation if the field set
/// is invalid, or [`QrError::Size`] if the URL exceeds [`MAX_URL_LEN`] bytes.
pub fn encode_url(fields: &PaymentFieldSet, base_url: &str) -> Result<String, QrError> {
    let violations = validate(fields);
    if !violations.is_empty() {
        return Err(ValidationError::new(violations).into());
    }
    assemble_url(fields, base_url)
}

/// Encodes a field set already known to be valid.
pub(crate) fn assemble_url(fields: &PaymentFieldSet, base_url: &str) -> Result<String, QrError> {
    let payload = Base64Url::encode(build_canonical_text(fields));
    let url = format!("{}{payload}", normalize_base_url(base_url));

    #[cfg(feature = "telemetry")]
    tracing::debug!(length = url.len(), max = MAX_URL_LEN, "Encoded payment URL");

    if url.len() > MAX_URL_LEN {
        return Err(SizeError {
            length: url.len(),
            max: MAX_URL_LEN,
        }
        .into());
    }
    Ok(url)
}

/// Decodes a payment URL produced under `base_url`.
///
/// # Errors
///
/// Returns [`FormatError::InvalidUrl`] if `url` does not start with the
/// normalized base URL, [`FormatError::InvalidPayload`] if the payload is not
/// URL-safe base64 over UTF-8 text, and [`FormatError::InvalidStructure`] if
/// it holds fewer than 17 slots.
pub fn decode_url(url: &str, base_url: &str) -> Result<PaymentRecord, FormatError> {
    let base_url = normalize_base_url(base_url);
    let payload = url
        .strip_prefix(base_url.as_str())
        .ok_or(FormatError::InvalidUrl)?;

    let bytes = Base64Url::from(payload).decode()?;
    let text = String::from_utf8(bytes)?;
    let record = PaymentRecord::from_wire(&text)?;

    #[cfg(feature = "telemetry")]
    tracing::debug!(function = %record.function, "Decoded payment URL");

    Ok(record)
}
