//! Error types for encoding and decoding payment URLs.
//!
//! Validation itself never fails: it returns a list of
//! [`Violation`]s. Only the encode and decode boundaries return errors,
//! collected under [`QrError`].

use std::fmt;

use crate::validate::Violation;

/// Base error type for payment URL operations.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    /// The field set has outstanding violations.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The encoded URL is longer than the standard allows.
    #[error("{0}")]
    Size(#[from] SizeError),

    /// The URL or its payload is malformed.
    #[error("{0}")]
    Format(#[from] FormatError),

    /// The external renderer failed.
    #[error("{0}")]
    Render(#[from] RenderError),
}

/// URL generation refused because the field set is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Every outstanding violation, in validation order.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub const fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation failed: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The encoded URL exceeds the maximum QR payload size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("QR data size exceeds maximum allowed ({length} > {max})")]
pub struct SizeError {
    /// Length of the produced URL in bytes.
    pub length: usize,
    /// Maximum allowed length.
    pub max: usize,
}

/// A URL could not be decoded into a payment record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The URL does not start with the configured base URL.
    #[error("Invalid QR URL format")]
    InvalidUrl,
    /// The payload holds fewer than 17 slots.
    #[error("Invalid QR data structure")]
    InvalidStructure,
    /// The payload is not valid base64 or not valid UTF-8.
    #[error("Invalid QR payload: {0}")]
    InvalidPayload(String),
}

impl From<base64::DecodeError> for FormatError {
    fn from(value: base64::DecodeError) -> Self {
        Self::InvalidPayload(value.to_string())
    }
}

impl From<std::string::FromUtf8Error> for FormatError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        Self::InvalidPayload(value.to_string())
    }
}

/// An external renderer failed to produce an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("QR rendering failed: {0}")]
pub struct RenderError(pub String);

impl RenderError {
    /// Creates a new render error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
