#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Encoder and decoder for NBU payment QR links (format version `003`).
//!
//! The National Bank of Ukraine standard describes a payment instruction as
//! a fixed sequence of 17 newline-delimited text fields. The sequence is
//! encoded with URL-safe base64 and appended to a base URL
//! (`https://qr.bank.gov.ua/` by default). A banking application scanning
//! the resulting QR code reconstructs the payment from the URL alone.
//!
//! # Overview
//!
//! A [`PaymentFieldSet`] describes one payment. [`validate`] checks it
//! against the syntax rules of the standard and reports every violation at
//! once. [`encode_url`] refuses invalid field sets, otherwise serializes and
//! encodes them; [`decode_url`] reverses the process into a positional
//! [`PaymentRecord`].
//!
//! ```rust
//! use nbu_qr::{DEFAULT_BASE_URL, PaymentFieldSet, decode_url, encode_url};
//! use rust_decimal::Decimal;
//!
//! let fields = PaymentFieldSet::default()
//!     .with_recipient("ТОВ \"Тестова компанія\"")
//!     .with_account("UA12 3456 7890 1234 5678 9012 3456 7")
//!     .with_amount(Decimal::new(10050, 2))
//!     .with_recipient_code("12345678")
//!     .with_purpose("Оплата замовлення 42");
//!
//! let url = encode_url(&fields, DEFAULT_BASE_URL).unwrap();
//! let record = decode_url(&url, DEFAULT_BASE_URL).unwrap();
//! assert_eq!(record.amount, "UAH100.5");
//! assert_eq!(record, fields.canonical());
//! ```
//!
//! # Modules
//!
//! - [`fields`] - The payment field set and its enumerations
//! - [`validate`] - Syntax rules and violation reporting
//! - [`proto`] - Wire record, field formatting and base64 transport
//! - [`codec`] - URL encoding and decoding
//! - [`generator`] - Stateful generator caching its validation result
//! - [`render`] - Boundary towards external QR image renderers
//! - [`error`] - Error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod codec;
pub mod error;
pub mod fields;
pub mod generator;
pub mod proto;
pub mod render;
pub mod validate;

pub use codec::{build_canonical_text, decode_url, encode_url, normalize_base_url};
pub use error::{FormatError, QrError, RenderError, SizeError, ValidationError};
pub use fields::{Encoding, Function, PaymentFieldSet};
pub use generator::PaymentQr;
pub use proto::{DEFAULT_BASE_URL, FORMAT_VERSION, MAX_URL_LEN, PaymentRecord, SERVICE_TAG};
pub use render::{QrRenderer, RenderOptions, Rendered};
pub use validate::{Violation, validate};
