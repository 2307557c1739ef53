//! Stateful payment QR generator.
//!
//! [`PaymentQr`] keeps a field set together with its validation result. The
//! result is recomputed whenever the field set changes, so
//! [`PaymentQr::errors`] is always current and
//! [`PaymentQr::generate_url`] never validates twice.

use crate::codec::{assemble_url, decode_url, normalize_base_url};
use crate::error::{FormatError, QrError, ValidationError};
use crate::fields::PaymentFieldSet;
use crate::proto::{DEFAULT_BASE_URL, PaymentRecord};
use crate::render::{QrRenderer, RenderOptions, Rendered};
use crate::validate::{Violation, validate};

/// A payment field set bound to a base URL, with cached violations.
///
/// # Example
///
/// ```rust
/// use nbu_qr::{PaymentFieldSet, PaymentQr, Violation};
///
/// let mut qr = PaymentQr::new(PaymentFieldSet::default());
/// assert!(qr.errors().contains(&Violation::RecipientRequired));
///
/// qr.update(|f| {
///     f.recipient = "ФОП Петренко".into();
///     f.account = "UA123456789012345678901234567".into();
///     f.recipient_code = "1234567890".into();
///     f.purpose = "Оплата".into();
/// });
/// assert!(qr.is_valid());
/// assert!(qr.generate_url().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PaymentQr {
    base_url: String,
    fields: PaymentFieldSet,
    violations: Vec<Violation>,
}

impl Default for PaymentQr {
    fn default() -> Self {
        Self::new(PaymentFieldSet::default())
    }
}

impl PaymentQr {
    /// Creates a generator for the default base URL.
    #[must_use]
    pub fn new(fields: PaymentFieldSet) -> Self {
        Self::with_base_url(fields, DEFAULT_BASE_URL)
    }

    /// Creates a generator for a custom base URL.
    #[must_use]
    pub fn with_base_url(fields: PaymentFieldSet, base_url: &str) -> Self {
        let violations = validate(&fields);
        Self {
            base_url: normalize_base_url(base_url),
            fields,
            violations,
        }
    }

    /// Replaces the field set and re-validates.
    pub fn set_fields(&mut self, fields: PaymentFieldSet) -> &mut Self {
        self.fields = fields;
        self.revalidate();
        self
    }

    /// Mutates the field set in place and re-validates.
    pub fn update(&mut self, change: impl FnOnce(&mut PaymentFieldSet)) -> &mut Self {
        change(&mut self.fields);
        self.revalidate();
        self
    }

    fn revalidate(&mut self) {
        self.violations = validate(&self.fields);

        #[cfg(feature = "telemetry")]
        tracing::debug!(violations = self.violations.len(), "Validated payment fields");
    }

    /// Returns the current field set.
    #[must_use]
    pub const fn fields(&self) -> &PaymentFieldSet {
        &self.fields
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the violations of the current field set.
    #[must_use]
    pub fn errors(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns `true` if the current field set has no violations.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Encodes the current field set as a payment URL.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::Validation`] if violations are outstanding, or
    /// [`QrError::Size`] if the URL is too long.
    pub fn generate_url(&self) -> Result<String, QrError> {
        if !self.violations.is_empty() {
            return Err(ValidationError::new(self.violations.clone()).into());
        }
        assemble_url(&self.fields, &self.base_url)
    }

    /// Decodes a payment URL issued under this generator's base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the URL is malformed.
    pub fn parse_url(&self, url: &str) -> Result<PaymentRecord, FormatError> {
        decode_url(url, &self.base_url)
    }

    /// Encodes the current field set and hands the URL to `renderer`.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Self::generate_url`], or [`QrError::Render`]
    /// if the renderer fails.
    pub fn render<R: QrRenderer>(
        &self,
        renderer: &R,
        options: &RenderOptions,
    ) -> Result<Rendered, QrError> {
        let url = self.generate_url()?;
        Ok(renderer.render(&url, options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::fields::{Encoding, Function};
    use crate::render::OutputKind;
    use rust_decimal::Decimal;
    use std::cell::RefCell;

    fn valid_fields() -> PaymentFieldSet {
        PaymentFieldSet::default()
            .with_recipient("ТОВ \"Тестова компанія\"")
            .with_account("UA123456789012345678901234567")
            .with_amount(Decimal::new(10050, 2))
            .with_recipient_code("12345678")
            .with_purpose("Тестовий платіж")
    }

    #[derive(Default)]
    struct RecordingRenderer {
        seen: RefCell<Vec<(String, OutputKind)>>,
    }

    impl QrRenderer for RecordingRenderer {
        fn render(&self, url: &str, options: &RenderOptions) -> Result<Rendered, RenderError> {
            self.seen.borrow_mut().push((url.to_owned(), options.output));
            Ok(Rendered::Markup(format!("<svg data-url=\"{url}\"/>")))
        }
    }

    struct FailingRenderer;

    impl QrRenderer for FailingRenderer {
        fn render(&self, _url: &str, _options: &RenderOptions) -> Result<Rendered, RenderError> {
            Err(RenderError::new("out of ink"))
        }
    }

    #[test]
    fn test_new_validates_immediately() {
        let qr = PaymentQr::new(valid_fields());
        assert!(qr.is_valid());
        assert!(qr.errors().is_empty());

        let qr = PaymentQr::default();
        assert!(!qr.is_valid());
        assert_eq!(
            qr.errors(),
            &[
                Violation::RecipientRequired,
                Violation::AccountRequired,
                Violation::RecipientCodeRequired,
                Violation::PurposeRequired,
            ]
        );
    }

    #[test]
    fn test_set_fields_revalidates() {
        let mut qr = PaymentQr::default();
        qr.set_fields(
            valid_fields()
                .with_function(Function::Uct)
                .with_encoding(Encoding::Utf8),
        );
        assert!(qr.is_valid());
        assert_eq!(qr.fields().function, "UCT");
        assert_eq!(qr.fields().encoding, "1");
    }

    #[test]
    fn test_update_revalidates() {
        let mut qr = PaymentQr::new(valid_fields());
        qr.update(|f| f.lock_mask = "xyz".into());
        assert_eq!(qr.errors(), &[Violation::InvalidLockMask]);
        qr.update(|f| f.lock_mask = "ABCD".into());
        assert!(qr.is_valid());
    }

    #[test]
    fn test_generate_url_fails_with_cached_violations() {
        let mut qr = PaymentQr::new(valid_fields());
        qr.update(|f| f.recipient.clear());
        let err = qr.generate_url().unwrap_err();
        assert!(err.to_string().starts_with("Validation failed"));
        assert!(err.to_string().contains("Recipient is required"));
    }

    #[test]
    fn test_generate_and_parse() {
        let qr = PaymentQr::new(valid_fields());
        let url = qr.generate_url().unwrap();
        let record = qr.parse_url(&url).unwrap();
        assert_eq!(record.service_tag, "BCD");
        assert_eq!(record.version, "003");
        assert_eq!(record.function, "ICT");
        assert_eq!(record.recipient, "ТОВ \"Тестова компанія\"");
        assert_eq!(record.account, "UA123456789012345678901234567");
    }

    #[test]
    fn test_custom_base_url_is_normalized() {
        let qr = PaymentQr::with_base_url(valid_fields(), "https://pay.example.com//");
        assert_eq!(qr.base_url(), "https://pay.example.com/");
        let url = qr.generate_url().unwrap();
        assert!(qr.parse_url(&url).is_ok());
        assert_eq!(
            qr.parse_url("https://qr.bank.gov.ua/QkNE"),
            Err(FormatError::InvalidUrl)
        );
    }

    #[test]
    fn test_render_passes_url_to_renderer() {
        let qr = PaymentQr::new(valid_fields());
        let renderer = RecordingRenderer::default();
        let rendered = qr.render(&renderer, &RenderOptions::data_uri()).unwrap();

        let seen = renderer.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, qr.generate_url().unwrap());
        assert_eq!(seen[0].1, OutputKind::DataUri);
        assert!(matches!(rendered, Rendered::Markup(_)));
    }

    #[test]
    fn test_render_errors() {
        let qr = PaymentQr::new(valid_fields());
        let err = qr.render(&FailingRenderer, &RenderOptions::svg()).unwrap_err();
        assert!(matches!(err, QrError::Render(_)));

        let renderer = RecordingRenderer::default();
        let invalid = PaymentQr::default();
        let err = invalid.render(&renderer, &RenderOptions::svg()).unwrap_err();
        assert!(matches!(err, QrError::Validation(_)));
        assert!(renderer.seen.borrow().is_empty());
    }
}
