//! Boundary towards external QR image renderers.
//!
//! Turning a payment URL into an image is not done by this crate. A
//! renderer only has to implement [`QrRenderer`]; the options below carry the
//! settings the standard cares about (error correction level `M`) together
//! with the usual presentation knobs.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// QR symbol version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolVersion {
    /// Smallest version that fits the data.
    #[default]
    Auto,
    /// Fixed version, `1..=40`.
    Fixed(u8),
}

/// Output produced by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// SVG markup.
    #[default]
    Svg,
    /// Raw PNG bytes.
    Png,
    /// PNG wrapped in a `data:image/png;base64,` URI.
    DataUri,
}

/// Error correction level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EccLevel {
    /// About 7% recovery.
    L,
    /// About 15% recovery, required by the NBU standard.
    #[default]
    M,
    /// About 25% recovery.
    Q,
    /// About 30% recovery.
    H,
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Symbol version.
    pub version: SymbolVersion,
    /// Output kind.
    pub output: OutputKind,
    /// Error correction level.
    pub ecc: EccLevel,
    /// Pixels per module.
    pub scale: u32,
    /// Whether to surround the symbol with a quiet zone.
    pub quiet_zone: bool,
    /// CSS class on the root SVG element.
    pub css_class: Option<String>,
    /// SVG view box size.
    pub svg_view_box: Option<u32>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::svg()
    }
}

impl RenderOptions {
    /// SVG markup with the `nbu-qr-code` CSS class and a 500 unit view box.
    #[must_use]
    pub fn svg() -> Self {
        Self {
            version: SymbolVersion::Auto,
            output: OutputKind::Svg,
            ecc: EccLevel::M,
            scale: 8,
            quiet_zone: true,
            css_class: Some("nbu-qr-code".to_owned()),
            svg_view_box: Some(500),
        }
    }

    /// Raw PNG bytes.
    #[must_use]
    pub const fn png() -> Self {
        Self {
            version: SymbolVersion::Auto,
            output: OutputKind::Png,
            ecc: EccLevel::M,
            scale: 8,
            quiet_zone: true,
            css_class: None,
            svg_view_box: None,
        }
    }

    /// PNG as a data URI, ready for an `<img src>`.
    #[must_use]
    pub fn data_uri() -> Self {
        Self {
            output: OutputKind::DataUri,
            ..Self::png()
        }
    }
}

/// A rendered QR symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Vector markup such as SVG.
    Markup(String),
    /// Raster image bytes.
    Image(Vec<u8>),
    /// Inline `data:` URI.
    DataUri(String),
}

/// Renders a payment URL into a QR symbol.
pub trait QrRenderer {
    /// Renders `url` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the symbol cannot be produced.
    fn render(&self, url: &str, options: &RenderOptions) -> Result<Rendered, RenderError>;
}

impl<R: QrRenderer + ?Sized> QrRenderer for &R {
    fn render(&self, url: &str, options: &RenderOptions) -> Result<Rendered, RenderError> {
        (**self).render(url, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_use_ecc_m() {
        for options in [RenderOptions::svg(), RenderOptions::png(), RenderOptions::data_uri()] {
            assert_eq!(options.ecc, EccLevel::M);
            assert_eq!(options.scale, 8);
            assert!(options.quiet_zone);
            assert_eq!(options.version, SymbolVersion::Auto);
        }
    }

    #[test]
    fn test_preset_outputs() {
        assert_eq!(RenderOptions::default(), RenderOptions::svg());
        assert_eq!(RenderOptions::svg().css_class.as_deref(), Some("nbu-qr-code"));
        assert_eq!(RenderOptions::png().output, OutputKind::Png);
        assert_eq!(RenderOptions::data_uri().output, OutputKind::DataUri);
    }

    #[test]
    fn test_options_deserialize_partial() {
        let options: RenderOptions =
            serde_json::from_str(r#"{"output":"png","ecc":"H","version":{"fixed":10}}"#).unwrap();
        assert_eq!(options.output, OutputKind::Png);
        assert_eq!(options.ecc, EccLevel::H);
        assert_eq!(options.version, SymbolVersion::Fixed(10));
        assert_eq!(options.scale, 8);
    }
}
