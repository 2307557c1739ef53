//! URL-safe base64 transport of the payload text.

use std::fmt::{self, Display, Formatter};

use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

/// Payload text in URL-safe base64 without padding.
///
/// This is the standard alphabet with `+` replaced by `-` and `/` by `_`,
/// and trailing `=` removed, so the value can be used directly as a URL
/// path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Url(pub String);

impl Base64Url {
    /// Encodes raw bytes.
    pub fn encode<T: AsRef<[u8]>>(input: T) -> Self {
        Self(URL_SAFE_NO_PAD.encode(input.as_ref()))
    }

    /// Decodes back to raw bytes.
    ///
    /// Padding is restored to the next multiple of four before decoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not valid URL-safe base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let mut padded = self.0.clone();
        while padded.len() % 4 != 0 {
            padded.push('=');
        }
        URL_SAFE.decode(padded)
    }
}

impl AsRef<str> for Base64Url {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Base64Url {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Display for Base64Url {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_url_alphabet_without_padding() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet.
        let encoded = Base64Url::encode([0xfb, 0xff]);
        assert_eq!(encoded.0, "-_8");
    }

    #[test]
    fn test_decode_restores_padding() {
        for input in ["a", "ab", "abc", "abcd", "BCD\n003\n"] {
            let encoded = Base64Url::encode(input);
            assert!(!encoded.0.contains('='));
            assert_eq!(encoded.decode().unwrap(), input.as_bytes());
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Base64Url::from("!!!").decode().is_err());
    }
}
