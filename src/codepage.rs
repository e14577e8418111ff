//! Legacy 8-bit text encoding used by both the log container and the INI file.
//!
//! The logging application reads and writes Windows code page 932. Callers pass
//! the encoding explicitly so tests never depend on the host locale.

use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

/// Text that cannot be written in the legacy format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The text contains a character with no legacy representation.
    #[error("text has no representation in {encoding}: {text:?}")]
    UnencodableText {
        /// Offending text.
        text: String,
        /// Name of the target encoding.
        encoding: &'static str,
    },
    /// The NUL-terminated encoding does not fit the fixed-width field.
    #[error("text too long for a {width}-byte field ({len} bytes with terminator): {text:?}")]
    StringTooLong {
        /// Offending text.
        text: String,
        /// Encoded length including the terminator.
        len: usize,
        /// Field width.
        width: usize,
    },
}

/// Bidirectional legacy text codec.
pub trait LegacyEncoding {
    /// Encoding name used in error messages.
    fn name(&self) -> &'static str;

    /// Encodes `text`, failing if any character is unrepresentable.
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodeError>;

    /// Decodes `bytes`, replacing malformed sequences.
    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str>;
}

/// Windows code page 932 (Shift_JIS with the Microsoft extensions).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cp932;

impl LegacyEncoding for Cp932 {
    fn name(&self) -> &'static str {
        "cp932"
    }

    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodeError> {
        let (bytes, _, had_errors) = SHIFT_JIS.encode(text);
        if had_errors {
            return Err(EncodeError::UnencodableText {
                text: text.to_string(),
                encoding: self.name(),
            });
        }
        Ok(bytes)
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);
        if had_errors {
            tracing::debug!(len = bytes.len(), "replaced malformed cp932 sequences");
        }
        text
    }
}

/// Encodes `value` followed by a NUL byte.
///
/// With `Some(width)` the result is zero-padded to exactly `width` bytes and a
/// terminated length above `width` is [`EncodeError::StringTooLong`]. With
/// `None` the field is open-ended and no padding is added.
pub fn encode_fixed<E: LegacyEncoding + ?Sized>(
    encoding: &E,
    value: &str,
    width: Option<usize>,
) -> Result<Vec<u8>, EncodeError> {
    let encoded = encoding.encode(value)?;
    let len = encoded.len() + 1;
    let cap = match width {
        Some(width) if len > width => {
            return Err(EncodeError::StringTooLong {
                text: value.to_string(),
                len,
                width,
            });
        }
        Some(width) => width,
        None => len,
    };

    let mut out = Vec::with_capacity(cap);
    out.extend_from_slice(&encoded);
    out.resize(cap, 0);
    Ok(out)
}
