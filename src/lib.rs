//! RustQRGen - Fast QR Code and Micro QR Code encoder
//!
//! A pure Rust encoder for ISO/IEC 18004 symbols: segmentation, Reed-Solomon
//! error correction, matrix construction and mask selection, for both normal
//! (1-40) and Micro (M1-M4) versions. The output is a module matrix; turning
//! it into pixels is left to consumers.
//!
//! ```
//! use rust_qr_gen::{encode, EncodeOptions};
//!
//! let code = encode("HELLO WORLD", &EncodeOptions::default()).unwrap();
//! assert_eq!(code.size(), 21);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding modules (segments, error correction, matrix, masking)
pub mod encoder;
/// Error surface of the encoder
pub mod error;
/// Core data structures (QRCode, BitMatrix, Version, etc.)
pub mod models;

pub use encoder::segment::{Mode, Segment};
pub use error::EncodeError;
pub use models::{BitMatrix, ECLevel, MaskPattern, QRCode, Version};

use encoder::qr_encoder::QrEncoder;

/// Encoding options; the default encodes at level L with everything else
/// chosen automatically.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Target error correction level (may be raised by `boost_error`)
    pub error_level: ECLevel,
    /// Force a specific version instead of picking the smallest fit
    pub version: Option<Version>,
    /// Force a data mode instead of auto-selecting per payload
    pub mode: Option<Mode>,
    /// Force a mask index (0..=7 normal, 0..=3 micro) instead of scoring
    pub mask: Option<u8>,
    /// Byte-mode text encoding label; only UTF-8 has an ECI assignment here
    pub encoding: String,
    /// Emit an ECI header before byte-mode segments
    pub eci: bool,
    /// Allow micro symbols (`Some(true)`), forbid them (`Some(false)`),
    /// or infer from a forced version (`None`, regular otherwise)
    pub micro: Option<bool>,
    /// Promote the error correction level while the chosen version still fits
    pub boost_error: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            error_level: ECLevel::L,
            version: None,
            mode: None,
            mask: None,
            encoding: "UTF-8".to_string(),
            eci: false,
            micro: None,
            boost_error: true,
        }
    }
}

impl EncodeOptions {
    /// Create options with all defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// Encode a text payload into a QR code
///
/// # Arguments
/// * `content` - Payload text (UTF-8)
/// * `options` - Encoding options; see [`EncodeOptions`]
///
/// # Returns
/// The encoded symbol, or the first validation/capacity error
pub fn encode(content: &str, options: &EncodeOptions) -> Result<QRCode, EncodeError> {
    if content.is_empty() {
        return Err(EncodeError::DataOverflow { proposal: None });
    }
    let segment = match options.mode {
        None => Segment::auto(content),
        Some(Mode::Numeric) => Segment::numeric(content)?,
        Some(Mode::Alphanumeric) => Segment::alphanumeric(content)?,
        Some(Mode::Byte) => Segment::bytes(content.as_bytes()),
        Some(Mode::Kanji) => Segment::kanji(content.as_bytes())?,
        Some(Mode::Eci) => {
            return Err(EncodeError::InvalidMode(
                "ECI is a header, not a data mode".into(),
            ))
        }
    };
    QrEncoder::new(options).encode_segments(&[segment])
}

/// Encode a raw byte payload into a QR code (always byte mode)
///
/// # Arguments
/// * `data` - Payload bytes
/// * `options` - Encoding options; a forced non-byte mode is rejected
pub fn encode_bytes(data: &[u8], options: &EncodeOptions) -> Result<QRCode, EncodeError> {
    if data.is_empty() {
        return Err(EncodeError::DataOverflow { proposal: None });
    }
    match options.mode {
        None | Some(Mode::Byte) => {}
        Some(mode) => {
            return Err(EncodeError::InvalidMode(format!(
                "{:?} mode does not apply to raw byte payloads",
                mode
            )))
        }
    }
    QrEncoder::new(options).encode_segments(&[Segment::bytes(data)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_overflows() {
        let err = encode("", &EncodeOptions::default()).unwrap_err();
        assert_eq!(err, EncodeError::DataOverflow { proposal: None });
        let err = encode_bytes(&[], &EncodeOptions::default()).unwrap_err();
        assert_eq!(err, EncodeError::DataOverflow { proposal: None });
    }

    #[test]
    fn test_encode_hello_world() {
        let code = encode("HELLO WORLD", &EncodeOptions::default()).unwrap();
        assert_eq!(code.version, Version::Normal(1));
        assert_eq!(code.size(), 21);
        assert!(!code.is_micro());
    }

    #[test]
    fn test_encode_is_idempotent() {
        let options = EncodeOptions::default();
        let a = encode("https://example.com/?q=1", &options).unwrap();
        let b = encode("https://example.com/?q=1", &options).unwrap();
        assert_eq!(a.modules, b.modules);
        assert_eq!(a.mask, b.mask);
        assert_eq!(a.error_level, b.error_level);
    }

    #[test]
    fn test_forced_mode_rejects_mismatched_payload() {
        let options = EncodeOptions {
            mode: Some(Mode::Alphanumeric),
            ..EncodeOptions::default()
        };
        assert!(matches!(
            encode("hello", &options),
            Err(EncodeError::InvalidMode(_))
        ));

        let options = EncodeOptions {
            mode: Some(Mode::Numeric),
            ..EncodeOptions::default()
        };
        assert!(matches!(
            encode("12a", &options),
            Err(EncodeError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_string_art_dimensions() {
        let code = encode("1", &EncodeOptions::default()).unwrap();
        let art = code.to_string_art();
        assert_eq!(art.lines().count(), 21);
    }
}
