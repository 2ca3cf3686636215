use crate::encoder::bitstream::BitBuffer;
use crate::error::EncodeError;

/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
/// (ISO/IEC 18004 Table 5, indices 0..44)
const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Base-45 digit for one character, or None if it is not in the set
fn alphanumeric_digit(c: char) -> Option<u32> {
    ALPHANUMERIC_CHARSET.find(c).map(|i| i as u32)
}

/// Check whether every character of `text` is alphanumeric-encodable
pub fn is_alphanumeric(text: &str) -> bool {
    text.chars().all(|c| alphanumeric_digit(c).is_some())
}

/// Alphanumeric mode encoder (Mode 0010)
/// Pairs emit 45*a + b in 11 bits, a trailing single in 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Encode an alphanumeric string into payload bits
    /// Returns (payload_bits, source_character_count)
    ///
    /// Lowercase letters are rejected here; the auto-mode path uppercases
    /// before calling.
    pub fn encode(text: &str) -> Result<(Vec<bool>, usize), EncodeError> {
        let mut bb = BitBuffer::with_capacity(text.len() * 6);
        let chars: Vec<char> = text.chars().collect();
        for chunk in chars.chunks(2) {
            let mut value: u32 = 0;
            for &c in chunk {
                let digit = alphanumeric_digit(c).ok_or_else(|| {
                    EncodeError::InvalidMode(format!(
                        "alphanumeric mode cannot encode character {:?}",
                        c
                    ))
                })?;
                value = value * 45 + digit;
            }
            bb.append_bits(value, chunk.len() * 5 + 1);
        }
        Ok((bb.bits().to_vec(), chars.len()))
    }
}
