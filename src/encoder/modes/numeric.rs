use crate::encoder::bitstream::BitBuffer;
use crate::error::EncodeError;

/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
pub struct NumericEncoder;

impl NumericEncoder {
    /// Encode a digit string into numeric-mode payload bits
    /// Returns (payload_bits, source_character_count)
    pub fn encode(text: &str) -> Result<(Vec<bool>, usize), EncodeError> {
        let mut bb = BitBuffer::with_capacity(text.len() * 4);
        for chunk in text.as_bytes().chunks(3) {
            let mut value: u32 = 0;
            for &b in chunk {
                if !b.is_ascii_digit() {
                    return Err(EncodeError::InvalidMode(format!(
                        "numeric mode cannot encode byte 0x{:02x}",
                        b
                    )));
                }
                value = value * 10 + u32::from(b - b'0');
            }
            bb.append_bits(value, chunk.len() * 3 + 1);
        }
        Ok((bb.bits().to_vec(), text.len()))
    }
}
