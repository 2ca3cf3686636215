use crate::encoder::bitstream::BitBuffer;
use crate::error::EncodeError;

/// Kanji mode encoder (Mode 1000)
///
/// Input is Shift-JIS double-byte data. Each pair `v` is remapped to a
/// 13-bit value: subtract 0x8140 for the 0x8140..=0x9FFC block or 0xC140
/// for the 0xE040..=0xEBBF block, then fold as `(hi * 0xC0) + lo`.
pub struct KanjiEncoder;

impl KanjiEncoder {
    /// Encode Shift-JIS bytes into kanji-mode payload bits
    /// Returns (payload_bits, double_byte_unit_count)
    pub fn encode(data: &[u8]) -> Result<(Vec<bool>, usize), EncodeError> {
        if data.len() % 2 != 0 {
            return Err(EncodeError::InvalidMode(
                "kanji mode requires an even number of Shift-JIS bytes".into(),
            ));
        }
        let mut bb = BitBuffer::with_capacity(data.len() / 2 * 13);
        for pair in data.chunks(2) {
            let v = u32::from(pair[0]) << 8 | u32::from(pair[1]);
            let shifted = match v {
                0x8140..=0x9FFC => v - 0x8140,
                0xE040..=0xEBBF => v - 0xC140,
                _ => {
                    return Err(EncodeError::InvalidMode(format!(
                        "byte pair 0x{:04x} is not a kanji-mode Shift-JIS value",
                        v
                    )))
                }
            };
            let folded = (shifted >> 8) * 0xC0 + (shifted & 0xFF);
            bb.append_bits(folded, 13);
        }
        Ok((bb.bits().to_vec(), data.len() / 2))
    }
}
