use crate::encoder::bitstream::BitBuffer;

/// Byte mode encoder (Mode 0100) for 8-bit data
///
/// Bytes are emitted verbatim; the default interpretation is UTF-8, or
/// whatever character set a preceding ECI header names.
pub struct ByteEncoder;

impl ByteEncoder {
    /// Encode raw bytes into byte-mode payload bits
    /// Returns (payload_bits, source_byte_count)
    pub fn encode(data: &[u8]) -> (Vec<bool>, usize) {
        let mut bb = BitBuffer::with_capacity(data.len() * 8);
        for &b in data {
            bb.append_bits(u32::from(b), 8);
        }
        (bb.bits().to_vec(), data.len())
    }
}
