//! Block layout and codeword interleaving.
//!
//! The padded data stream is split across the version's RS blocks (short
//! blocks first), each block gets its EC codewords, and the final stream
//! interleaves data codewords column-wise, then EC codewords column-wise,
//! then the version's remainder bits as zeros.

use crate::encoder::bitstream::BitBuffer;
use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::tables::{
    block_layout, data_bit_capacity, ec_codewords_per_block, num_raw_data_modules, remainder_bits,
};
use crate::models::{ECLevel, Version};

/// Build the interleaved data+EC bit stream to be placed into the matrix.
///
/// `data` is the padded codeword stream from the segment assembler; for M1
/// and M3 its final byte carries the 4-bit terminal codeword in the high
/// nibble, and only those four bits reach the output.
pub fn build_codeword_stream(data: &[u8], version: Version, level: ECLevel) -> Vec<bool> {
    let rs = ReedSolomonEncoder::new(ec_codewords_per_block(version, level));
    let mut bb = BitBuffer::with_capacity(num_raw_data_modules(version));

    match version {
        Version::Micro(_) => {
            // Single block; the half codeword stays out of the bit stream
            // but participates in the EC computation as stored.
            let ec = rs.encode(data);
            let data_bits = data_bit_capacity(version, level)
                .unwrap_or_else(|| panic!("level {:?} unavailable in {:?}", level, version));
            for i in 0..data_bits {
                bb.append_bits(u32::from(data[i / 8] >> (7 - i % 8)) & 1, 1);
            }
            for &b in &ec {
                bb.append_bits(u32::from(b), 8);
            }
        }
        Version::Normal(_) => {
            let mut data_blocks: Vec<&[u8]> = Vec::new();
            let mut ec_blocks: Vec<Vec<u8>> = Vec::new();
            let mut offset = 0;
            for group in block_layout(version, level) {
                for _ in 0..group.count {
                    let block = &data[offset..offset + group.data_per_block];
                    offset += group.data_per_block;
                    ec_blocks.push(rs.encode(block));
                    data_blocks.push(block);
                }
            }
            debug_assert_eq!(offset, data.len());

            let max_data_len = data_blocks.iter().map(|b| b.len()).max().unwrap_or(0);
            for i in 0..max_data_len {
                for block in &data_blocks {
                    if let Some(&b) = block.get(i) {
                        bb.append_bits(u32::from(b), 8);
                    }
                }
            }
            for i in 0..rs.degree() {
                for block in &ec_blocks {
                    bb.append_bits(u32::from(block[i]), 8);
                }
            }
            bb.append_bits(0, remainder_bits(version));
        }
    }

    debug_assert_eq!(bb.len(), num_raw_data_modules(version));
    bb.bits().to_vec()
}
