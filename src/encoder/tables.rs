//! Capacity and block-structure tables from ISO/IEC 18004.
//!
//! The two per-version tables are ISO/IEC 18004's Annex tables (Model 2)
//! and are shared process-wide as plain consts. Derived quantities (raw module
//! counts, data capacities, block layouts, remainder bits) are computed from
//! them; lookups on inputs that passed validation must succeed, so misses
//! panic instead of returning errors.

use crate::models::{ECLevel, Version};

// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Total codewords per micro version M1..M4
const MICRO_TOTAL_CODEWORDS: [usize; 4] = [5, 10, 17, 24];

/// EC codewords per (micro version, level); 0 = level not available.
/// M1's fixed error-detection layout is filed under L.
const MICRO_EC_CODEWORDS: [[usize; 4]; 4] = [
    [2, 0, 0, 0],   // M1
    [5, 6, 0, 0],   // M2
    [6, 8, 0, 0],   // M3
    [8, 10, 14, 0], // M4
];

/// Data capacity in bits per (micro version, level); M1 and M3 end on a
/// 4-bit codeword, hence the non-multiple-of-8 entries.
const MICRO_DATA_BITS: [[usize; 4]; 4] = [
    [20, 0, 0, 0],
    [40, 32, 0, 0],
    [84, 68, 0, 0],
    [128, 112, 80, 0],
];

/// One run of identical blocks in a version's block structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGroup {
    /// Number of blocks in this group
    pub count: usize,
    /// Total codewords per block (data + EC)
    pub total_per_block: usize,
    /// Data codewords per block
    pub data_per_block: usize,
}

/// Number of modules available for data and EC bits after all function
/// patterns are placed
pub fn num_raw_data_modules(version: Version) -> usize {
    match version {
        Version::Normal(v) => {
            let ver = v as usize;
            let mut result = (16 * ver + 128) * ver + 64;
            if ver >= 2 {
                let numalign = ver / 7 + 2;
                result -= (25 * numalign - 10) * numalign - 55;
                if ver >= 7 {
                    result -= 36;
                }
            }
            result
        }
        Version::Micro(v) => {
            let total = MICRO_TOTAL_CODEWORDS[v as usize - 1] * 8;
            // M1 and M3 trade the low nibble of their last codeword away
            if v == 1 || v == 3 {
                total - 4
            } else {
                total
            }
        }
    }
}

/// Zero bits appended after the interleaved codewords to reach the module
/// capacity (0, 3, 4 or 7 depending on version)
pub fn remainder_bits(version: Version) -> usize {
    match version {
        Version::Normal(_) => num_raw_data_modules(version) % 8,
        Version::Micro(_) => 0,
    }
}

/// Data capacity in bits for (version, level), or None when the level is
/// not available in that version
pub fn data_bit_capacity(version: Version, level: ECLevel) -> Option<usize> {
    match version {
        Version::Normal(v) => {
            let codewords = num_raw_data_modules(version) / 8;
            let ec = table_get(&ECC_CODEWORDS_PER_BLOCK, v, level)
                * table_get(&NUM_ERROR_CORRECTION_BLOCKS, v, level);
            Some((codewords - ec) * 8)
        }
        Version::Micro(v) => {
            let bits = MICRO_DATA_BITS[v as usize - 1][level.index()];
            (bits != 0).then_some(bits)
        }
    }
}

/// Block structure for (version, level): short blocks first, then the
/// blocks carrying one extra data codeword
///
/// Panics if the level is not available in the version; callers validate
/// compatibility first.
pub fn block_layout(version: Version, level: ECLevel) -> Vec<BlockGroup> {
    match version {
        Version::Normal(v) => {
            let num_blocks = table_get(&NUM_ERROR_CORRECTION_BLOCKS, v, level);
            let ec_per_block = table_get(&ECC_CODEWORDS_PER_BLOCK, v, level);
            let total_codewords = num_raw_data_modules(version) / 8;
            let num_short = num_blocks - total_codewords % num_blocks;
            let short_total = total_codewords / num_blocks;
            let mut layout = vec![BlockGroup {
                count: num_short,
                total_per_block: short_total,
                data_per_block: short_total - ec_per_block,
            }];
            if num_short < num_blocks {
                layout.push(BlockGroup {
                    count: num_blocks - num_short,
                    total_per_block: short_total + 1,
                    data_per_block: short_total + 1 - ec_per_block,
                });
            }
            layout.retain(|g| g.count > 0);
            layout
        }
        Version::Micro(v) => {
            let ec = MICRO_EC_CODEWORDS[v as usize - 1][level.index()];
            assert!(ec != 0, "level {:?} not available in M{}", level, v);
            let total = MICRO_TOTAL_CODEWORDS[v as usize - 1];
            vec![BlockGroup {
                count: 1,
                total_per_block: total,
                data_per_block: total - ec,
            }]
        }
    }
}

/// EC codewords per block for (version, level)
pub fn ec_codewords_per_block(version: Version, level: ECLevel) -> usize {
    match version {
        Version::Normal(v) => table_get(&ECC_CODEWORDS_PER_BLOCK, v, level),
        Version::Micro(v) => {
            let ec = MICRO_EC_CODEWORDS[v as usize - 1][level.index()];
            assert!(ec != 0, "level {:?} not available in M{}", level, v);
            ec
        }
    }
}

/// Alignment pattern center coordinates for a normal version, ascending
pub fn alignment_pattern_positions(version: u8) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let ver = version as usize;
    let numalign = ver / 7 + 2;
    let size = 4 * ver + 17;
    let step = if version == 32 {
        26
    } else {
        (ver * 4 + numalign * 2 + 1) / (numalign * 2 - 2) * 2
    };
    let mut positions = vec![6];
    let mut pos = (size - 7) as isize;
    for _ in 1..numalign {
        positions.push(pos as usize);
        pos -= step as isize;
    }
    positions[1..].reverse();
    positions
}

/// Versions in auto-selection order: micro first (when allowed), then the
/// normal versions ascending. M1 is excluded because its fixed layout
/// cannot honor a requested error correction level; it is only reachable
/// by forcing the version.
pub fn version_search_order(micro_allowed: bool) -> Vec<Version> {
    let mut order = Vec::with_capacity(43);
    if micro_allowed {
        order.extend((2..=4).map(Version::Micro));
    }
    order.extend((1..=40).map(Version::Normal));
    order
}

fn table_get(table: &'static [[i8; 41]; 4], version: u8, level: ECLevel) -> usize {
    let entry = table[level.index()][version as usize];
    debug_assert!(entry > 0);
    entry as usize
}
