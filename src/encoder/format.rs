//! Format and version information.
//!
//! Format info is 5 data bits extended to 15 with BCH(15,5) (generator
//! 0x537) and XOR-masked; version info is 6 data bits extended to 18 with
//! BCH(18,6) (generator 0x1F25), unmasked. Both are written into cells the
//! matrix builder reserved, after data masking, so they are never masked
//! themselves.

use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// XOR applied to the 15 format bits of normal symbols
const FORMAT_XOR_NORMAL: u16 = 0x5412;
/// XOR applied to the 15 format bits of micro symbols
const FORMAT_XOR_MICRO: u16 = 0x4445;

/// BCH(15,5) generator polynomial
const FORMAT_GENERATOR: u16 = 0x537;
/// BCH(18,6) generator polynomial
const VERSION_GENERATOR: u32 = 0x1F25;

/// Micro symbol number (3 bits) identifying version and level together
fn micro_symbol_number(version: Version, level: ECLevel) -> u16 {
    match (version, level) {
        (Version::Micro(1), ECLevel::L) => 0,
        (Version::Micro(2), ECLevel::L) => 1,
        (Version::Micro(2), ECLevel::M) => 2,
        (Version::Micro(3), ECLevel::L) => 3,
        (Version::Micro(3), ECLevel::M) => 4,
        (Version::Micro(4), ECLevel::L) => 5,
        (Version::Micro(4), ECLevel::M) => 6,
        (Version::Micro(4), ECLevel::Q) => 7,
        _ => panic!("no micro symbol number for {:?} {:?}", version, level),
    }
}

/// The 15 format bits for a symbol: data, BCH remainder, XOR mask
pub fn format_info_bits(version: Version, level: ECLevel, mask: MaskPattern) -> u16 {
    let (data, xor) = if version.is_micro() {
        let mask_index = u16::from(
            mask.micro_value()
                .expect("mask validated as a micro candidate"),
        );
        (
            micro_symbol_number(version, level) << 2 | mask_index,
            FORMAT_XOR_MICRO,
        )
    } else {
        (
            u16::from(level.format_bits()) << 3 | u16::from(mask.value()),
            FORMAT_XOR_NORMAL,
        )
    };
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    (data << 10 | rem) ^ xor
}

/// The 18 version-information bits for a normal version (7..=40)
pub fn version_info_bits(version: u8) -> u32 {
    debug_assert!((7..=40).contains(&version));
    let data = u32::from(version);
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    data << 12 | rem
}

/// Write the format information into its reserved cells.
///
/// Normal symbols carry two copies: one around the top-left finder and one
/// split between the other two; micro symbols carry a single copy along
/// row 8 and column 8.
pub fn write_format_info(
    modules: &mut BitMatrix,
    version: Version,
    level: ECLevel,
    mask: MaskPattern,
) {
    let bits = format_info_bits(version, level, mask);
    let bit = |i: usize| (bits >> i) & 1 != 0;

    if version.is_micro() {
        for i in 0..7 {
            modules.set(8, i + 1, bit(i));
        }
        for i in 7..15 {
            modules.set(15 - i, 8, bit(i));
        }
        return;
    }

    let size = modules.size();
    // First copy around the top-left finder
    for i in 0..6 {
        modules.set(8, i, bit(i));
    }
    modules.set(8, 7, bit(6));
    modules.set(8, 8, bit(7));
    modules.set(7, 8, bit(8));
    for i in 9..15 {
        modules.set(14 - i, 8, bit(i));
    }
    // Second copy split across the top-right and bottom-left finders
    for i in 0..8 {
        modules.set(size - 1 - i, 8, bit(i));
    }
    for i in 8..15 {
        modules.set(8, size - 15 + i, bit(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Remainder of a 15-bit codeword divided by the BCH(15,5) generator
    fn format_syndrome(code: u16) -> u16 {
        let mut rem = u32::from(code);
        for i in (10..15).rev() {
            if rem >> i & 1 != 0 {
                rem ^= u32::from(FORMAT_GENERATOR) << (i - 10);
            }
        }
        rem as u16
    }

    #[test]
    fn test_known_format_codes() {
        // Published format sequences: L with pattern 0, M with pattern 2
        assert_eq!(
            format_info_bits(Version::Normal(1), ECLevel::L, MaskPattern::Pattern0),
            0b111011111000100
        );
        assert_eq!(
            format_info_bits(Version::Normal(1), ECLevel::M, MaskPattern::Pattern2),
            0b101010000010010
        );
    }

    #[test]
    fn test_format_codes_are_bch_codewords() {
        for level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            for m in 0..8 {
                let mask = MaskPattern::from_bits(m).unwrap();
                let code = format_info_bits(Version::Normal(1), level, mask) ^ FORMAT_XOR_NORMAL;
                assert_eq!(format_syndrome(code), 0, "{:?} mask {}", level, m);
            }
        }
        for m in 0..4 {
            let mask = MaskPattern::from_micro_bits(m).unwrap();
            let code = format_info_bits(Version::Micro(4), ECLevel::Q, mask) ^ FORMAT_XOR_MICRO;
            assert_eq!(format_syndrome(code), 0, "micro mask {}", m);
        }
    }

    #[test]
    fn test_format_codes_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            for m in 0..8 {
                let mask = MaskPattern::from_bits(m).unwrap();
                assert!(seen.insert(format_info_bits(Version::Normal(1), level, mask)));
            }
        }
        assert_eq!(seen.len(), 32);
    }

    #[test]
    fn test_known_version_codes() {
        // Published version-information sequences
        assert_eq!(version_info_bits(7), 0x07C94);
        assert_eq!(version_info_bits(8), 0x085BC);
    }

    #[test]
    fn test_version_codes_divisible_by_generator() {
        for v in 7..=40u8 {
            let mut rem = version_info_bits(v);
            for i in (12..18).rev() {
                if rem >> i & 1 != 0 {
                    rem ^= VERSION_GENERATOR << (i - 12);
                }
            }
            assert_eq!(rem, 0, "version {}", v);
            assert_eq!(version_info_bits(v) >> 12, u32::from(v));
        }
    }

    #[test]
    fn test_normal_placement_copies_agree() {
        let mut modules = BitMatrix::new(21);
        write_format_info(
            &mut modules,
            Version::Normal(1),
            ECLevel::L,
            MaskPattern::Pattern3,
        );
        let bits = format_info_bits(Version::Normal(1), ECLevel::L, MaskPattern::Pattern3);
        // Spot-check both copies carry the same bits
        assert_eq!(modules.get(8, 0), bits & 1 != 0);
        assert_eq!(modules.get(20, 8), bits & 1 != 0);
        assert_eq!(modules.get(0, 8), bits >> 14 & 1 != 0);
        assert_eq!(modules.get(8, 20), bits >> 14 & 1 != 0);
    }

    #[test]
    fn test_micro_placement_geometry() {
        let mut modules = BitMatrix::new(13);
        write_format_info(
            &mut modules,
            Version::Micro(2),
            ECLevel::L,
            MaskPattern::Pattern1,
        );
        let bits = format_info_bits(Version::Micro(2), ECLevel::L, MaskPattern::Pattern1);
        assert_eq!(modules.get(8, 1), bits & 1 != 0);
        assert_eq!(modules.get(8, 7), bits >> 6 & 1 != 0);
        assert_eq!(modules.get(8, 8), bits >> 7 & 1 != 0);
        assert_eq!(modules.get(1, 8), bits >> 14 & 1 != 0);
    }
}
