//! Function-pattern placement and the reservation map.
//!
//! Builds the symbol scaffold: finder patterns with separators, timing
//! patterns, alignment patterns, the dark module, version information and
//! the reserved (but not yet written) format-information cells. Every cell
//! touched here is marked in the reservation map, which the data placer and
//! the mask engine treat as immutable.

use crate::encoder::format::version_info_bits;
use crate::encoder::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Version};

/// Module colors plus reservation map with all function patterns placed
pub struct FunctionPatterns {
    /// Module colors; data cells still light
    pub modules: BitMatrix,
    /// true = function/reserved cell, untouchable by data placement and masking
    pub reserved: BitMatrix,
    version: Version,
}

impl FunctionPatterns {
    /// Place every function pattern for the version
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut patterns = Self {
            modules: BitMatrix::new(size),
            reserved: BitMatrix::new(size),
            version,
        };
        if version.is_micro() {
            patterns.draw_micro();
        } else {
            patterns.draw_normal();
        }
        patterns
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.modules.size()
    }

    /// Number of cells left for data and EC bits
    pub fn data_module_count(&self) -> usize {
        let size = self.size();
        size * size - self.reserved.count_set()
    }

    fn draw_normal(&mut self) {
        let size = self.size();

        // Timing patterns on row 6 and column 6; finders overwrite the ends
        for i in 0..size {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }

        // Finder patterns with their separator rings
        self.draw_finder(3, 3);
        self.draw_finder(size - 4, 3);
        self.draw_finder(3, size - 4);

        // Alignment patterns, skipping the three finder corners
        let positions = alignment_pattern_positions(self.version.number());
        let last = positions.len().wrapping_sub(1);
        for (i, &cx) in positions.iter().enumerate() {
            for (j, &cy) in positions.iter().enumerate() {
                let in_corner =
                    (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !in_corner {
                    self.draw_alignment(cx, cy);
                }
            }
        }

        // Format information cells: reserved now, written after masking
        for i in 0..9 {
            if i != 6 {
                self.set_function(8, i, false);
                self.set_function(i, 8, false);
            }
        }
        for i in 0..8 {
            self.set_function(size - 1 - i, 8, false);
            self.set_function(8, size - 1 - i, false);
        }

        // Dark module
        self.set_function(8, size - 8, true);

        self.draw_version_info();
    }

    fn draw_micro(&mut self) {
        let size = self.size();

        // Timing patterns on the top row and left column, after the finder
        for i in 8..size {
            self.set_function(i, 0, i % 2 == 0);
            self.set_function(0, i, i % 2 == 0);
        }

        // Single finder pattern with separator
        self.draw_finder(3, 3);

        // Format information cells around the finder: row 8 and column 8
        for i in 1..=8 {
            self.set_function(i, 8, false);
        }
        for i in 1..=7 {
            self.set_function(8, i, false);
        }
    }

    /// 7x7 concentric finder centered at (cx, cy), plus the light separator
    /// ring one module out (clipped at the symbol edge)
    fn draw_finder(&mut self, cx: usize, cy: usize) {
        let size = self.size() as i32;
        let (cx, cy) = (cx as i32, cy as i32);
        for dy in -4..=4i32 {
            for dx in -4..=4i32 {
                let (x, y) = (cx + dx, cy + dy);
                if (0..size).contains(&x) && (0..size).contains(&y) {
                    let dist = dx.abs().max(dy.abs());
                    self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
                }
            }
        }
    }

    /// 5x5 concentric alignment pattern centered at (cx, cy)
    fn draw_alignment(&mut self, cx: usize, cy: usize) {
        for dy in -2..=2i32 {
            for dx in -2..=2i32 {
                let x = (cx as i32 + dx) as usize;
                let y = (cy as i32 + dy) as usize;
                self.set_function(x, y, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    /// 18-bit version information in the two 3x6 blocks (versions 7+)
    fn draw_version_info(&mut self) {
        let v = self.version.number();
        if v < 7 {
            return;
        }
        let bits = version_info_bits(v);
        let size = self.size();
        for i in 0..18 {
            let bit = (bits >> i) & 1 != 0;
            let a = size - 11 + i % 3;
            let b = i / 3;
            self.set_function(a, b, bit);
            self.set_function(b, a, bit);
        }
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.reserved.set(x, y, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_module_counts() {
        assert_eq!(FunctionPatterns::new(Version::Normal(1)).data_module_count(), 208);
        assert_eq!(FunctionPatterns::new(Version::Normal(2)).data_module_count(), 359);
        assert_eq!(FunctionPatterns::new(Version::Normal(7)).data_module_count(), 1568);
        assert_eq!(
            FunctionPatterns::new(Version::Normal(40)).data_module_count(),
            29648
        );
        assert_eq!(FunctionPatterns::new(Version::Micro(1)).data_module_count(), 36);
        assert_eq!(FunctionPatterns::new(Version::Micro(2)).data_module_count(), 80);
        assert_eq!(FunctionPatterns::new(Version::Micro(3)).data_module_count(), 132);
        assert_eq!(FunctionPatterns::new(Version::Micro(4)).data_module_count(), 192);
    }

    #[test]
    fn test_finder_corners() {
        let fp = FunctionPatterns::new(Version::Normal(1));
        // Outer ring dark, separator ring light
        assert!(fp.modules.get(0, 0));
        assert!(fp.modules.get(6, 6));
        assert!(!fp.modules.get(1, 1)); // white ring
        assert!(fp.modules.get(3, 3)); // center
        assert!(!fp.modules.get(7, 7)); // separator
        assert!(fp.reserved.get(7, 7));
        // Other two finders
        assert!(fp.modules.get(20, 0));
        assert!(fp.modules.get(0, 20));
    }

    #[test]
    fn test_timing_parity() {
        let fp = FunctionPatterns::new(Version::Normal(2));
        assert!(fp.modules.get(8, 6));
        assert!(!fp.modules.get(9, 6));
        assert!(fp.modules.get(6, 10));
        assert!(fp.reserved.get(10, 6));

        let fp = FunctionPatterns::new(Version::Micro(2));
        assert!(fp.modules.get(8, 0));
        assert!(!fp.modules.get(9, 0));
        assert!(fp.modules.get(0, 10));
        assert!(!fp.modules.get(0, 11));
    }

    #[test]
    fn test_dark_module() {
        let fp = FunctionPatterns::new(Version::Normal(5));
        let size = Version::Normal(5).size();
        assert!(fp.modules.get(8, size - 8));
        assert!(fp.reserved.get(8, size - 8));
    }

    #[test]
    fn test_alignment_pattern_v2() {
        let fp = FunctionPatterns::new(Version::Normal(2));
        // Single alignment pattern centered at (18, 18)
        assert!(fp.modules.get(18, 18));
        assert!(!fp.modules.get(17, 18));
        assert!(fp.modules.get(16, 16));
        assert!(fp.reserved.get(16, 18));
    }

    #[test]
    fn test_version_info_reserved_for_v7() {
        let fp = FunctionPatterns::new(Version::Normal(7));
        let size = Version::Normal(7).size();
        for i in 0..18 {
            assert!(fp.reserved.get(size - 11 + i % 3, i / 3));
            assert!(fp.reserved.get(i / 3, size - 11 + i % 3));
        }
        // Version 6 has no version info blocks
        let fp = FunctionPatterns::new(Version::Normal(6));
        let size = Version::Normal(6).size();
        assert!(!fp.reserved.get(size - 11, 0));
    }

    #[test]
    fn test_micro_format_cells_reserved() {
        let fp = FunctionPatterns::new(Version::Micro(1));
        for i in 1..=8 {
            assert!(fp.reserved.get(i, 8));
        }
        for i in 1..=7 {
            assert!(fp.reserved.get(8, i));
        }
        // Bottom-right quadrant is data
        assert!(!fp.reserved.get(10, 10));
    }
}
