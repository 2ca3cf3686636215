//! Zig-zag placement of the codeword stream into the matrix.
//!
//! The canonical walk visits column pairs from the right edge leftward,
//! alternating direction at every pair boundary and skipping the vertical
//! timing column of normal symbols. The walk is precomputed as a linear
//! `(x, y)` sequence once per encode and then filtered against the
//! reservation map.

use crate::models::{BitMatrix, Version};

/// The full placement walk for a version, as (x, y) positions.
///
/// Reserved cells are included; the placer skips them while consuming bits.
pub fn placement_walk(version: Version) -> Vec<(usize, usize)> {
    let size = version.size();
    let mut walk = Vec::with_capacity(size * size);
    let mut upward = true;
    let mut right = size as i32 - 1;
    while right >= 1 {
        // The vertical timing pattern occupies column 6 of normal symbols;
        // the walk shifts one column left instead of straddling it.
        if !version.is_micro() && right == 6 {
            right = 5;
        }
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for j in 0..2 {
                let x = (right - j) as usize;
                walk.push((x, y));
            }
        }
        upward = !upward;
        right -= 2;
    }
    walk
}

/// Fill every non-reserved cell from the bit stream, MSB-first order being
/// the stream order; cells beyond the stream stay light.
pub fn place_data(
    modules: &mut BitMatrix,
    reserved: &BitMatrix,
    bits: &[bool],
    version: Version,
) {
    let mut stream = bits.iter();
    for (x, y) in placement_walk(version) {
        if !reserved.get(x, y) {
            modules.set(x, y, stream.next().copied().unwrap_or(false));
        }
    }
    debug_assert!(stream.next().is_none(), "codeword stream longer than data area");
}
