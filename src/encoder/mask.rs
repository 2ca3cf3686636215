//! Mask application and penalty scoring.
//!
//! Masks XOR the non-reserved cells only; applying the same pattern twice
//! restores the unmasked placement. Normal symbols score the four ISO
//! penalty rules, micro symbols score the edge-darkness rule; in both cases
//! the lowest score wins and ties break toward the lower pattern index.

use crate::models::{BitMatrix, MaskPattern, Version, MICRO_MASKS};

/// XOR the mask pattern into every non-reserved cell
pub fn apply_mask(modules: &mut BitMatrix, reserved: &BitMatrix, pattern: MaskPattern) {
    let size = modules.size();
    for y in 0..size {
        for x in 0..size {
            if !reserved.get(x, y) && pattern.is_masked(y, x) {
                modules.toggle(x, y);
            }
        }
    }
}

/// Candidate mask patterns for a symbol family
pub fn candidate_masks(version: Version) -> &'static [MaskPattern] {
    const NORMAL_MASKS: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];
    if version.is_micro() {
        &MICRO_MASKS
    } else {
        &NORMAL_MASKS
    }
}

/// Finder-like sequence scored by rule N3, dark-first orientation
const N3_PATTERN: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];

/// Full penalty score for a normal symbol (rules N1-N4)
pub fn penalty_score(modules: &BitMatrix) -> u32 {
    penalty_runs(modules) + penalty_blocks(modules) + penalty_finder_like(modules)
        + penalty_balance(modules)
}

/// N1: every run of 5 or more same-colored modules costs its length minus 2
fn penalty_runs(modules: &BitMatrix) -> u32 {
    let size = modules.size();
    let mut score = 0u32;
    for i in 0..size {
        let mut run_row = 1usize;
        let mut run_col = 1usize;
        for j in 1..size {
            if modules.get(j, i) == modules.get(j - 1, i) {
                run_row += 1;
            } else {
                score += run_penalty(run_row);
                run_row = 1;
            }
            if modules.get(i, j) == modules.get(i, j - 1) {
                run_col += 1;
            } else {
                score += run_penalty(run_col);
                run_col = 1;
            }
        }
        score += run_penalty(run_row) + run_penalty(run_col);
    }
    score
}

fn run_penalty(run: usize) -> u32 {
    if run >= 5 {
        run as u32 - 2
    } else {
        0
    }
}

/// N2: each 2x2 block of identical color costs 3
fn penalty_blocks(modules: &BitMatrix) -> u32 {
    let size = modules.size();
    let mut score = 0u32;
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = modules.get(x, y);
            if color == modules.get(x + 1, y)
                && color == modules.get(x, y + 1)
                && color == modules.get(x + 1, y + 1)
            {
                score += 3;
            }
        }
    }
    score
}

/// N3: each 1:1:3:1:1 finder-like sequence with a 4-module light flank
/// costs 40, scanned in both orientations
fn penalty_finder_like(modules: &BitMatrix) -> u32 {
    let size = modules.size();
    if size < N3_PATTERN.len() {
        return 0;
    }
    let mut score = 0u32;
    for i in 0..size {
        for start in 0..=size - N3_PATTERN.len() {
            let mut forward_row = true;
            let mut reverse_row = true;
            let mut forward_col = true;
            let mut reverse_col = true;
            for (k, &want) in N3_PATTERN.iter().enumerate() {
                let row_cell = modules.get(start + k, i);
                let col_cell = modules.get(i, start + k);
                forward_row &= row_cell == want;
                reverse_row &= row_cell == N3_PATTERN[N3_PATTERN.len() - 1 - k];
                forward_col &= col_cell == want;
                reverse_col &= col_cell == N3_PATTERN[N3_PATTERN.len() - 1 - k];
            }
            score += 40 * (u32::from(forward_row) + u32::from(reverse_row));
            score += 40 * (u32::from(forward_col) + u32::from(reverse_col));
        }
    }
    score
}

/// N4: 10 points per rounded 5% step of dark-ratio deviation from 50%
fn penalty_balance(modules: &BitMatrix) -> u32 {
    let size = modules.size();
    let total = (size * size) as u32;
    let dark = modules.count_set() as u32;
    let deviation = (20 * dark).abs_diff(10 * total);
    let steps = (2 * deviation + total) / (2 * total);
    10 * steps
}

/// Micro penalty: edge darkness of the rightmost column (S1) and bottom row
/// (S2), timing modules excluded; `16*min + max`, lower is better
pub fn micro_penalty_score(modules: &BitMatrix) -> u32 {
    let size = modules.size();
    let mut s1 = 0u32;
    let mut s2 = 0u32;
    for i in 1..size {
        if modules.get(size - 1, i) {
            s1 += 1;
        }
        if modules.get(i, size - 1) {
            s2 += 1;
        }
    }
    if s1 <= s2 {
        16 * s1 + s2
    } else {
        16 * s2 + s1
    }
}
