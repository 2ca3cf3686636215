//! QR code encoding modules
//!
//! This module contains all the logic for building a symbol from a payload:
//! - Mode encoders and segment/bit-stream assembly
//! - Capacity tables and version selection support
//! - Reed-Solomon error correction and block interleaving
//! - Function-pattern placement, data placement, masking, format info

/// Bit buffer for big-endian bit stream assembly
pub mod bitstream;
/// Block splitting and codeword interleaving
pub mod blocks;
/// Format and version information (BCH codes and placement)
pub mod format;
/// Function-pattern placement and reservation map
pub mod function_patterns;
/// Mask predicates application and penalty scoring
pub mod mask;
/// Data mode encoders (numeric, alphanumeric, byte, kanji)
pub mod modes;
/// Zig-zag data placement
pub mod placement;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Segments and pre-EC stream assembly
pub mod segment;
/// Capacity and block-structure tables
pub mod tables;
