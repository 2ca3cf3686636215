//! QR code data mode encoders
//!
//! This module contains encoders for the four QR data modes:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Digits, uppercase letters, and a few symbols
//! - Byte: 8-bit data (UTF-8, binary, etc.)
//! - Kanji: Shift-JIS double-byte characters in 13 bits
//!
//! Each encoder maps source symbols to a payload bit stream and reports the
//! source character count; mode indicators and count headers are emitted by
//! the segment assembler, not here.

pub mod alphanumeric;
pub mod byte;
pub mod kanji;
pub mod numeric;
