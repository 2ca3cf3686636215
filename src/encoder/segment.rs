//! Segments and pre-EC bit stream assembly.
//!
//! A segment couples a data mode with its payload bits and source character
//! count. The assembler emits the ECI header (when requested), per-segment
//! mode and count indicators, the payload, the terminator, and the two-byte
//! padding cycle, producing the data codeword stream handed to the
//! Reed-Solomon stage.

use crate::encoder::bitstream::BitBuffer;
use crate::encoder::modes::alphanumeric::{is_alphanumeric, AlphanumericEncoder};
use crate::encoder::modes::byte::ByteEncoder;
use crate::encoder::modes::kanji::KanjiEncoder;
use crate::encoder::modes::numeric::NumericEncoder;
use crate::encoder::tables::data_bit_capacity;
use crate::error::EncodeError;
use crate::models::{ECLevel, Version};

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Digits 0-9
    Numeric,
    /// Digits, uppercase letters, space and $%*+-./:
    Alphanumeric,
    /// Raw 8-bit data
    Byte,
    /// Shift-JIS double-byte characters
    Kanji,
    /// Extended Channel Interpretation header
    Eci,
}

impl Mode {
    /// Whether this mode exists in the given symbol version
    pub fn supported_in(&self, version: Version) -> bool {
        match version {
            Version::Normal(_) => true,
            Version::Micro(1) => matches!(self, Mode::Numeric),
            Version::Micro(2) => matches!(self, Mode::Numeric | Mode::Alphanumeric),
            Version::Micro(_) => !matches!(self, Mode::Eci),
        }
    }

    /// Mode indicator as (value, bit width); micro indicators shrink with
    /// the version, down to zero bits for M1
    pub fn indicator(&self, version: Version) -> (u32, usize) {
        match version {
            Version::Normal(_) => {
                let value = match self {
                    Mode::Numeric => 1,
                    Mode::Alphanumeric => 2,
                    Mode::Byte => 4,
                    Mode::Kanji => 8,
                    Mode::Eci => 7,
                };
                (value, 4)
            }
            Version::Micro(m) => {
                debug_assert!(self.supported_in(version));
                let value = match self {
                    Mode::Numeric => 0,
                    Mode::Alphanumeric => 1,
                    Mode::Byte => 2,
                    Mode::Kanji => 3,
                    Mode::Eci => unreachable!("ECI is not available in micro symbols"),
                };
                (value, m as usize - 1)
            }
        }
    }

    /// Character count indicator width in bits
    pub fn count_width(&self, version: Version) -> usize {
        match version {
            Version::Normal(v) => {
                let row = match self {
                    Mode::Numeric => [10, 12, 14],
                    Mode::Alphanumeric => [9, 11, 13],
                    Mode::Byte => [8, 16, 16],
                    Mode::Kanji => [8, 10, 12],
                    Mode::Eci => [0, 0, 0],
                };
                row[(v as usize + 7) / 17]
            }
            Version::Micro(m) => {
                let m = m as usize;
                match self {
                    Mode::Numeric => 2 + m,
                    Mode::Alphanumeric => 1 + m,
                    Mode::Byte => 1 + m,
                    Mode::Kanji => m,
                    Mode::Eci => 0,
                }
            }
        }
    }
}

/// One encoded segment: mode, source character count, payload bits
/// (no mode indicator or count header)
#[derive(Debug, Clone)]
pub struct Segment {
    /// Data mode of this segment
    pub mode: Mode,
    /// Count of source characters/bytes before bit-packing
    pub char_count: usize,
    /// Big-endian payload bit stream
    pub bits: Vec<bool>,
}

impl Segment {
    /// Build a numeric segment from a digit string
    pub fn numeric(text: &str) -> Result<Self, EncodeError> {
        let (bits, char_count) = NumericEncoder::encode(text)?;
        Ok(Self {
            mode: Mode::Numeric,
            char_count,
            bits,
        })
    }

    /// Build an alphanumeric segment; lowercase input is rejected
    pub fn alphanumeric(text: &str) -> Result<Self, EncodeError> {
        let (bits, char_count) = AlphanumericEncoder::encode(text)?;
        Ok(Self {
            mode: Mode::Alphanumeric,
            char_count,
            bits,
        })
    }

    /// Build a byte segment from raw data
    pub fn bytes(data: &[u8]) -> Self {
        let (bits, char_count) = ByteEncoder::encode(data);
        Self {
            mode: Mode::Byte,
            char_count,
            bits,
        }
    }

    /// Build a kanji segment from Shift-JIS bytes
    pub fn kanji(data: &[u8]) -> Result<Self, EncodeError> {
        let (bits, char_count) = KanjiEncoder::encode(data)?;
        Ok(Self {
            mode: Mode::Kanji,
            char_count,
            bits,
        })
    }

    /// Pick the most compact mode that admits every character:
    /// Numeric, then Alphanumeric, then Byte (UTF-8).
    ///
    /// A string that is alphanumeric except for letter case is uppercased
    /// first; kanji is never chosen automatically.
    pub fn auto(text: &str) -> Self {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return Self::numeric(text).expect("digits are numeric-encodable");
        }
        let upper = text.to_uppercase();
        if !upper.is_empty() && is_alphanumeric(&upper) {
            return Self::alphanumeric(&upper).expect("charset was just checked");
        }
        Self::bytes(text.as_bytes())
    }

    /// Header (indicator + count) plus payload length for one version, or
    /// None when the mode or count does not fit the version
    pub fn encoded_len(&self, version: Version) -> Option<usize> {
        if !self.mode.supported_in(version) {
            return None;
        }
        let count_width = self.mode.count_width(version);
        if count_width < usize::BITS as usize && self.char_count >= 1 << count_width {
            return None;
        }
        let (_, indicator_width) = self.mode.indicator(version);
        Some(indicator_width + count_width + self.bits.len())
    }
}

/// Bits taken by an ECI header (regular symbols; single-byte assignment form)
const ECI_HEADER_BITS: usize = 4 + 8;

/// Pre-EC bit length of the segment sequence in a version, or None when a
/// segment cannot be expressed there
pub fn total_encoded_len(
    segments: &[Segment],
    version: Version,
    eci: Option<u32>,
) -> Option<usize> {
    let mut total = 0usize;
    if eci.is_some() {
        if version.is_micro() {
            return None;
        }
        total += ECI_HEADER_BITS;
    }
    for segment in segments {
        total += segment.encoded_len(version)?;
    }
    Some(total)
}

/// Assemble the padded data codeword stream for a version and level.
///
/// The caller has already verified the fit via [`total_encoded_len`]; an
/// overflow here is still reported as `DataOverflow` (without a proposal).
pub fn assemble(
    segments: &[Segment],
    version: Version,
    level: ECLevel,
    eci: Option<u32>,
) -> Result<Vec<u8>, EncodeError> {
    let capacity = data_bit_capacity(version, level)
        .unwrap_or_else(|| panic!("level {:?} unavailable in {:?}", level, version));
    let mut bb = BitBuffer::with_capacity(capacity);

    if let Some(assignment) = eci {
        debug_assert!(assignment < 128, "only the single-byte ECI form is emitted");
        let (value, width) = Mode::Eci.indicator(version);
        bb.append_bits(value, width);
        bb.append_bits(assignment, 8);
    }

    for segment in segments {
        let (value, width) = segment.mode.indicator(version);
        bb.append_bits(value, width);
        bb.append_bits(segment.char_count as u32, segment.mode.count_width(version));
        bb.append_slice(&segment.bits);
    }

    if bb.len() > capacity {
        return Err(EncodeError::DataOverflow { proposal: None });
    }

    // Terminator: up to T zero bits, fewer if the symbol is nearly full
    let terminator = match version {
        Version::Normal(_) => 4,
        Version::Micro(m) => 2 * m as usize + 1,
    };
    let terminator = terminator.min(capacity - bb.len());
    bb.append_bits(0, terminator);

    // Zero bits up to the next codeword boundary
    while bb.len() < capacity && bb.len() % 8 != 0 {
        bb.append_bits(0, 1);
    }

    // Alternating pad codewords; M1/M3 end on a short all-zero codeword
    let mut pad = [0xEC, 0x11].iter().cycle();
    while capacity - bb.len() >= 8 {
        bb.append_bits(*pad.next().expect("cycle never ends"), 8);
    }
    if bb.len() < capacity {
        bb.append_bits(0, capacity - bb.len());
    }

    debug_assert_eq!(bb.len(), capacity);
    Ok(bb.to_bytes())
}
