use super::BitMatrix;

/// QR code version: Normal 1-40 or Micro M1-M4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// Model 2 QR code (versions 1-40)
    Normal(u8),
    /// Micro QR code (versions M1-M4)
    Micro(u8),
}

impl Version {
    /// Get the version number (1-40 for normal, 1-4 for micro)
    pub fn number(&self) -> u8 {
        match self {
            Version::Normal(v) | Version::Micro(v) => *v,
        }
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        match self {
            Version::Normal(v) => 4 * (*v as usize) + 17,
            Version::Micro(v) => 2 * (*v as usize) + 9,
        }
    }

    /// Check if this is a Micro QR code
    pub fn is_micro(&self) -> bool {
        matches!(self, Version::Micro(_))
    }

    /// Whether the version number is within the family's range
    pub fn is_valid(&self) -> bool {
        match self {
            Version::Normal(v) => (1..=40).contains(v),
            Version::Micro(v) => (1..=4).contains(v),
        }
    }

    /// Whether this version can carry the given error correction level.
    ///
    /// M1 has a fixed error-detection-only layout, surfaced as `L`.
    /// M2 and M3 stop at `M`, M4 at `Q`; normal versions take all four.
    pub fn admits_level(&self, level: ECLevel) -> bool {
        match self {
            Version::Normal(_) => true,
            Version::Micro(1) => level == ECLevel::L,
            Version::Micro(2) | Version::Micro(3) => level <= ECLevel::M,
            Version::Micro(4) => level <= ECLevel::Q,
            Version::Micro(_) => false,
        }
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// Table row index (L=0, M=1, Q=2, H=3)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The two format-information bits for this level (00=M, 01=L, 10=H, 11=Q)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 1,
            ECLevel::M => 0,
            ECLevel::Q => 3,
            ECLevel::H => 2,
        }
    }

    /// The next stronger level, if any
    pub fn stronger(&self) -> Option<ECLevel> {
        match self {
            ECLevel::L => Some(ECLevel::M),
            ECLevel::M => Some(ECLevel::Q),
            ECLevel::Q => Some(ECLevel::H),
            ECLevel::H => None,
        }
    }
}

/// Mask pattern (0-7), predicates per the ISO mask table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPattern {
    /// (r + c) % 2 == 0
    Pattern0 = 0,
    /// r % 2 == 0
    Pattern1 = 1,
    /// c % 3 == 0
    Pattern2 = 2,
    /// (r + c) % 3 == 0
    Pattern3 = 3,
    /// (r/2 + c/3) % 2 == 0
    Pattern4 = 4,
    /// (r*c)%2 + (r*c)%3 == 0
    Pattern5 = 5,
    /// ((r*c)%2 + (r*c)%3) % 2 == 0
    Pattern6 = 6,
    /// ((r+c)%2 + (r*c)%3) % 2 == 0
    Pattern7 = 7,
}

/// The four micro mask candidates, in micro numbering order 0..3
pub const MICRO_MASKS: [MaskPattern; 4] = [
    MaskPattern::Pattern1,
    MaskPattern::Pattern4,
    MaskPattern::Pattern6,
    MaskPattern::Pattern7,
];

impl MaskPattern {
    /// Get mask pattern from its normal-QR index
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(MaskPattern::Pattern0),
            1 => Some(MaskPattern::Pattern1),
            2 => Some(MaskPattern::Pattern2),
            3 => Some(MaskPattern::Pattern3),
            4 => Some(MaskPattern::Pattern4),
            5 => Some(MaskPattern::Pattern5),
            6 => Some(MaskPattern::Pattern6),
            7 => Some(MaskPattern::Pattern7),
            _ => None,
        }
    }

    /// Get mask pattern from its micro-QR index (0..3)
    pub fn from_micro_bits(bits: u8) -> Option<Self> {
        MICRO_MASKS.get(bits as usize).copied()
    }

    /// Normal-QR pattern index
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Micro-QR pattern index, if this pattern is a micro candidate
    pub fn micro_value(&self) -> Option<u8> {
        MICRO_MASKS.iter().position(|m| m == self).map(|i| i as u8)
    }

    /// Check if the module at (row, col) should be flipped by this mask
    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        let (r, c) = (row, col);
        match self {
            MaskPattern::Pattern0 => (r + c) % 2 == 0,
            MaskPattern::Pattern1 => r % 2 == 0,
            MaskPattern::Pattern2 => c % 3 == 0,
            MaskPattern::Pattern3 => (r + c) % 3 == 0,
            MaskPattern::Pattern4 => (r / 2 + c / 3) % 2 == 0,
            MaskPattern::Pattern5 => (r * c) % 2 + (r * c) % 3 == 0,
            MaskPattern::Pattern6 => ((r * c) % 2 + (r * c) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((r + c) % 2 + (r * c) % 3) % 2 == 0,
        }
    }
}

/// Encoded QR code symbol
///
/// The module matrix is the sole externally observable artifact of the
/// encoder; consumers (image renderers, string-art debuggers) read it
/// through `get` or `modules`.
#[derive(Debug, Clone)]
pub struct QRCode {
    /// Module matrix (true = dark, false = light)
    pub modules: BitMatrix,
    /// Symbol version
    pub version: Version,
    /// Error correction level actually applied (after any boost)
    pub error_level: ECLevel,
    /// Mask pattern applied to the data region
    pub mask: MaskPattern,
}

impl QRCode {
    /// Side length in modules
    pub fn size(&self) -> usize {
        self.version.size()
    }

    /// Whether this is a Micro QR symbol
    pub fn is_micro(&self) -> bool {
        self.version.is_micro()
    }

    /// Mask index in the symbol family's own numbering (0..7 normal, 0..3 micro)
    pub fn mask_index(&self) -> u8 {
        if self.is_micro() {
            self.mask.micro_value().unwrap_or(0)
        } else {
            self.mask.value()
        }
    }

    /// Module color at (x, y); x is the column, y is the row
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Render the symbol as string art, two characters per module
    pub fn to_string_art(&self) -> String {
        let size = self.size();
        let mut out = String::with_capacity((size * 2 + 1) * size);
        for y in 0..size {
            for x in 0..size {
                out.push_str(if self.get(x, y) { "██" } else { "  " });
            }
            out.push('\n');
        }
        out
    }
}
