//! Main QR encoder that orchestrates the encoding pipeline.
//!
//! Validation is front-loaded: version bounds, mode/version and
//! level/version compatibility, ECI restrictions and the mask range are all
//! checked before any bit is emitted. After that the pipeline is
//! segments -> bit stream -> codewords -> blocks+EC -> matrix -> mask ->
//! format info, with no partial output on failure.

use log::debug;

use crate::encoder::blocks::build_codeword_stream;
use crate::encoder::format::write_format_info;
use crate::encoder::function_patterns::FunctionPatterns;
use crate::encoder::mask::{
    apply_mask, candidate_masks, micro_penalty_score, penalty_score,
};
use crate::encoder::placement::place_data;
use crate::encoder::segment::{assemble, total_encoded_len, Segment};
use crate::encoder::tables::{data_bit_capacity, version_search_order};
use crate::error::EncodeError;
use crate::models::{ECLevel, MaskPattern, QRCode, Version};
use crate::EncodeOptions;

/// Drives one encode call from validated options to a finished symbol
pub struct QrEncoder<'a> {
    options: &'a EncodeOptions,
}

impl<'a> QrEncoder<'a> {
    /// Create an encoder over a set of options
    pub fn new(options: &'a EncodeOptions) -> Self {
        Self { options }
    }

    /// Encode pre-built segments into a symbol
    pub fn encode_segments(&self, segments: &[Segment]) -> Result<QRCode, EncodeError> {
        self.validate(segments)?;
        let eci = self.eci_assignment();

        let (version, mut level) = self.select_version(segments, eci)?;
        if self.options.boost_error {
            level = boost_level(segments, version, level, eci);
        }
        debug!(
            "selected {:?} at level {:?} for {} segment(s)",
            version,
            level,
            segments.len()
        );

        let data = assemble(segments, version, level, eci)?;
        let stream = build_codeword_stream(&data, version, level);

        let patterns = FunctionPatterns::new(version);
        let mut modules = patterns.modules.clone();
        place_data(&mut modules, &patterns.reserved, &stream, version);

        let mask = self.select_mask(&mut modules, &patterns, version, level)?;
        apply_mask(&mut modules, &patterns.reserved, mask);
        write_format_info(&mut modules, version, level, mask);
        debug!("applied mask pattern {}", mask.value());

        Ok(QRCode {
            modules,
            version,
            error_level: level,
            mask,
        })
    }

    /// Front-loaded validation of every option combination
    fn validate(&self, segments: &[Segment]) -> Result<(), EncodeError> {
        let opts = self.options;

        if let Some(version) = opts.version {
            if !version.is_valid() {
                return Err(EncodeError::InvalidVersion(format!(
                    "version {} out of range for its family",
                    version.number()
                )));
            }
            match opts.micro {
                Some(true) if !version.is_micro() => {
                    return Err(EncodeError::InvalidVersion(format!(
                        "micro symbol required but version {} was forced",
                        version.number()
                    )));
                }
                Some(false) if version.is_micro() => {
                    return Err(EncodeError::InvalidVersion(format!(
                        "micro symbols forbidden but version M{} was forced",
                        version.number()
                    )));
                }
                _ => {}
            }
            if !version.admits_level(opts.error_level) {
                return Err(EncodeError::InvalidErrorLevel(format!(
                    "level {:?} is not available in {}{}",
                    opts.error_level,
                    if version.is_micro() { "M" } else { "version " },
                    version.number()
                )));
            }
            for segment in segments {
                if !segment.mode.supported_in(version) {
                    return Err(EncodeError::InvalidMode(format!(
                        "{:?} mode is not available in {}{}",
                        segment.mode,
                        if version.is_micro() { "M" } else { "version " },
                        version.number()
                    )));
                }
            }
        }

        if let Some(mask) = opts.mask {
            let limit: u8 = if self.micro_target() { 3 } else { 7 };
            if mask > limit {
                return Err(EncodeError::InvalidMask(format!(
                    "mask {} out of range 0..={}",
                    mask, limit
                )));
            }
        }

        if opts.eci {
            if self.micro_target() {
                return Err(EncodeError::InvalidMode(
                    "ECI headers are not available in micro symbols".into(),
                ));
            }
            if !opts.encoding.eq_ignore_ascii_case("utf-8") {
                return Err(EncodeError::InvalidMode(format!(
                    "no ECI assignment for encoding {:?}",
                    opts.encoding
                )));
            }
        }

        Ok(())
    }

    /// Whether the options pin the output to the micro family
    fn micro_target(&self) -> bool {
        self.options.micro == Some(true)
            || matches!(self.options.version, Some(v) if v.is_micro())
    }

    fn eci_assignment(&self) -> Option<u32> {
        // 26 = UTF-8; the only assignment this encoder emits
        self.options.eci.then_some(26)
    }

    /// Forced version check or smallest-fit search
    fn select_version(
        &self,
        segments: &[Segment],
        eci: Option<u32>,
    ) -> Result<(Version, ECLevel), EncodeError> {
        let level = self.options.error_level;

        if let Some(version) = self.options.version {
            if fits(segments, version, level, eci) {
                return Ok((version, level));
            }
            let proposal = version_search_order(version.is_micro() || self.micro_target())
                .into_iter()
                .find(|&v| v.admits_level(level) && fits(segments, v, level, eci));
            return Err(EncodeError::DataOverflow { proposal });
        }

        let micro_allowed = self.options.micro == Some(true);
        version_search_order(micro_allowed)
            .into_iter()
            .find(|&v| v.admits_level(level) && fits(segments, v, level, eci))
            .map(|v| (v, level))
            .ok_or(EncodeError::DataOverflow { proposal: None })
    }

    /// Forced mask lookup or best-by-penalty trial over all candidates
    fn select_mask(
        &self,
        modules: &mut crate::models::BitMatrix,
        patterns: &FunctionPatterns,
        version: Version,
        level: ECLevel,
    ) -> Result<MaskPattern, EncodeError> {
        if let Some(index) = self.options.mask {
            let pattern = if version.is_micro() {
                MaskPattern::from_micro_bits(index)
            } else {
                MaskPattern::from_bits(index)
            };
            return pattern.ok_or_else(|| {
                EncodeError::InvalidMask(format!("mask {} out of range", index))
            });
        }

        let mut best: Option<(MaskPattern, u32)> = None;
        for &pattern in candidate_masks(version) {
            apply_mask(modules, &patterns.reserved, pattern);
            write_format_info(modules, version, level, pattern);
            let score = if version.is_micro() {
                micro_penalty_score(modules)
            } else {
                penalty_score(modules)
            };
            apply_mask(modules, &patterns.reserved, pattern);
            if best.map_or(true, |(_, best_score)| score < best_score) {
                best = Some((pattern, score));
            }
        }
        let (pattern, score) = best.expect("at least one candidate mask");
        debug!("mask {} scored {}", pattern.value(), score);
        Ok(pattern)
    }
}

/// Whether the segment sequence fits (version, level)
fn fits(segments: &[Segment], version: Version, level: ECLevel, eci: Option<u32>) -> bool {
    match (
        total_encoded_len(segments, version, eci),
        data_bit_capacity(version, level),
    ) {
        (Some(len), Some(capacity)) => len <= capacity,
        _ => false,
    }
}

/// Promote the level stepwise while the chosen version still fits;
/// the version itself never changes
fn boost_level(
    segments: &[Segment],
    version: Version,
    mut level: ECLevel,
    eci: Option<u32>,
) -> ECLevel {
    while let Some(next) = level.stronger() {
        if version.admits_level(next) && fits(segments, version, next, eci) {
            level = next;
        } else {
            break;
        }
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_options() -> EncodeOptions {
        EncodeOptions::default()
    }

    #[test]
    fn test_smallest_version_wins() {
        let segments = [Segment::auto("HELLO WORLD")];
        let options = EncodeOptions {
            boost_error: false,
            ..default_options()
        };
        let (version, level) = QrEncoder::new(&options)
            .select_version(&segments, None)
            .unwrap();
        assert_eq!(version, Version::Normal(1));
        assert_eq!(level, ECLevel::L);
    }

    #[test]
    fn test_micro_search_skips_m1() {
        // 17 + 4 bits fit M1 exactly, but auto-selection starts at M2
        let segments = [Segment::numeric("12345").unwrap()];
        let options = EncodeOptions {
            micro: Some(true),
            ..default_options()
        };
        let (version, _) = QrEncoder::new(&options)
            .select_version(&segments, None)
            .unwrap();
        assert_eq!(version, Version::Micro(2));
    }

    #[test]
    fn test_forced_version_overflow_proposes_fit() {
        let segments = [Segment::bytes(&[0xAB; 100])];
        let options = EncodeOptions {
            version: Some(Version::Normal(1)),
            ..default_options()
        };
        let err = QrEncoder::new(&options)
            .select_version(&segments, None)
            .unwrap_err();
        // 100 bytes at L need version 5 (native capacity 108 codewords)
        assert_eq!(
            err,
            EncodeError::DataOverflow {
                proposal: Some(Version::Normal(5))
            }
        );
    }

    #[test]
    fn test_boost_stops_at_version_capacity() {
        // 74 bits: version 1 holds it at L, M and Q but not H (72 bits)
        let segments = [Segment::alphanumeric("HELLO WORLD").unwrap()];
        let level = boost_level(&segments, Version::Normal(1), ECLevel::L, None);
        assert_eq!(level, ECLevel::Q);
    }

    #[test]
    fn test_boost_respects_micro_levels() {
        let segments = [Segment::numeric("123").unwrap()];
        // M2 tops out at level M even though the data is tiny
        let level = boost_level(&segments, Version::Micro(2), ECLevel::L, None);
        assert_eq!(level, ECLevel::M);
        // M1 has nothing to boost into
        let level = boost_level(&segments, Version::Micro(1), ECLevel::L, None);
        assert_eq!(level, ECLevel::L);
    }

    #[test]
    fn test_validation_rejects_bad_combinations() {
        let segments = [Segment::numeric("1").unwrap()];

        let options = EncodeOptions {
            version: Some(Version::Normal(41)),
            ..default_options()
        };
        assert!(matches!(
            QrEncoder::new(&options).encode_segments(&segments),
            Err(EncodeError::InvalidVersion(_))
        ));

        let options = EncodeOptions {
            version: Some(Version::Micro(2)),
            error_level: ECLevel::H,
            ..default_options()
        };
        assert!(matches!(
            QrEncoder::new(&options).encode_segments(&segments),
            Err(EncodeError::InvalidErrorLevel(_))
        ));

        let options = EncodeOptions {
            micro: Some(true),
            mask: Some(5),
            ..default_options()
        };
        assert!(matches!(
            QrEncoder::new(&options).encode_segments(&segments),
            Err(EncodeError::InvalidMask(_))
        ));

        let options = EncodeOptions {
            eci: true,
            version: Some(Version::Micro(4)),
            ..default_options()
        };
        assert!(matches!(
            QrEncoder::new(&options).encode_segments(&segments),
            Err(EncodeError::InvalidMode(_))
        ));

        let options = EncodeOptions {
            version: Some(Version::Micro(2)),
            ..default_options()
        };
        let byte_segments = [Segment::bytes(b"x")];
        assert!(matches!(
            QrEncoder::new(&options).encode_segments(&byte_segments),
            Err(EncodeError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_forced_micro_version_m1() {
        let segments = [Segment::numeric("12345").unwrap()];
        let options = EncodeOptions {
            version: Some(Version::Micro(1)),
            boost_error: false,
            ..default_options()
        };
        let code = QrEncoder::new(&options).encode_segments(&segments).unwrap();
        assert_eq!(code.version, Version::Micro(1));
        assert_eq!(code.size(), 11);
        assert_eq!(code.error_level, ECLevel::L);
    }
}
