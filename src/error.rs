//! Error surface of the encoder.
//!
//! Every failure of an encode call is one [`EncodeError`] variant carrying a
//! human-readable message. Validation problems are reported before any
//! encoding work; capacity overflow is detected after segment assembly and
//! carries the smallest version that would have fit, so callers can retry
//! without recomputing it.

use crate::models::Version;
use thiserror::Error;

/// Errors that can occur while encoding a QR code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The payload does not fit the requested (or any) symbol.
    ///
    /// `proposal` is the smallest version that would fit the payload at the
    /// requested error correction level, or `None` if none does.
    #[error("data does not fit the symbol{}", proposal_suffix(.proposal))]
    DataOverflow {
        /// Smallest version that would accommodate the payload, if any
        proposal: Option<Version>,
    },
    /// The requested version is out of range or incompatible with `micro`.
    #[error("invalid version: {0}")]
    InvalidVersion(String),
    /// The requested mode cannot encode the payload or is not available in
    /// the requested version.
    #[error("invalid mode: {0}")]
    InvalidMode(String),
    /// The requested error correction level is not available in the
    /// requested version.
    #[error("invalid error correction level: {0}")]
    InvalidErrorLevel(String),
    /// The requested mask index is outside the symbol family's range.
    #[error("invalid mask: {0}")]
    InvalidMask(String),
}

fn proposal_suffix(proposal: &Option<Version>) -> String {
    match proposal {
        Some(Version::Normal(v)) => format!(" (smallest version that fits: {})", v),
        Some(Version::Micro(v)) => format!(" (smallest version that fits: M{})", v),
        None => String::new(),
    }
}
