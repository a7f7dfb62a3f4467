//! Core types for **candidate sites**, **GC windows** and **scan parameters**.
//!
//! This module holds the data model shared by the scanner, the extractor and the
//! ranker. Candidate sites own their strings; nothing here borrows from the
//! scanned sequence, so a result list outlives the input it was derived from.
//!
//! # Coordinates
//! Scanning works in 0-based half-open offsets. Reported [`Span`]s are converted
//! to **1-based inclusive** coordinates covering the PAM and the guide, which is
//! what genome browsers and NCBI records display.
use core::fmt;

use serde::Serialize;

/// Default Cas12a PAM (5'-TTTV-3' family, written with the permissive `N`).
pub const DEFAULT_PAM: &str = "TTTN";
/// Default protospacer length in nucleotides.
pub const DEFAULT_GUIDE_LENGTH: usize = 20;
/// Default maximum homopolymer setting (see [`crate::repeat::has_poly_repeat`]).
pub const DEFAULT_MAX_REPEAT: usize = 3;
/// Default number of ranked guides to report.
pub const DEFAULT_TOP_N: usize = 5;
/// Composition target used by the ranker.
pub const IDEAL_GC: f64 = 50.0;

/// 1-based inclusive range covering PAM + guide (e.g. `"1-24"`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Span {
    /// First base of the PAM, 1-based.
    pub start: usize,
    /// Last base of the guide, 1-based inclusive.
    pub end: usize,
}

impl Span {
    /// Build a span from a 0-based PAM start and the 0-based exclusive guide end.
    pub fn from_offsets(pam_start: usize, guide_end: usize) -> Self {
        Span { start: pam_start + 1, end: guide_end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}-{}", self.start, self.end) }
}

/// Inclusive GC window in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GcRange {
    pub low: f64,
    pub high: f64,
}

impl GcRange {
    pub const fn new(low: f64, high: f64) -> Self { GcRange { low, high } }

    /// `true` if `gc` lies within `[low, high]`.
    #[inline]
    pub fn contains(&self, gc: f64) -> bool { self.low <= gc && gc <= self.high }
}

impl Default for GcRange {
    fn default() -> Self { GcRange::new(40.0, 70.0) }
}

impl fmt::Display for GcRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}-{}%", self.low, self.high) }
}

/// A guide-RNA candidate found next to a PAM.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandidateSite {
    /// Protospacer immediately 3' of the PAM.
    pub guide: String,
    /// The matched PAM instance (e.g. `"TTTA"`).
    pub pam: String,
    /// PAM + guide footprint in 1-based coordinates.
    pub span: Span,
    /// GC percentage of the guide, rounded to 2 decimals.
    pub gc_content: f64,
    /// `|gc_content - 50|`; populated by [`crate::rank::select_top`].
    pub gc_distance: Option<f64>,
}

/// Parameters for a single scan. Defaults follow common Cas12a (AsCas12a/LbCas12a) practice.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanParams {
    /// PAM template; `N` and the other IUPAC codes are wildcards.
    pub pam: String,
    pub guide_length: usize,
    pub gc_range: GcRange,
    /// Homopolymer setting; a guide is rejected on `max_repeat_length + 1` identical bases.
    pub max_repeat_length: usize,
    pub top_n: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        ScanParams {
            pam: DEFAULT_PAM.to_string(),
            guide_length: DEFAULT_GUIDE_LENGTH,
            gc_range: GcRange::default(),
            max_repeat_length: DEFAULT_MAX_REPEAT,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ScanParams {
    /// Reject configurations that can never produce a meaningful scan.
    ///
    /// Data-dependent conditions (empty sequence, `top_n == 0`, no PAM hits) are
    /// not errors; they simply yield no candidates.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.guide_length > 0, "guide length must be at least 1");
        anyhow::ensure!(
            self.gc_range.low <= self.gc_range.high,
            "GC range is inverted: {} > {}",
            self.gc_range.low,
            self.gc_range.high
        );
        Ok(())
    }
}
