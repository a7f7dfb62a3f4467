//! Homopolymer screening for guide candidates.
//!
//! Long single-base runs (e.g. `TTTT`) terminate Pol III transcription and
//! reduce crRNA yield, so guides containing them are dropped.
//!
//! # Threshold
//! `run_length` is the longest run that is still **tolerated**: the detector
//! looks for `run_length + 1` identical consecutive bases. With the default of
//! 3, `AAA` passes and `AAAA` is rejected.
//!
//! ```
//! use cas12guide::repeat::has_poly_repeat;
//! assert!(!has_poly_repeat(b"ACGAAAGT", 3));
//! assert!(has_poly_repeat(b"ACGAAAAT", 3));
//! ```

/// Return `true` if `seq` contains `run_length + 1` identical consecutive characters.
///
/// Sequences no longer than `run_length` and a `run_length` of zero never match.
pub fn has_poly_repeat(seq: &[u8], run_length: usize) -> bool {
    if run_length == 0 || seq.len() <= run_length { return false; }
    seq.windows(run_length + 1)
        .any(|w| w.iter().all(|&b| b == w[0]))
}
