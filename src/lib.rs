#![forbid(unsafe_code)]
//! # cas12guide
//!
//! Find **Cas12a guide-RNA** target sites in a DNA sequence, filter them by
//! composition and rank the survivors by GC balance.
//!
//! ## Pipeline
//! 1. [`pam`] scans for a degenerate PAM (default `TTTN`), non-overlapping, left to right.
//! 2. [`extract`] takes the protospacer 3' of each PAM and keeps it if it fits in the
//!    sequence, has GC within range and carries no homopolymer ([`repeat`]).
//! 3. [`rank`] orders candidates by `|GC - 50|` (stable) and keeps the top N.
//!
//! Retrieval ([`fetch`], [`seqio`]) and rendering ([`report`]) live next to the
//! core but are never called by it.
//!
//! ## Examples
//! ```rust
//! use cas12guide::{run, ScanParams};
//! let seq = "TTTAGGGGCCCCAAAATTTTACGTACGTACGTACGTGGCC";
//! let top = run(seq, &ScanParams::default()).unwrap();
//! assert_eq!(top.len(), 1);
//! assert_eq!(top[0].span.to_string(), "17-40");
//! assert_eq!(top[0].gc_distance, Some(10.0));
//! ```

pub mod site;
pub mod repeat;
pub mod pam;
pub mod extract;
pub mod rank;
pub mod seqio;
pub mod fetch;
pub mod report;
pub mod logging;

use tracing::info;

pub use site::{CandidateSite, GcRange, ScanParams, Span};
pub use pam::PamPattern;

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scan `seq` (uppercase nucleotides) and return the ranked top guides.
///
/// Fails only on invalid parameters (bad PAM, zero guide length, inverted GC
/// range). A sequence with no qualifying site yields an empty list.
pub fn run(seq: impl AsRef<[u8]>, params: &ScanParams) -> anyhow::Result<Vec<CandidateSite>> {
    params.validate()?;
    let pattern = PamPattern::new(&params.pam)?;
    let seq = seq.as_ref();
    let candidates = extract::extract_candidates(
        seq,
        &pattern,
        params.guide_length,
        params.gc_range,
        params.max_repeat_length,
    );
    let n_candidates = candidates.len();
    let top = rank::select_top(candidates, params.top_n);
    info!(len = seq.len(), pam = %pattern, candidates = n_candidates, reported = top.len(), "scan finished");
    Ok(top)
}

/// Raw PAM hits as 1-based inclusive `(start, end, motif)` rows (for CLI/UX).
pub fn pam_hits(seq: impl AsRef<[u8]>, pam: &str) -> anyhow::Result<Vec<(usize, usize, String)>> {
    let pattern = PamPattern::new(pam)?;
    let seq = seq.as_ref();
    Ok(pam::find_motif_matches(seq, &pattern)
        .map(|(s, e)| (s + 1, e, String::from_utf8_lossy(&seq[s..e]).into_owned()))
        .collect())
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    const GUIDE_A: &str = "ACGTACGTACGTACGTACGA"; // 50 %
    const GUIDE_B: &str = "GCAGCAGCAGCAGCAGCAGA"; // 65 %
    const GUIDE_C: &str = "ACATGACAGGCACATGACAA"; // 45 %

    #[test]
    fn ranks_by_distance_from_fifty() {
        let seq = format!("TTTA{GUIDE_B}TTTC{GUIDE_C}TTTG{GUIDE_A}");
        let top = run(&seq, &ScanParams::default()).unwrap();
        let guides: Vec<&str> = top.iter().map(|c| c.guide.as_str()).collect();
        assert_eq!(guides, vec![GUIDE_A, GUIDE_C, GUIDE_B]);
        assert_eq!(top[0].span.to_string(), "49-72");
        assert!(top.iter().all(|c| c.gc_distance.is_some()));
    }

    #[test]
    fn top_n_limits_output() {
        let seq = format!("TTTA{GUIDE_B}TTTC{GUIDE_C}TTTG{GUIDE_A}");
        let params = ScanParams { top_n: 2, ..ScanParams::default() };
        assert_eq!(run(&seq, &params).unwrap().len(), 2);
        let params = ScanParams { top_n: 0, ..ScanParams::default() };
        assert!(run(&seq, &params).unwrap().is_empty());
    }

    #[test]
    fn ties_keep_sequence_order() {
        // Both guides are 50 % GC.
        let other = "TGCATGCATGCATGCATGCA";
        let seq = format!("TTTA{GUIDE_A}TTTC{other}");
        let top = run(&seq, &ScanParams::default()).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].guide, GUIDE_A);
        assert_eq!(top[1].guide, other);
    }

    #[test]
    fn short_or_empty_sequences_yield_nothing() {
        assert!(run("", &ScanParams::default()).unwrap().is_empty());
        assert!(run("TTTAACGTACG", &ScanParams::default()).unwrap().is_empty());
    }

    #[test]
    fn all_off_gc_yields_empty() {
        let seq = "TTTAATATATATATATATATATAT";
        assert!(run(seq, &ScanParams::default()).unwrap().is_empty());
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        let seq = format!("TTTA{GUIDE_A}");
        assert!(run(&seq, &ScanParams { pam: "TTZN".into(), ..ScanParams::default() }).is_err());
        assert!(run(&seq, &ScanParams { guide_length: 0, ..ScanParams::default() }).is_err());
        let inverted = ScanParams { gc_range: GcRange::new(80.0, 20.0), ..ScanParams::default() };
        assert!(run(&seq, &inverted).is_err());
    }

    #[test]
    fn pam_hits_are_one_based() {
        let hits = pam_hits("GTTTACCTTTTT", "TTTN").unwrap();
        assert_eq!(hits, vec![(2, 5, "TTTA".to_string()), (8, 11, "TTTT".to_string())]);
    }
}
