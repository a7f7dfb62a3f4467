//! Candidate extraction: turn PAM hits into filtered guide candidates.
//!
//! Cas12a guides sit 3' of the PAM on the same strand, so for a hit at
//! `[start, end)` the protospacer is `seq[end..end + guide_length]`.
//!
//! A candidate is kept only if:
//! - the full guide fits inside the sequence,
//! - its GC percentage (rounded to 2 decimals) lies in the inclusive range,
//! - it contains no disqualifying homopolymer (see [`crate::repeat`]).
//!
//! # Examples
//! ```
//! use cas12guide::extract::extract_candidates;
//! use cas12guide::pam::PamPattern;
//! use cas12guide::site::GcRange;
//! let pam = PamPattern::new("TTTN").unwrap();
//! let seq = b"TTTAGCTAGCTAGCTAGCTAGCTA";
//! let sites = extract_candidates(seq, &pam, 20, GcRange::default(), 3);
//! assert_eq!(sites.len(), 1);
//! assert_eq!(sites[0].span.to_string(), "1-24");
//! assert_eq!(sites[0].gc_content, 50.0);
//! ```
use tracing::debug;

use crate::pam::{find_motif_matches, PamPattern};
use crate::repeat::has_poly_repeat;
use crate::site::{CandidateSite, GcRange, Span};

/// Round to two decimal places, ties to even.
#[inline]
fn round2(x: f64) -> f64 { (x * 100.0).round_ties_even() / 100.0 }

/// GC percentage of `guide`, rounded to 2 decimals.
///
/// Only uppercase `G`/`C` count; the denominator is always the guide length.
/// An empty guide has 0 % GC.
pub fn gc_content(guide: &[u8]) -> f64 {
    if guide.is_empty() { return 0.0; }
    let gc = guide.iter().filter(|&&b| b == b'G' || b == b'C').count();
    round2(100.0 * gc as f64 / guide.len() as f64)
}

/// Extract guides adjacent to every PAM hit, in left-to-right PAM order.
pub fn extract_candidates(
    seq: &[u8],
    pattern: &PamPattern,
    guide_length: usize,
    gc_range: GcRange,
    max_repeat_length: usize,
) -> Vec<CandidateSite> {
    let mut out = Vec::new();
    let (mut truncated, mut off_gc, mut repeats) = (0usize, 0usize, 0usize);
    for (start, end) in find_motif_matches(seq, pattern) {
        let Some(guide_end) = end.checked_add(guide_length).filter(|&e| e <= seq.len()) else {
            truncated += 1;
            continue;
        };
        let guide = &seq[end..guide_end];
        let gc = gc_content(guide);
        if !gc_range.contains(gc) { off_gc += 1; continue; }
        if has_poly_repeat(guide, max_repeat_length) { repeats += 1; continue; }
        out.push(CandidateSite {
            guide: String::from_utf8_lossy(guide).into_owned(),
            pam: String::from_utf8_lossy(&seq[start..end]).into_owned(),
            span: Span::from_offsets(start, guide_end),
            gc_content: gc,
            gc_distance: None,
        });
    }
    debug!(kept = out.len(), truncated, off_gc, repeats, "extracted guide candidates");
    out
}

#[cfg(test)]
mod extract_tests {
    use super::*;

    fn tttn() -> PamPattern { PamPattern::new("TTTN").unwrap() }

    #[test]
    fn gc_content_counts_only_g_and_c() {
        assert_eq!(gc_content(b"GGCC"), 100.0);
        assert_eq!(gc_content(b"ACGT"), 50.0);
        assert_eq!(gc_content(b"ACGTNNNN"), 25.0);
        assert_eq!(gc_content(b"GCA"), 66.67);
        assert_eq!(gc_content(b""), 0.0);
    }

    #[test]
    fn repeat_laden_and_clean_windows() {
        let seq = b"TTTAGGGGCCCCAAAATTTTACGTACGTACGTACGTGGCC";
        let sites = extract_candidates(seq, &tttn(), 20, GcRange::default(), 3);
        // First PAM's guide has GGGG/CCCC/AAAA runs, the second PAM (TTTT at 16) is
        // followed by ACGTACGT...GGCC: 40 chars total, guide 20..40 fits exactly.
        assert_eq!(sites.len(), 1);
        let s = &sites[0];
        assert_eq!(s.pam, "TTTT");
        assert_eq!(s.guide, "ACGTACGTACGTACGTGGCC");
        assert_eq!(s.span.to_string(), "17-40");
        assert_eq!(s.gc_content, 60.0);
        for s in &sites {
            assert_eq!(s.guide.len(), 20);
            assert!(GcRange::default().contains(s.gc_content));
            assert!(!has_poly_repeat(s.guide.as_bytes(), 3));
        }
    }

    #[test]
    fn guide_running_past_end_is_skipped() {
        // PAM + 17 bases only.
        let seq = b"TTTAACGTACGTACGTACGTA";
        assert_eq!(seq.len(), 4 + 17);
        assert!(extract_candidates(seq, &tttn(), 20, GcRange::default(), 3).is_empty());
        assert!(extract_candidates(b"", &tttn(), 20, GcRange::default(), 3).is_empty());
    }

    #[test]
    fn huge_guide_length_is_treated_as_truncated() {
        let sites = extract_candidates(b"TTTAACGT", &tttn(), usize::MAX, GcRange::new(0.0, 100.0), 3);
        assert!(sites.is_empty());
        let sites = extract_candidates(b"TTTAACGT", &tttn(), usize::MAX - 2, GcRange::new(0.0, 100.0), 3);
        assert!(sites.is_empty());
    }

    #[test]
    fn exact_halves_round_to_even() {
        // 1 of 32 = 3.125 %, 3 of 32 = 9.375 %
        let mut guide = vec![b'A'; 32];
        guide[5] = b'C';
        assert_eq!(gc_content(&guide), 3.12);
        guide[6] = b'G';
        guide[7] = b'G';
        assert_eq!(gc_content(&guide), 9.38);
    }

    #[test]
    fn gc_outside_range_is_skipped() {
        // 19 nt guide with 7 G/C = 36.84 % GC.
        let seq = b"TTTGACATGACATGACATGACAT";
        let sites = extract_candidates(seq, &tttn(), 19, GcRange::default(), 3);
        assert!(sites.is_empty());
        let wide = extract_candidates(seq, &tttn(), 19, GcRange::new(0.0, 100.0), 3);
        assert_eq!(wide.len(), 1);
    }

    #[test]
    fn homopolymer_guides_are_skipped() {
        let clean = b"TTTAGCAGCAGCAGCAGCAGCAG";
        let dirty = b"TTTAGCAGGGGCAGCAGCAGCAG";
        assert_eq!(extract_candidates(clean, &tttn(), 19, GcRange::new(0.0, 100.0), 3).len(), 1);
        assert!(extract_candidates(dirty, &tttn(), 19, GcRange::new(0.0, 100.0), 3).is_empty());
        // A looser setting tolerates the GGGG run.
        assert_eq!(extract_candidates(dirty, &tttn(), 19, GcRange::new(0.0, 100.0), 4).len(), 1);
    }

    #[test]
    fn candidates_follow_pam_order() {
        let guide = "ACGTACGTACGTACGTACGA";
        let seq = format!("TTTA{g}TTTC{g}", g = guide);
        let sites = extract_candidates(seq.as_bytes(), &tttn(), 20, GcRange::default(), 3);
        let spans: Vec<String> = sites.iter().map(|s| s.span.to_string()).collect();
        assert_eq!(spans, vec!["1-24", "25-48"]);
        assert_eq!(sites[1].pam, "TTTC");
    }
}
