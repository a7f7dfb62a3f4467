//! Ranking of guide candidates by GC balance.
//!
//! Guides closest to 50 % GC come first. The sort is **stable**, so candidates
//! with equal distance keep their left-to-right discovery order.
use crate::site::{CandidateSite, IDEAL_GC};

/// Annotate `gc_distance`, sort ascending by it and keep at most `top_n` entries.
pub fn select_top(mut candidates: Vec<CandidateSite>, top_n: usize) -> Vec<CandidateSite> {
    for c in candidates.iter_mut() {
        c.gc_distance = Some((c.gc_content - IDEAL_GC).abs());
    }
    // Vec::sort_by is stable.
    candidates.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
    candidates.truncate(top_n);
    candidates
}

#[inline]
fn distance(c: &CandidateSite) -> f64 { c.gc_distance.unwrap_or(f64::INFINITY) }
