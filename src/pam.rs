//! PAM pattern compilation and motif scanning.
//!
//! A PAM template such as `TTTN` is compiled once into a per-position base
//! class (a 4-bit mask over A/C/G/T). Scanning then tests each offset against
//! the classes, with no regex engine involved.
//!
//! # Overlap policy
//! Matches are **non-overlapping**: after a hit at `[start, end)` the scan
//! resumes at `end`. In `TTTTA` the PAM `TTTT` at offset 0 is reported, but the
//! overlapping `TTTA` at offset 1 is not. Guides downstream of such shadowed
//! PAMs are a known blind spot of this scanner.
//!
//! # Examples
//! ```
//! use cas12guide::pam::{find_motif_matches, PamPattern};
//! let pam = PamPattern::new("TTTN").unwrap();
//! let hits: Vec<_> = find_motif_matches(b"GTTTACCTTTG", &pam).collect();
//! assert_eq!(hits, vec![(1, 5), (7, 11)]);
//! ```
use core::fmt;
use std::str::FromStr;

const A: u8 = 0b0001;
const C: u8 = 0b0010;
const G: u8 = 0b0100;
const T: u8 = 0b1000;

/// IUPAC nucleotide code -> base class mask.
fn iupac_mask(code: u8) -> Option<u8> {
    let m = match code {
        b'A' => A,
        b'C' => C,
        b'G' => G,
        b'T' => T,
        b'R' => A | G,
        b'Y' => C | T,
        b'S' => C | G,
        b'W' => A | T,
        b'K' => G | T,
        b'M' => A | C,
        b'B' => C | G | T,
        b'D' => A | G | T,
        b'H' => A | C | T,
        b'V' => A | C | G,
        b'N' => A | C | G | T,
        _ => return None,
    };
    Some(m)
}

/// Mask for a sequence byte. Only uppercase A/C/G/T can satisfy a class.
#[inline]
fn base_mask(b: u8) -> u8 {
    match b {
        b'A' => A,
        b'C' => C,
        b'G' => G,
        b'T' => T,
        _ => 0,
    }
}

/// A compiled PAM template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PamPattern {
    template: String,
    classes: Vec<u8>,
}

impl PamPattern {
    /// Compile a template. Letters are uppercased; anything outside the IUPAC
    /// DNA alphabet, and the empty template, is rejected.
    pub fn new(template: &str) -> anyhow::Result<Self> {
        let template = template.trim().to_ascii_uppercase();
        anyhow::ensure!(!template.is_empty(), "PAM pattern is empty");
        let classes = template.bytes()
            .map(|b| iupac_mask(b).ok_or_else(|| anyhow::anyhow!("invalid PAM symbol {:?} in {:?}", b as char, template)))
            .collect::<anyhow::Result<Vec<u8>>>()?;
        Ok(PamPattern { template, classes })
    }

    /// Number of bases a match spans.
    pub fn len(&self) -> usize { self.classes.len() }

    pub fn is_empty(&self) -> bool { self.classes.is_empty() }

    /// The normalised template text.
    pub fn as_str(&self) -> &str { &self.template }

    /// `true` if `window` (exactly `len()` bytes) satisfies every position.
    #[inline]
    pub fn matches_at(&self, window: &[u8]) -> bool {
        window.len() == self.classes.len()
            && window.iter().zip(&self.classes).all(|(&b, &cls)| base_mask(b) & cls != 0)
    }
}

impl FromStr for PamPattern {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> { PamPattern::new(s) }
}

impl fmt::Display for PamPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.template) }
}

/// Lazy iterator over non-overlapping PAM hits as 0-based half-open `(start, end)`.
#[derive(Clone, Debug)]
pub struct MotifMatches<'a> {
    seq: &'a [u8],
    pattern: &'a PamPattern,
    pos: usize,
}

impl Iterator for MotifMatches<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.pattern.len();
        while self.pos + k <= self.seq.len() {
            let start = self.pos;
            if self.pattern.matches_at(&self.seq[start..start + k]) {
                self.pos = start + k;
                return Some((start, start + k));
            }
            self.pos += 1;
        }
        None
    }
}

/// Scan `seq` left to right for `pattern`. Each call starts a fresh scan.
///
/// The sequence must already be uppercase; lowercase bases never match.
pub fn find_motif_matches<'a>(seq: &'a [u8], pattern: &'a PamPattern) -> MotifMatches<'a> {
    MotifMatches { seq, pattern, pos: 0 }
}
