//! Sequence input for the scanner: **FASTA / FASTQ(.gz)** files, pasted text
//! and normalisation.
//!
//! ### Design
//! - **FASTA/FASTQ(.gz)** parsed with `needletail`; only the **first** record is used.
//! - Pasted input is normalised with [`normalize_sequence`] (whitespace removed, uppercased).
//!
//! ### Errors
//! Parsing/IO errors are bubbled via `anyhow::Result` to the caller.
//!
//! ### Example
//! ```no_run
//! use cas12guide::seqio;
//! let seq = seqio::read_sequence_file("fgfr3.fasta").unwrap();
//! println!("loaded {} nt", seq.len());
//! ```
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use needletail::parse_fastx_file;
use tracing::info;

/// Drop whitespace (including line breaks of wrapped FASTA) and uppercase.
pub fn normalize_sequence(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Read the first record of a FASTA/FASTQ file (gzip is detected transparently).
pub fn read_sequence_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let p = path.as_ref();
    let mut reader = parse_fastx_file(p)
        .with_context(|| format!("opening sequence file {}", p.display()))?;
    let record = match reader.next() {
        Some(r) => r.with_context(|| format!("parsing {}", p.display()))?,
        None => anyhow::bail!("no sequence records in {}", p.display()),
    };
    let id = String::from_utf8_lossy(record.id()).to_string();
    let seq = String::from_utf8_lossy(&record.seq()).to_ascii_uppercase();
    info!(file = %p.display(), record = %id, len = seq.len(), "loaded sequence from file");
    Ok(seq)
}

/// Ask for a sequence on `output` and read one line from `input`.
pub fn prompt_sequence<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "Enter the sequence manually (5' -> 3'): ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("reading sequence from input")?;
    let seq = normalize_sequence(&line);
    anyhow::ensure!(!seq.is_empty(), "no sequence entered");
    Ok(seq)
}
