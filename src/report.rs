//! Rendering of ranked guides: terminal table (polars), CSV and JSON.
//!
//! Every output uses the same four columns, in the same order:
//! `gRNA`, `PAM`, `Position` (1-based `start-end`) and `GC_Content` (2 decimals).
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use crate::site::CandidateSite;

/// Column names shared by all outputs.
pub const COLUMNS: [&str; 4] = ["gRNA", "PAM", "Position", "GC_Content"];

/// One output record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GuideRow {
    #[serde(rename = "gRNA")]
    pub grna: String,
    #[serde(rename = "PAM")]
    pub pam: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "GC_Content")]
    pub gc_content: f64,
}

/// Flatten candidates into output rows, preserving order.
pub fn candidate_rows(sites: &[CandidateSite]) -> Vec<GuideRow> {
    sites.iter()
        .map(|s| GuideRow {
            grna: s.guide.clone(),
            pam: s.pam.clone(),
            position: s.span.to_string(),
            gc_content: s.gc_content,
        })
        .collect()
}

/// Build a DataFrame for pretty-printing.
pub fn to_dataframe(sites: &[CandidateSite]) -> PolarsResult<DataFrame> {
    let rows = candidate_rows(sites);
    df!(
        COLUMNS[0] => rows.iter().map(|r| r.grna.clone()).collect::<Vec<_>>(),
        COLUMNS[1] => rows.iter().map(|r| r.pam.clone()).collect::<Vec<_>>(),
        COLUMNS[2] => rows.iter().map(|r| r.position.clone()).collect::<Vec<_>>(),
        COLUMNS[3] => rows.iter().map(|r| r.gc_content).collect::<Vec<f64>>(),
    )
}

/// Configure Polars' pretty-printer to show whole guides and every row.
pub fn configure_table_display() {
    // Read by Polars' fmt feature when a DataFrame is displayed.
    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_COLS", "100");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    std::env::set_var("POLARS_FMT_STR_LEN", "1000");
    std::env::set_var("POLARS_FMT_TABLE_HIDE_COLUMN_DATA_TYPES", "1");
    std::env::set_var("POLARS_TABLE_WIDTH", "65535");
}

/// Write rows as CSV with a header line.
pub fn write_csv<W: Write>(sites: &[CandidateSite], w: W) -> Result<()> {
    let mut wtr = ::csv::Writer::from_writer(w);
    wtr.write_record(COLUMNS)?;
    for r in candidate_rows(sites) {
        wtr.write_record([r.grna, r.pam, r.position, format!("{:.2}", r.gc_content)])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows as a pretty JSON array to `path`.
pub fn write_json<P: AsRef<Path>>(sites: &[CandidateSite], path: P) -> Result<()> {
    let p = path.as_ref();
    let f = File::create(p).with_context(|| format!("creating {}", p.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &candidate_rows(sites))?;
    w.flush()?;
    Ok(())
}
