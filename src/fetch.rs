//! Sequence retrieval from **NCBI Entrez** (E-utilities `efetch`).
//!
//! NCBI asks every client to identify itself with a contact email and a tool
//! name; an API key raises the rate limit. All of that lives in [`FetchConfig`]
//! and is passed explicitly, there is no process-wide state.
//!
//! Retrieval failures are returned as `Err`; the caller decides whether to fall
//! back to another sequence source.
use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use bio::io::fasta;
use tracing::{debug, info};

/// Default E-utilities endpoint.
pub const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Connection settings for Entrez.
#[derive(Clone, Debug)]
pub struct FetchConfig {
    /// Contact address sent as `email=`.
    pub email: String,
    /// Client name sent as `tool=`.
    pub tool: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl FetchConfig {
    pub fn new(email: impl Into<String>) -> Self {
        FetchConfig { email: email.into(), ..FetchConfig::default() }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            email: String::new(),
            tool: env!("CARGO_PKG_NAME").to_string(),
            api_key: None,
            base_url: EFETCH_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Query parameters for an `efetch` nucleotide FASTA request.
pub fn efetch_query(accession: &str, cfg: &FetchConfig) -> Vec<(&'static str, String)> {
    let mut q = vec![
        ("db", "nucleotide".to_string()),
        ("id", accession.to_string()),
        ("rettype", "fasta".to_string()),
        ("retmode", "text".to_string()),
        ("tool", cfg.tool.clone()),
    ];
    if !cfg.email.is_empty() { q.push(("email", cfg.email.clone())); }
    if let Some(key) = &cfg.api_key { q.push(("api_key", key.clone())); }
    q
}

/// Parse an efetch FASTA body and return the first record's sequence, uppercased.
pub fn parse_fasta_response(body: &str) -> Result<String> {
    let reader = fasta::Reader::new(Cursor::new(body.as_bytes()));
    let record = reader.records().next()
        .context("response contained no FASTA record")?
        .context("malformed FASTA in response")?;
    record.check().map_err(|e| anyhow::anyhow!("invalid FASTA record {}: {}", record.id(), e))?;
    anyhow::ensure!(!record.seq().is_empty(), "record {} has an empty sequence", record.id());
    debug!(record = record.id(), desc = ?record.desc(), "parsed efetch record");
    Ok(String::from_utf8_lossy(record.seq()).to_ascii_uppercase())
}

/// Download `accession` from the nucleotide database.
pub fn fetch_sequence(accession: &str, cfg: &FetchConfig) -> Result<String> {
    anyhow::ensure!(!accession.trim().is_empty(), "accession is empty");
    let client = reqwest::blocking::Client::builder()
        .timeout(cfg.timeout)
        .build()
        .context("building HTTP client")?;
    info!(accession, url = %cfg.base_url, "fetching sequence from NCBI");
    let body = client.get(&cfg.base_url)
        .query(&efetch_query(accession, cfg))
        .send()
        .with_context(|| format!("requesting {accession} from NCBI"))?
        .error_for_status()
        .with_context(|| format!("NCBI rejected request for {accession}"))?
        .text()
        .context("reading NCBI response body")?;
    parse_fasta_response(&body).with_context(|| format!("parsing NCBI response for {accession}"))
}

#[cfg(test)]
mod fetch_tests {
    use super::*;

    #[test]
    fn query_includes_identity_and_optional_key() {
        let mut cfg = FetchConfig::new("lab@example.org");
        let q = efetch_query("NM_000142", &cfg);
        assert!(q.contains(&("id", "NM_000142".to_string())));
        assert!(q.contains(&("rettype", "fasta".to_string())));
        assert!(q.contains(&("email", "lab@example.org".to_string())));
        assert!(!q.iter().any(|(k, _)| *k == "api_key"));
        cfg.api_key = Some("k123".into());
        assert!(efetch_query("NM_000142", &cfg).contains(&("api_key", "k123".to_string())));
    }

    #[test]
    fn anonymous_query_omits_email() {
        let q = efetch_query("NM_000142", &FetchConfig::default());
        assert!(!q.iter().any(|(k, _)| *k == "email"));
        assert!(q.contains(&("tool", "cas12guide".to_string())));
    }

    #[test]
    fn parses_wrapped_fasta_and_uppercases() {
        let body = ">NM_000142.5 Homo sapiens FGFR3\nacgtTTTA\nGGCCAT\n\n";
        assert_eq!(parse_fasta_response(body).unwrap(), "ACGTTTTAGGCCAT");
    }

    #[test]
    fn only_first_record_is_returned() {
        let body = ">a\nTTTA\n>b\nGGGG\n";
        assert_eq!(parse_fasta_response(body).unwrap(), "TTTA");
    }

    #[test]
    fn empty_or_error_bodies_are_rejected() {
        assert!(parse_fasta_response("").is_err());
        assert!(parse_fasta_response("Error: ID list is empty!").is_err());
    }

    #[test]
    fn blank_accession_fails_without_network() {
        assert!(fetch_sequence("  ", &FetchConfig::default()).is_err());
    }
}
