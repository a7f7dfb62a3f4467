use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use polars::prelude::*;
use tracing::{info, warn};

use cas12guide::fetch::{self, FetchConfig};
use cas12guide::site::{DEFAULT_GUIDE_LENGTH, DEFAULT_MAX_REPEAT, DEFAULT_PAM, DEFAULT_TOP_N};
use cas12guide::{logging, report, seqio, GcRange, ScanParams};

/// cas12guide CLI
#[derive(Parser)]
#[command(name = "cas12guide")]
#[command(version)]
#[command(about = "Find and rank Cas12a guide RNAs in a DNA sequence", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a sequence for PAM-adjacent guides and print the best ones
    Scan {
        #[command(flatten)]
        source: SourceArgs,
        /// PAM template; N and IUPAC codes are wildcards
        #[arg(long, default_value = DEFAULT_PAM)]
        pam: String,
        /// Guide (protospacer) length
        #[arg(long, default_value_t = DEFAULT_GUIDE_LENGTH)]
        guide_length: usize,
        /// Minimum GC percentage (inclusive)
        #[arg(long, default_value_t = 40.0)]
        gc_min: f64,
        /// Maximum GC percentage (inclusive)
        #[arg(long, default_value_t = 70.0)]
        gc_max: f64,
        /// Longest tolerated homopolymer setting (rejects runs of N+1)
        #[arg(long, default_value_t = DEFAULT_MAX_REPEAT)]
        max_repeat: usize,
        /// Number of guides to report
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
        /// Emit CSV to stdout instead of a table
        #[arg(long)]
        csv: bool,
        /// Also write the guides as JSON to this file
        #[arg(long)]
        json: Option<String>,
    },

    /// List raw PAM matches (non-overlapping, 1-based)
    Pams {
        #[command(flatten)]
        source: SourceArgs,
        /// PAM template
        #[arg(long, default_value = DEFAULT_PAM)]
        pam: String,
    },
}

/// Where the sequence comes from. Precedence: --sequence, --input, --accession.
#[derive(Args)]
struct SourceArgs {
    /// Literal sequence (5' -> 3')
    #[arg(long, conflicts_with = "input")]
    sequence: Option<String>,
    /// FASTA/FASTQ(.gz) file; the first record is used
    #[arg(long)]
    input: Option<String>,
    /// NCBI nucleotide accession
    #[arg(long, default_value = "NM_000142")]
    accession: String,
    /// Contact email sent to NCBI
    #[arg(long, env = "NCBI_EMAIL", default_value = "")]
    email: String,
    /// NCBI API key
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,
    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
    /// Fail instead of asking for a sequence when retrieval fails
    #[arg(long)]
    no_prompt: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Scan { source, pam, guide_length, gc_min, gc_max, max_repeat, top, csv, json } => {
            let (label, seq) = load_sequence(&source)?;
            let params = ScanParams {
                pam,
                guide_length,
                gc_range: GcRange::new(gc_min, gc_max),
                max_repeat_length: max_repeat,
                top_n: top,
            };
            let guides = cas12guide::run(&seq, &params)?;

            if let Some(path) = &json {
                report::write_json(&guides, path)?;
                info!(path = %path, n = guides.len(), "wrote JSON");
            }

            if csv {
                report::write_csv(&guides, io::stdout().lock())?;
            } else if guides.is_empty() {
                println!("No gRNA candidates found.");
            } else {
                report::configure_table_display();
                let df = report::to_dataframe(&guides)?;
                println!("\nTop {} gRNAs for {}:", guides.len(), label);
                println!("{}", df);
            }
        }

        Commands::Pams { source, pam } => {
            let (_label, seq) = load_sequence(&source)?;
            let hits = cas12guide::pam_hits(&seq, &pam)?;
            let df = df!(
                "start" => hits.iter().map(|h| h.0 as u64).collect::<Vec<_>>(),
                "end"   => hits.iter().map(|h| h.1 as u64).collect::<Vec<_>>(),
                "PAM"   => hits.iter().map(|h| h.2.clone()).collect::<Vec<_>>(),
            )?;
            report::configure_table_display();
            println!("{}", df);
        }
    }

    Ok(())
}

/// Resolve the input sequence, returning `(label, sequence)`.
///
/// NCBI retrieval failures fall back to a prompt on stdin unless `--no-prompt`.
fn load_sequence(src: &SourceArgs) -> anyhow::Result<(String, String)> {
    if let Some(text) = &src.sequence {
        let seq = seqio::normalize_sequence(text);
        anyhow::ensure!(!seq.is_empty(), "--sequence is empty");
        return Ok(("input sequence".to_string(), seq));
    }
    if let Some(path) = &src.input {
        let seq = seqio::read_sequence_file(path)?;
        return Ok((path.clone(), seq));
    }

    let cfg = FetchConfig {
        email: src.email.clone(),
        api_key: src.api_key.clone(),
        timeout: Duration::from_secs(src.timeout),
        ..FetchConfig::default()
    };
    if cfg.email.is_empty() {
        warn!("no contact email set (--email or NCBI_EMAIL); NCBI may throttle anonymous requests");
    }
    match fetch::fetch_sequence(&src.accession, &cfg) {
        Ok(seq) => {
            eprintln!("Sequence {} loaded. Length: {} nt.", src.accession, seq.len());
            Ok((src.accession.clone(), seq))
        }
        Err(e) if !src.no_prompt => {
            warn!("retrieval failed: {e:#}");
            eprintln!("Error: {e:#}");
            let seq = seqio::prompt_sequence(&mut io::stdin().lock(), &mut io::stderr())
                .context("reading fallback sequence")?;
            Ok(("input sequence".to_string(), seq))
        }
        Err(e) => Err(e),
    }
}
