use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use vcfcodec::{Document, SupplementarySchema};

mod config;
mod info;
mod roundtrip;
mod to_json;

pub use config::Config;

/// vcfcodec - Schema-driven VCF decoding and encoding
#[derive(Parser)]
#[command(name = "vcfcodec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a VCF file and write it back out
    Roundtrip {
        /// Input VCF file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output VCF file path (defaults to stdout)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Keep only these samples (comma-separated)
        #[arg(long, value_delimiter = ',', conflicts_with = "no_samples")]
        samples: Option<Vec<String>>,

        /// Drop the FORMAT column and all sample columns
        #[arg(long)]
        no_samples: bool,

        /// Supplementary field metadata (JSON)
        #[arg(long, value_name = "FILE")]
        supplement: Option<PathBuf>,

        /// Add a derived VIAB allele balance FORMAT field
        #[arg(long)]
        allele_balance: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display header schemas and record counts of a VCF file
    Info {
        /// Input VCF file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Supplementary field metadata (JSON)
        #[arg(long, value_name = "FILE")]
        supplement: Option<PathBuf>,
    },

    /// Dump the decoded document as JSON
    ToJson {
        /// Input VCF file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output JSON file path (defaults to stdout)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Supplementary field metadata (JSON)
        #[arg(long, value_name = "FILE")]
        supplement: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Roundtrip {
            input,
            output,
            samples,
            no_samples,
            supplement,
            allele_balance,
            config,
        } => roundtrip::run(roundtrip::RoundtripArgs {
            input,
            output,
            samples,
            no_samples,
            supplement,
            allele_balance,
            config,
        }),
        Commands::Info { file, supplement } => info::run(file, supplement),
        Commands::ToJson {
            input,
            output,
            supplement,
            pretty,
        } => to_json::run(input, output, supplement, pretty),
    }
}

/// Load supplementary metadata from a JSON file
fn load_supplement(path: Option<&Path>) -> Result<Option<Arc<SupplementarySchema>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open supplementary metadata: {}", path.display()))?;
    let schema = SupplementarySchema::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse supplementary metadata: {}", path.display()))?;
    info!("Loaded supplementary metadata from {}", path.display());
    Ok(Some(Arc::new(schema)))
}

/// Read and decode a VCF file
fn load_document(input: &Path, supplement: Option<Arc<SupplementarySchema>>) -> Result<Document> {
    if !input.exists() {
        anyhow::bail!("File does not exist: {}", input.display());
    }
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read VCF file: {}", input.display()))?;

    #[cfg(feature = "parallel")]
    let document = vcfcodec::parse_vcf_parallel(&text, supplement);
    #[cfg(not(feature = "parallel"))]
    let document = vcfcodec::parse_vcf(&text, supplement);

    document.with_context(|| format!("Failed to parse VCF file: {}", input.display()))
}

/// Buffered output to a file, or stdout when no path is given
fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
