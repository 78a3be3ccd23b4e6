//! # vcfcodec
//!
//! A command-line tool for decoding and re-encoding VCF files.
//!
//! ## Usage
//!
//! ```bash
//! # Parse and rewrite, keeping two samples
//! vcfcodec roundtrip input.vcf output.vcf --samples NA12878,NA12891
//!
//! # Inspect header schemas
//! vcfcodec info input.vcf --supplement annotations.json
//!
//! # Dump the decoded model
//! vcfcodec to-json input.vcf output.json --pretty
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
