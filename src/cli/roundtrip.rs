use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use vcfcodec::derived::annotate_allele_balance;
use vcfcodec::{VcfWriter, WriterConfig};

use super::{load_document, load_supplement, open_output, Config};

/// Arguments of the roundtrip command
pub struct RoundtripArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub samples: Option<Vec<String>>,
    pub no_samples: bool,
    pub supplement: Option<PathBuf>,
    pub allele_balance: bool,
    pub config: Option<PathBuf>,
}

/// Parse a VCF file and write it back out
pub fn run(args: RoundtripArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let samples = if args.no_samples {
        Some(Vec::new())
    } else {
        args.samples.or(config.write.samples)
    };
    let supplement_path = args.supplement.or(config.write.supplement);
    let allele_balance = args.allele_balance || config.write.allele_balance.unwrap_or(false);

    let supplement = load_supplement(supplement_path.as_deref())?;
    let mut document = load_document(&args.input, supplement)?;

    if allele_balance {
        let annotated = annotate_allele_balance(&mut document);
        info!("Derived allele balance for {} samples", annotated);
    }

    let writer_config = WriterConfig { samples };
    let output = open_output(args.output.as_deref())?;
    let mut writer = VcfWriter::new(output, &document.metadata, &writer_config);
    writer.write_header().context("Failed to write VCF header")?;
    for (index, record) in document.records.iter().enumerate() {
        writer
            .write_record(record)
            .with_context(|| format!("Failed to write record {}", index + 1))?;
    }
    let stats = writer.finish().context("Failed to flush output")?;

    if let Some(path) = &args.output {
        info!("{} to {}", stats, path.display());
    }
    Ok(())
}
