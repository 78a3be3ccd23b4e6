use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::PathBuf;

use super::{load_document, load_supplement, open_output};

/// Dump the decoded document as JSON
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    supplement: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let supplement = load_supplement(supplement.as_deref())?;
    let document = load_document(&input, supplement)?;

    let json = if pretty {
        document.to_json_pretty()
    } else {
        document.to_json()
    }
    .context("Failed to serialize document")?;

    let mut writer = open_output(output.as_deref())?;
    writeln!(writer, "{}", json).context("Failed to write JSON")?;
    writer.flush().context("Failed to flush output")?;

    if let Some(path) = &output {
        info!("Wrote {} records to {}", document.records.len(), path.display());
    }
    Ok(())
}
