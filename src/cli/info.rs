use anyhow::Result;
use std::path::PathBuf;

use vcfcodec::schema::{FieldSchema, FieldSchemaMap};

use super::{load_document, load_supplement};

/// Display header schemas and record counts of a VCF file
pub fn run(file: PathBuf, supplement: Option<PathBuf>) -> Result<()> {
    let supplement = load_supplement(supplement.as_deref())?;
    let document = load_document(&file, supplement)?;
    let metadata = &document.metadata;

    println!("VCF File Information");
    println!("====================");
    println!("File: {}", file.display());
    println!();

    println!("Statistics:");
    println!("  Header lines: {}", metadata.lines.len());
    println!("  Records: {}", document.records.len());
    println!("  Samples: {}", metadata.samples.len());
    println!();

    if !metadata.samples.is_empty() {
        println!("Samples:");
        for (i, sample) in metadata.samples.iter().enumerate() {
            println!("  {:3}. {}", i + 1, sample);
        }
        println!();
    }

    print_fields("INFO fields", &metadata.info);
    print_fields("FORMAT fields", &metadata.format);

    Ok(())
}

fn print_fields(title: &str, fields: &FieldSchemaMap) {
    if fields.is_empty() {
        return;
    }
    println!("{}:", title);
    for field in fields.values() {
        print_field(field, 1);
    }
    println!();
}

fn print_field(field: &FieldSchema, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{}{} (Number={}, Type={}){}",
        indent,
        field.id,
        field.number.cardinality,
        field.value_type,
        field
            .description
            .as_deref()
            .map(|d| format!(": {}", d))
            .unwrap_or_default()
    );
    if let Some(nested) = &field.nested {
        for item in &nested.items {
            print_field(item, depth + 1);
        }
    }
}
