//! Document and record decoding.

use indexmap::IndexMap;
use log::{info, trace};
use std::sync::Arc;

use super::{Document, DocumentMetadata, Record, Sample, SampleValue, FIXED_COLUMNS, SAMPLE_COLUMN_OFFSET};
use crate::error::{Result, VcfError};
use crate::genotype::decode_genotype;
use crate::schema::{resolve_format_field, resolve_info_field, FieldSchemaMap, SupplementarySchema};
use crate::value::scalar::{decode_float, decode_required_string, decode_string};
use crate::value::{decode_format_value, decode_value, is_missing_token, Value, MISSING};

/// FORMAT key decoded with the genotype codec
pub const GENOTYPE_KEY: &str = "GT";

/// Decode a complete document.
///
/// Header lines register schemas as they are seen; data lines are decoded
/// against the schemas registered so far. The first failing line aborts the
/// parse and is reported with its 1-based line number.
pub fn parse_vcf(text: &str, supplement: Option<Arc<SupplementarySchema>>) -> Result<Document> {
    let mut document = Document {
        metadata: DocumentMetadata::new(supplement),
        records: Vec::new(),
    };

    for (index, line) in lines(text) {
        if line.starts_with('#') {
            parse_header_line(line, &mut document.metadata).map_err(|e| e.at_line(index + 1))?;
        } else {
            let record = parse_record(line, &document.metadata).map_err(|e| e.at_line(index + 1))?;
            document.records.push(record);
        }
    }

    info!(
        "Parsed {} records, {} INFO and {} FORMAT fields, {} samples",
        document.records.len(),
        document.metadata.info.len(),
        document.metadata.format.len(),
        document.metadata.samples.len()
    );
    Ok(document)
}

/// Decode a complete document, decoding data lines in parallel.
///
/// Produces the same document (or the same first error) as [`parse_vcf`].
#[cfg(feature = "parallel")]
pub fn parse_vcf_parallel(text: &str, supplement: Option<Arc<SupplementarySchema>>) -> Result<Document> {
    use rayon::prelude::*;

    let all_lines: Vec<(usize, &str)> = lines(text).collect();
    let first_data = all_lines
        .iter()
        .position(|(_, line)| !line.starts_with('#'))
        .unwrap_or(all_lines.len());
    let (header, data) = all_lines.split_at(first_data);

    // Header lines after the first record change the schemas mid-document.
    if data.iter().any(|(_, line)| line.starts_with('#')) {
        return parse_vcf(text, supplement);
    }

    let mut metadata = DocumentMetadata::new(supplement);
    for (index, line) in header {
        parse_header_line(line, &mut metadata).map_err(|e| e.at_line(index + 1))?;
    }

    let records = data
        .par_iter()
        .map(|(index, line)| parse_record(line, &metadata).map_err(|e| e.at_line(index + 1)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Parsed {} records in parallel, {} samples",
        records.len(),
        metadata.samples.len()
    );
    Ok(Document { metadata, records })
}

/// Non-empty lines with their 0-based line index, `\r` stripped
fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
}

/// Register one `#`-prefixed header line.
///
/// `##INFO` and `##FORMAT` declarations become schemas; the column header
/// provides sample names. Every line is kept verbatim.
pub fn parse_header_line(line: &str, metadata: &mut DocumentMetadata) -> Result<()> {
    metadata.lines.push(line.to_string());

    if line.starts_with("##INFO") {
        let supplement = metadata.supplement.as_deref().map(|s| &s.info);
        let field = resolve_info_field(line, supplement)?;
        metadata.info.insert(field.id.clone(), field);
    } else if line.starts_with("##FORMAT") {
        let supplement = metadata.supplement.as_deref().map(|s| &s.format);
        let field = resolve_format_field(line, supplement)?;
        metadata.format.insert(field.id.clone(), field);
    } else if !line.starts_with("##") {
        metadata.samples = line
            .split('\t')
            .skip(SAMPLE_COLUMN_OFFSET)
            .map(str::to_string)
            .collect();
    }
    Ok(())
}

/// Decode one tab-separated data line
pub fn parse_record(line: &str, metadata: &DocumentMetadata) -> Result<Record> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < FIXED_COLUMNS {
        return Err(VcfError::MalformedRecord(line.to_string()));
    }

    let record = Record {
        chrom: decode_required_string(columns[0])?,
        pos: decode_position(columns[1])?,
        ids: decode_identifiers(columns[2])?,
        reference: decode_required_string(columns[3])?,
        alts: decode_alternates(columns[4]),
        quality: decode_float(columns[5])?,
        filters: decode_identifiers(columns[6])?,
        info: decode_info(columns[7], &metadata.info)?,
        samples: match columns.get(FIXED_COLUMNS) {
            Some(format) => decode_samples(format, &columns[SAMPLE_COLUMN_OFFSET..], &metadata.format)?,
            None => Vec::new(),
        },
    };

    trace!(
        "Decoded record {}:{} with {} INFO fields and {} samples",
        record.chrom,
        record.pos,
        record.info.len(),
        record.samples.len()
    );
    Ok(record)
}

fn decode_position(token: &str) -> Result<u64> {
    token
        .parse::<u64>()
        .map_err(|_| VcfError::InvalidNumber(token.to_string()))
}

/// `;`- or `:`-separated list of non-null strings; `.` is the empty list
fn decode_non_null_list(token: &str, separator: char) -> Result<Vec<String>> {
    if is_missing_token(token) {
        return Ok(Vec::new());
    }
    token.split(separator).map(decode_required_string).collect()
}

fn decode_identifiers(token: &str) -> Result<Vec<String>> {
    decode_non_null_list(token, ';')
}

fn decode_alternates(token: &str) -> Vec<Option<String>> {
    if is_missing_token(token) {
        return Vec::new();
    }
    token.split(',').map(|alt| decode_string(alt, true)).collect()
}

fn decode_info(token: &str, schemas: &FieldSchemaMap) -> Result<IndexMap<String, Value>> {
    let mut info = IndexMap::new();
    if token == MISSING {
        return Ok(info);
    }

    for entry in token.split(';').filter(|entry| !is_missing_token(entry)) {
        let (key, value) = entry.split_once('=').unwrap_or((entry, "true"));
        let field = schemas
            .get(key)
            .ok_or_else(|| VcfError::UnknownInfoField(key.to_string()))?;
        let value = decode_value(value, field)?;
        // A presence flag is either set or absent; `H2=false` is absent.
        if field.is_presence_flag() && value != Value::Flag(Some(true)) {
            continue;
        }
        info.insert(key.to_string(), value);
    }
    Ok(info)
}

fn decode_samples(format: &str, columns: &[&str], schemas: &FieldSchemaMap) -> Result<Vec<Sample>> {
    let keys = decode_non_null_list(format, ':')?;
    columns
        .iter()
        .map(|column| decode_sample(column, &keys, schemas))
        .collect()
}

fn decode_sample(column: &str, keys: &[String], schemas: &FieldSchemaMap) -> Result<Sample> {
    let mut sample = Sample::new();
    if keys.is_empty() && is_missing_token(column) {
        return Ok(sample);
    }

    let parts: Vec<&str> = column.split(':').collect();
    if parts.len() > keys.len() {
        return Err(VcfError::MalformedRecord(format!(
            "sample '{}' has {} values for {} FORMAT keys",
            column,
            parts.len(),
            keys.len()
        )));
    }

    for (part, key) in parts.into_iter().zip(keys) {
        let field = schemas
            .get(key)
            .ok_or_else(|| VcfError::UnknownFormatField(key.clone()))?;
        let value = if field.id == GENOTYPE_KEY {
            SampleValue::Genotype(decode_genotype(part)?)
        } else {
            SampleValue::Value(decode_format_value(part, field)?)
        };
        sample.insert(key.clone(), value);
    }
    Ok(sample)
}
