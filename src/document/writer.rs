//! Document and record encoding.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

use super::parser::GENOTYPE_KEY;
use super::{Document, DocumentMetadata, Record, Sample, SampleValue, FIXED_COLUMNS, SAMPLE_COLUMN_OFFSET};
use crate::error::{Result, VcfError};
use crate::genotype::encode_genotype;
use crate::schema::FieldSchema;
use crate::value::scalar::format_number;
use crate::value::{encode_info_entry, encode_value, escape, Value, MISSING};

/// Output options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Sample names to keep. `None` keeps every sample; an empty list drops
    /// the FORMAT column and all sample columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<String>>,
}

impl WriterConfig {
    /// Keep only the named samples
    pub fn with_samples<I, S>(samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            samples: Some(samples.into_iter().map(Into::into).collect()),
        }
    }

    /// Drop every sample column
    pub fn without_samples() -> Self {
        Self {
            samples: Some(Vec::new()),
        }
    }
}

/// Statistics from a completed write
#[derive(Debug, Clone, Default)]
pub struct WriterStats {
    /// Number of header lines written
    pub header_lines_written: usize,
    /// Number of records written
    pub records_written: usize,
    /// Number of sample columns per record
    pub samples_written: usize,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} header lines and {} records ({} samples)",
            self.header_lines_written, self.records_written, self.samples_written
        )
    }
}

/// Encode a whole document to text. Every line, the last included, ends with `\n`.
pub fn write_vcf(document: &Document, config: &WriterConfig) -> Result<String> {
    let mut writer = VcfWriter::new(Vec::new(), &document.metadata, config);
    writer.write_header()?;
    for record in &document.records {
        writer.write_record(record)?;
    }
    let bytes = writer.finish_into_inner()?;
    String::from_utf8(bytes).map_err(|e| VcfError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Encode one record as a data line without the trailing newline
pub fn encode_record(record: &Record, metadata: &DocumentMetadata, config: &WriterConfig) -> Result<String> {
    let selection = SampleSelection::new(metadata, config);
    record_line(record, metadata, &selection)
}

/// Streaming writer: the header once, then records one at a time.
///
/// # Example
///
/// ```
/// use vcfcodec::{parse_vcf, VcfWriter, WriterConfig};
///
/// let text = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n1\t10\t.\tA\tG\t.\t.\t.\n";
/// let document = parse_vcf(text, None)?;
///
/// let config = WriterConfig::default();
/// let mut writer = VcfWriter::new(Vec::new(), &document.metadata, &config);
/// writer.write_header()?;
/// for record in &document.records {
///     writer.write_record(record)?;
/// }
/// assert_eq!(writer.records_written(), 1);
/// assert_eq!(String::from_utf8(writer.finish_into_inner()?).unwrap(), text);
/// # Ok::<(), vcfcodec::VcfError>(())
/// ```
pub struct VcfWriter<'a, W: Write> {
    writer: W,
    metadata: &'a DocumentMetadata,
    config: &'a WriterConfig,
    selection: SampleSelection,
    header_lines_written: usize,
    records_written: usize,
}

impl<'a, W: Write> VcfWriter<'a, W> {
    /// Create a writer for documents described by `metadata`
    pub fn new(writer: W, metadata: &'a DocumentMetadata, config: &'a WriterConfig) -> Self {
        let selection = SampleSelection::new(metadata, config);
        debug!(
            "Writing {} of {} samples",
            selection.len(metadata),
            metadata.samples.len()
        );
        Self {
            writer,
            metadata,
            config,
            selection,
            header_lines_written: 0,
            records_written: 0,
        }
    }

    /// Write every header line. The column header is trimmed to the selected
    /// samples when a sample filter is set.
    pub fn write_header(&mut self) -> Result<()> {
        let column_header = self.metadata.column_header_index();
        for (index, line) in self.metadata.lines.iter().enumerate() {
            match (&self.config.samples, column_header) {
                (Some(keep), Some(header)) if index == header && index + 1 == self.metadata.lines.len() => {
                    writeln!(self.writer, "{}", filter_column_header(line, keep))?
                }
                _ => writeln!(self.writer, "{}", line)?,
            }
            self.header_lines_written += 1;
        }
        Ok(())
    }

    /// Write one record
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        let line = record_line(record, self.metadata, &self.selection)?;
        writeln!(self.writer, "{}", line)?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Current write statistics
    pub fn stats(&self) -> WriterStats {
        WriterStats {
            header_lines_written: self.header_lines_written,
            records_written: self.records_written,
            samples_written: self.selection.len(self.metadata),
        }
    }

    /// Flush and return statistics
    pub fn finish(mut self) -> Result<WriterStats> {
        self.writer.flush()?;
        let stats = self.stats();
        info!("{}", stats);
        Ok(stats)
    }

    /// Flush and return the underlying writer
    pub fn finish_into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        info!("{}", self.stats());
        Ok(self.writer)
    }
}

/// Sample columns retained on write, as indices into the record's samples
enum SampleSelection {
    All,
    Indices(Vec<usize>),
}

impl SampleSelection {
    fn new(metadata: &DocumentMetadata, config: &WriterConfig) -> Self {
        match &config.samples {
            None => SampleSelection::All,
            Some(keep) => SampleSelection::Indices(
                metadata
                    .samples
                    .iter()
                    .enumerate()
                    .filter(|(_, name)| keep.contains(*name))
                    .map(|(index, _)| index)
                    .collect(),
            ),
        }
    }

    fn len(&self, metadata: &DocumentMetadata) -> usize {
        match self {
            SampleSelection::All => metadata.samples.len(),
            SampleSelection::Indices(indices) => indices.len(),
        }
    }

    fn select<'r>(&self, samples: &'r [Sample]) -> Vec<&'r Sample> {
        match self {
            SampleSelection::All => samples.iter().collect(),
            SampleSelection::Indices(indices) => indices.iter().filter_map(|&i| samples.get(i)).collect(),
        }
    }
}

fn filter_column_header(line: &str, keep: &[String]) -> String {
    let columns = line.split('\t').enumerate();
    let kept: Vec<&str> = if keep.is_empty() {
        columns
            .filter(|(index, _)| *index < FIXED_COLUMNS)
            .map(|(_, column)| column)
            .collect()
    } else {
        columns
            .filter(|(index, column)| *index < SAMPLE_COLUMN_OFFSET || keep.iter().any(|k| k == *column))
            .map(|(_, column)| column)
            .collect()
    };
    kept.join("\t")
}

fn record_line(record: &Record, metadata: &DocumentMetadata, selection: &SampleSelection) -> Result<String> {
    let mut columns = vec![
        escape(&record.chrom).into_owned(),
        record.pos.to_string(),
        join_or_missing(&record.ids, ";"),
        escape(&record.reference).into_owned(),
        encode_alternates(&record.alts),
        record.quality.map_or_else(|| MISSING.to_string(), format_number),
        join_or_missing(&record.filters, ";"),
        encode_info(record, metadata)?,
    ];

    let samples = selection.select(&record.samples);
    if !samples.is_empty() {
        let keys = format_keys(&samples);
        columns.push(if keys.is_empty() {
            MISSING.to_string()
        } else {
            keys.iter().map(|key| escape(key)).collect::<Vec<_>>().join(":")
        });
        for sample in samples {
            columns.push(encode_sample(sample, &keys, metadata)?);
        }
    }

    Ok(columns.join("\t"))
}

fn join_or_missing(values: &[String], separator: &str) -> String {
    if values.is_empty() {
        return MISSING.to_string();
    }
    values.iter().map(|v| escape(v)).collect::<Vec<_>>().join(separator)
}

fn encode_alternates(alts: &[Option<String>]) -> String {
    if alts.is_empty() {
        return MISSING.to_string();
    }
    alts.iter()
        .map(|alt| alt.as_deref().map_or_else(|| MISSING.to_string(), |a| escape(a).into_owned()))
        .collect::<Vec<_>>()
        .join(",")
}

/// INFO entries in schema declaration order
fn encode_info(record: &Record, metadata: &DocumentMetadata) -> Result<String> {
    if let Some(unknown) = record.info.keys().find(|key| !metadata.info.contains_key(*key)) {
        return Err(VcfError::UnknownInfoField(unknown.clone()));
    }

    let mut entries = Vec::with_capacity(record.info.len());
    for (id, field) in &metadata.info {
        if let Some(value) = record.info.get(id) {
            if let Some(entry) = encode_info_entry(value, field)? {
                entries.push(entry);
            }
        }
    }

    if entries.is_empty() {
        Ok(MISSING.to_string())
    } else {
        Ok(entries.join(";"))
    }
}

/// Union of sample keys in first-seen order, `GT` first
fn format_keys(samples: &[&Sample]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for sample in samples {
        for key in sample.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    if let Some(position) = keys.iter().position(|key| key == GENOTYPE_KEY) {
        let genotype = keys.remove(position);
        keys.insert(0, genotype);
    }
    keys
}

fn encode_sample(sample: &Sample, keys: &[String], metadata: &DocumentMetadata) -> Result<String> {
    let mut values = keys
        .iter()
        .map(|key| {
            let field = metadata
                .format
                .get(key)
                .ok_or_else(|| VcfError::UnknownFormatField(key.clone()))?;
            encode_sample_value(sample.get(key), field)
        })
        .collect::<Result<Vec<_>>>()?;

    // Trailing absent values need not be written.
    while values
        .last()
        .is_some_and(|value| value.is_empty() || value == MISSING)
    {
        values.pop();
    }

    if values.is_empty() {
        Ok(MISSING.to_string())
    } else {
        Ok(values.join(":"))
    }
}

fn encode_sample_value(value: Option<&SampleValue>, field: &FieldSchema) -> Result<String> {
    match value {
        None => Ok(MISSING.to_string()),
        Some(SampleValue::Genotype(genotype)) => Ok(encode_genotype(genotype)),
        Some(SampleValue::Value(Value::Array(values))) if values.is_empty() => Ok(MISSING.to_string()),
        Some(SampleValue::Value(value)) => encode_value(value, field),
    }
}
