//! # Documents
//!
//! A [`Document`] is the in-memory form of a whole VCF file: the header
//! ([`DocumentMetadata`]) and one [`Record`] per data line.
//!
//! ```text
//! ##fileformat=VCFv4.2                      -> metadata.lines (verbatim)
//! ##INFO=<ID=DP,Number=1,Type=Integer,...>  -> metadata.lines + metadata.info["DP"]
//! #CHROM POS ID REF ALT QUAL FILTER INFO FORMAT S1 -> metadata.lines + metadata.samples
//! 1  100  rs1  A  G  50  PASS  DP=3  GT  0/1        -> records[0]
//! ```
//!
//! Every header line is kept verbatim so the writer can pass through
//! everything it does not understand. Records are independent of each other
//! and only depend on the schemas, which never change after the header.

pub mod parser;
pub mod writer;


use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;
use crate::genotype::Genotype;
use crate::schema::{FieldId, FieldSchemaMap, SupplementarySchema};
use crate::value::Value;

pub use parser::{parse_header_line, parse_record, parse_vcf};
#[cfg(feature = "parallel")]
pub use parser::parse_vcf_parallel;
pub use writer::{encode_record, write_vcf, VcfWriter, WriterConfig, WriterStats};

/// Number of fixed columns before FORMAT
pub const FIXED_COLUMNS: usize = 8;

/// Number of columns before the first sample (fixed columns plus FORMAT)
pub const SAMPLE_COLUMN_OFFSET: usize = 9;

/// Header state: verbatim lines, field schemas and sample names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Every header line in input order, including the column header
    pub lines: Vec<String>,
    /// INFO schemas in declaration order
    pub info: FieldSchemaMap,
    /// FORMAT schemas in declaration order
    pub format: FieldSchemaMap,
    /// Sample names in column order
    pub samples: Vec<String>,
    /// Supplementary metadata applied while resolving schemas
    #[serde(skip)]
    pub supplement: Option<Arc<SupplementarySchema>>,
}

impl DocumentMetadata {
    /// Empty metadata that resolves schemas against `supplement`
    pub fn new(supplement: Option<Arc<SupplementarySchema>>) -> Self {
        Self {
            supplement,
            ..Default::default()
        }
    }

    /// Index of the column header line, if present
    pub fn column_header_index(&self) -> Option<usize> {
        self.lines
            .iter()
            .rposition(|line| line.starts_with('#') && !line.starts_with("##"))
    }
}

/// Value of one FORMAT key in one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SampleValue {
    /// `GT`
    Genotype(Genotype),
    /// Any other FORMAT field
    Value(Value),
}

impl SampleValue {
    /// The genotype, if this is a `GT` value
    pub fn as_genotype(&self) -> Option<&Genotype> {
        match self {
            SampleValue::Genotype(genotype) => Some(genotype),
            SampleValue::Value(_) => None,
        }
    }

    /// The value, if this is not a `GT` value
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            SampleValue::Value(value) => Some(value),
            SampleValue::Genotype(_) => None,
        }
    }
}

/// FORMAT values of one sample, keyed in the order they appeared
pub type Sample = IndexMap<FieldId, SampleValue>;

/// One data line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Chromosome
    pub chrom: String,
    /// 1-based position
    pub pos: u64,
    /// Identifiers
    pub ids: Vec<String>,
    /// Reference allele
    pub reference: String,
    /// Alternate alleles; `None` for a missing element
    pub alts: Vec<Option<String>>,
    /// Phred-scaled quality
    pub quality: Option<f64>,
    /// Filter statuses
    pub filters: Vec<String>,
    /// INFO values keyed by field id
    pub info: IndexMap<FieldId, Value>,
    /// Per-sample FORMAT values in sample column order
    pub samples: Vec<Sample>,
}

impl Record {
    /// Record with the given locus and no other content
    pub fn new(chrom: impl Into<String>, pos: u64, reference: impl Into<String>) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
            ids: Vec::new(),
            reference: reference.into(),
            alts: Vec::new(),
            quality: None,
            filters: Vec::new(),
            info: IndexMap::new(),
            samples: Vec::new(),
        }
    }
}

/// Decoded VCF document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Header state
    pub metadata: DocumentMetadata,
    /// Data records in input order
    pub records: Vec<Record>,
}

impl Document {
    /// Serialize the decoded model to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the decoded model to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a model previously produced by [`Document::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
