//! # vcfcodec - Schema-Driven VCF Decoding and Encoding
//!
//! `vcfcodec` reads Variant Call Format text into a typed document model and
//! writes it back. Every INFO and FORMAT value is decoded according to the
//! schema its header declaration describes, so the same token can be an
//! integer, an array of floats or a list of annotation entries depending on
//! what the header says.
//!
//! ## Key Features
//!
//! - **Header-Driven Typing**: `Number=` and `Type=` attributes decide how a
//!   token is split and decoded; nothing is guessed from the data.
//!
//! - **Annotation Blocks**: pipe-delimited annotation fields such as Ensembl
//!   VEP `CSQ` are expanded into ordered child schemas and decoded into
//!   objects.
//!
//! - **Supplementary Metadata**: an optional JSON description can override
//!   header schemas and type annotation subfields.
//!
//! - **Lossless Round Trips**: unknown header lines pass through verbatim and
//!   re-parsing written output reproduces the same model.
//!
//! - **Sample Filtering**: output can be restricted to a subset of samples or
//!   drop sample columns entirely.
//!
//! ## Quick Start
//!
//! ```rust
//! use vcfcodec::{parse_vcf, write_vcf, Value, WriterConfig};
//!
//! let text = "##fileformat=VCFv4.2\n\
//! ###INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">\n\
//! ###INFO=<ID=DB,Number=0,Type=Flag,Description=\"dbSNP membership\">\n\
//! #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
//! 1\t100\trs1\tA\tG\t50\tPASS\tDP=14;DB\n";
//!
//! let document = parse_vcf(text, None)?;
//! let record = &document.records[0];
//! assert_eq!(record.info["DP"], Value::integer(14));
//! assert_eq!(record.info["DB"], Value::Flag(Some(true)));
//!
//! assert_eq!(write_vcf(&document, &WriterConfig::default())?, text);
//! # Ok::<(), vcfcodec::VcfError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`schema`]: header declarations to [`FieldSchema`]s, supplementary metadata
//! - [`value`]: scalar codec, percent escaping and recursive value trees
//! - [`genotype`]: `GT` codec and genotype classification
//! - [`document`]: document model, parser and writer
//! - [`derived`]: opt-in derived sample fields (allele balance)

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod derived;
pub mod document;
pub mod error;
pub mod genotype;
pub mod schema;
pub mod value;

pub use document::{
    encode_record, parse_record, parse_vcf, write_vcf, Document, DocumentMetadata, Record, Sample,
    SampleValue, VcfWriter, WriterConfig, WriterStats,
};
#[cfg(feature = "parallel")]
pub use document::parse_vcf_parallel;
pub use error::{Result, VcfError};
pub use genotype::{decode_genotype, encode_genotype, Genotype, GenotypeKind};
pub use schema::{Cardinality, FieldSchema, SupplementarySchema, ValueType};
pub use value::Value;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::derived::annotate_allele_balance;
    pub use crate::document::{
        parse_vcf, write_vcf, Document, DocumentMetadata, Record, SampleValue, VcfWriter,
        WriterConfig,
    };
    pub use crate::error::{Result, VcfError};
    pub use crate::genotype::{Genotype, GenotypeKind};
    pub use crate::schema::{
        Cardinality, FieldSchema, NestedSchema, NumberSpec, SupplementarySchema, ValueType,
    };
    pub use crate::value::Value;
}
