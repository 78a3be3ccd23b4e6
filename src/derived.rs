//! Derived sample fields.
//!
//! Decoding never invents values. Callers that want allele balance run
//! [`annotate_allele_balance`] on a decoded document; the new field is then
//! declared in the header and written like any other FORMAT field.

use log::{debug, info};

use crate::document::{Document, SampleValue};
use crate::schema::{Cardinality, FieldSchema, NumberSpec, ValueType};
use crate::value::Value;

/// FORMAT key holding per-allele read depths
pub const ALLELE_DEPTH_KEY: &str = "AD";

/// FORMAT key of the derived allele balance
pub const ALLELE_BALANCE_KEY: &str = "VIAB";

const ALLELE_BALANCE_DECLARATION: &str =
    "##FORMAT=<ID=VIAB,Number=1,Type=Float,Description=\"Allele balance\">";

/// Schema of the derived allele balance field
pub fn allele_balance_schema() -> FieldSchema {
    FieldSchema::new(
        ALLELE_BALANCE_KEY,
        NumberSpec::new(Cardinality::Fixed(1)),
        ValueType::Float,
    )
    .with_description("Allele balance")
}

/// Depth of the first allele divided by the total depth.
///
/// `None` when any depth is missing, no depths are given or the total is zero.
pub fn allele_balance(depths: &[Value]) -> Option<f64> {
    let depths = depths
        .iter()
        .map(Value::as_f64)
        .collect::<Option<Vec<f64>>>()?;
    let first = *depths.first()?;
    let total: f64 = depths.iter().sum();
    (total != 0.0).then(|| first / total)
}

/// Add `VIAB` to every sample carrying `AD`.
///
/// Does nothing when `AD` is not declared. The `VIAB` schema and a matching
/// `##FORMAT` line (placed before the column header) are registered once.
/// Returns the number of samples annotated.
pub fn annotate_allele_balance(document: &mut Document) -> usize {
    let metadata = &mut document.metadata;
    if !metadata.format.contains_key(ALLELE_DEPTH_KEY) {
        debug!("No {} field declared, skipping allele balance", ALLELE_DEPTH_KEY);
        return 0;
    }

    if !metadata.format.contains_key(ALLELE_BALANCE_KEY) {
        let field = allele_balance_schema();
        let position = metadata
            .column_header_index()
            .unwrap_or(metadata.lines.len());
        metadata
            .lines
            .insert(position, ALLELE_BALANCE_DECLARATION.to_string());
        metadata.format.insert(field.id.clone(), field);
    }

    let mut annotated = 0;
    for sample in document.records.iter_mut().flat_map(|r| r.samples.iter_mut()) {
        let Some(SampleValue::Value(Value::Array(depths))) = sample.get(ALLELE_DEPTH_KEY) else {
            continue;
        };
        let balance = allele_balance(depths);
        sample.insert(
            ALLELE_BALANCE_KEY.to_string(),
            SampleValue::Value(Value::Float(balance)),
        );
        annotated += 1;
    }

    info!("Annotated {} samples with allele balance", annotated);
    annotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_vcf;
    use crate::schema::resolve_format_field;

    const VCF: &str = "##fileformat=VCFv4.2\n\
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n\
##FORMAT=<ID=AD,Number=R,Type=Integer,Description=\"Allelic depths\">\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2\tS3\n\
1\t10\t.\tA\tG\t.\t.\t.\tGT:AD\t0/1:3,1\t1/1:0,0\t0/0:.,4\n";

    #[test]
    fn test_allele_balance_values() {
        assert_eq!(allele_balance(&[Value::integer(3), Value::integer(1)]), Some(0.75));
        assert_eq!(allele_balance(&[Value::integer(0), Value::integer(0)]), None);
        assert_eq!(allele_balance(&[Value::integer(2), Value::Integer(None)]), None);
        assert_eq!(allele_balance(&[]), None);
    }

    #[test]
    fn test_annotate_document() {
        let mut document = parse_vcf(VCF, None).unwrap();
        assert_eq!(annotate_allele_balance(&mut document), 3);

        let samples = &document.records[0].samples;
        assert_eq!(
            samples[0].get(ALLELE_BALANCE_KEY),
            Some(&SampleValue::Value(Value::Float(Some(0.75))))
        );
        assert_eq!(
            samples[1].get(ALLELE_BALANCE_KEY),
            Some(&SampleValue::Value(Value::Float(None)))
        );
        assert_eq!(
            samples[2].get(ALLELE_BALANCE_KEY),
            Some(&SampleValue::Value(Value::Float(None)))
        );

        let lines = &document.metadata.lines;
        assert_eq!(lines[lines.len() - 2], ALLELE_BALANCE_DECLARATION);
        assert!(lines[lines.len() - 1].starts_with("#CHROM"));
        assert_eq!(
            document.metadata.format.get(ALLELE_BALANCE_KEY),
            Some(&allele_balance_schema())
        );
        assert_eq!(
            resolve_format_field(ALLELE_BALANCE_DECLARATION, None).unwrap(),
            allele_balance_schema()
        );
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let mut document = parse_vcf(VCF, None).unwrap();
        annotate_allele_balance(&mut document);
        let header_len = document.metadata.lines.len();
        annotate_allele_balance(&mut document);
        assert_eq!(document.metadata.lines.len(), header_len);
    }

    #[test]
    fn test_without_allele_depths() {
        let mut document = parse_vcf(
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n1\t10\t.\tA\tG\t.\t.\t.\n",
            None,
        )
        .unwrap();
        assert_eq!(annotate_allele_balance(&mut document), 0);
        assert!(!document.metadata.format.contains_key(ALLELE_BALANCE_KEY));
    }
}
