//! Genotype (`GT`) codec.
//!
//! A genotype call lists allele indices separated by `/` (unphased) or `|`
//! (phased), with `.` for an uncalled allele: `0/1`, `1|1`, `./.`, `0`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VcfError};
use crate::value::{is_missing_token, MISSING};

/// Classification of a genotype call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenotypeKind {
    /// Every allele is missing
    Missing,
    /// Some, but not all, alleles are missing
    PartiallyMissing,
    /// Every allele is the reference
    HomozygousRef,
    /// Every allele is the same alternate
    HomozygousAlt,
    /// Alleles differ
    Heterozygous,
}

/// Decoded genotype call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genotype {
    /// Allele indices, `None` for an uncalled allele
    pub alleles: Vec<Option<u32>>,
    /// Phasing, only recorded for calls with more than one allele
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phased: Option<bool>,
    /// Classification
    pub kind: GenotypeKind,
}

impl Genotype {
    /// Build a genotype from allele indices, classifying it
    pub fn new(alleles: Vec<Option<u32>>, phased: bool) -> Self {
        let kind = classify(&alleles);
        let phased = (alleles.len() > 1).then_some(phased);
        Self {
            alleles,
            phased,
            kind,
        }
    }

    /// Whether the call is phased
    pub fn is_phased(&self) -> bool {
        self.phased.unwrap_or(false)
    }
}

/// Decode a `GT` token
pub fn decode_genotype(token: &str) -> Result<Genotype> {
    let alleles = token
        .split(['|', '/'])
        .map(|allele| {
            if is_missing_token(allele) {
                Ok(None)
            } else {
                allele
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|_| VcfError::InvalidNumber(token.to_string()))
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Genotype::new(alleles, token.contains('|')))
}

/// Encode a genotype, joining alleles with `|` when phased and `/` otherwise
pub fn encode_genotype(genotype: &Genotype) -> String {
    let separator = if genotype.is_phased() { "|" } else { "/" };
    genotype
        .alleles
        .iter()
        .map(|allele| allele.map_or_else(|| MISSING.to_string(), |index| index.to_string()))
        .collect::<Vec<_>>()
        .join(separator)
}

fn classify(alleles: &[Option<u32>]) -> GenotypeKind {
    let missing = alleles.iter().filter(|allele| allele.is_none()).count();
    if missing == alleles.len() {
        return GenotypeKind::Missing;
    }
    if missing > 0 {
        return GenotypeKind::PartiallyMissing;
    }

    let first = alleles[0];
    if alleles.iter().all(|allele| *allele == Some(0)) {
        GenotypeKind::HomozygousRef
    } else if alleles.iter().all(|allele| *allele == first) {
        GenotypeKind::HomozygousAlt
    } else {
        GenotypeKind::Heterozygous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haploid_reference() {
        let genotype = decode_genotype("0").unwrap();
        assert_eq!(genotype.alleles, vec![Some(0)]);
        assert_eq!(genotype.kind, GenotypeKind::HomozygousRef);
        assert_eq!(genotype.phased, None);
        assert_eq!(encode_genotype(&genotype), "0");
    }

    #[test]
    fn test_phased_heterozygous() {
        let genotype = decode_genotype("0|1").unwrap();
        assert_eq!(genotype.kind, GenotypeKind::Heterozygous);
        assert_eq!(genotype.phased, Some(true));
        assert_eq!(encode_genotype(&genotype), "0|1");
    }

    #[test]
    fn test_unphased_homozygous_alt() {
        let genotype = decode_genotype("1/1").unwrap();
        assert_eq!(genotype.kind, GenotypeKind::HomozygousAlt);
        assert_eq!(genotype.phased, Some(false));
        assert_eq!(encode_genotype(&genotype), "1/1");
    }

    #[test]
    fn test_missing_calls() {
        assert_eq!(decode_genotype("./.").unwrap().kind, GenotypeKind::Missing);
        assert_eq!(decode_genotype(".").unwrap().kind, GenotypeKind::Missing);
        assert_eq!(
            decode_genotype("0/.").unwrap().kind,
            GenotypeKind::PartiallyMissing
        );
        assert_eq!(encode_genotype(&decode_genotype(".|1").unwrap()), ".|1");
    }

    #[test]
    fn test_mixed_separators_and_polyploid() {
        let genotype = decode_genotype("1/2|2").unwrap();
        assert_eq!(genotype.alleles, vec![Some(1), Some(2), Some(2)]);
        assert_eq!(genotype.kind, GenotypeKind::Heterozygous);
        assert_eq!(genotype.phased, Some(true));

        let triploid = decode_genotype("2/2/2").unwrap();
        assert_eq!(triploid.kind, GenotypeKind::HomozygousAlt);
    }

    #[test]
    fn test_invalid_allele() {
        assert!(matches!(
            decode_genotype("0/x"),
            Err(VcfError::InvalidNumber(token)) if token == "0/x"
        ));
        assert!(decode_genotype("-1/0").is_err());
    }
}
