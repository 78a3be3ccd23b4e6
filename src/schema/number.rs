//! `Number=` cardinality resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, VcfError};

/// Separator between elements of a multi-valued field
pub const DEFAULT_SEPARATOR: &str = ",";

/// Separator between elements of a multi-valued child inside an annotation block
pub const NESTED_ITEM_SEPARATOR: &str = "&";

/// How many values a field holds per record or sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    /// Exactly `n` values (`Number=n`)
    Fixed(u32),
    /// One value per alternate allele (`Number=A`)
    PerAlt,
    /// One value per allele including the reference (`Number=R`)
    PerAltAndRef,
    /// One value per possible genotype (`Number=G`)
    PerGenotype,
    /// Unspecified count (`Number=.`)
    Variable,
}

impl Cardinality {
    /// `Fixed(0)` and `Fixed(1)` hold a single value; everything else is an array
    #[inline]
    pub fn is_single(&self) -> bool {
        matches!(self, Cardinality::Fixed(0) | Cardinality::Fixed(1))
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Fixed(count) => write!(f, "{}", count),
            Cardinality::PerAlt => write!(f, "A"),
            Cardinality::PerAltAndRef => write!(f, "R"),
            Cardinality::PerGenotype => write!(f, "G"),
            Cardinality::Variable => write!(f, "."),
        }
    }
}

/// Cardinality together with the element separator used for arrays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSpec {
    /// Cardinality policy
    pub cardinality: Cardinality,
    /// Element separator, absent for single-valued fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

impl NumberSpec {
    /// Cardinality with the default `,` separator for multi-valued policies
    pub fn new(cardinality: Cardinality) -> Self {
        let separator = if cardinality.is_single() {
            None
        } else {
            Some(DEFAULT_SEPARATOR.to_string())
        };
        Self {
            cardinality,
            separator,
        }
    }

    /// Replace the separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// The separator, or `fallback` when none is set
    pub fn separator_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.separator.as_deref().unwrap_or(fallback)
    }
}

/// Resolve a raw `Number=` token.
///
/// `A`, `R`, `G` and `.` always use the `,` separator; an integer count gets
/// one only when it is greater than one.
pub fn parse_number(token: &str) -> Result<NumberSpec> {
    let cardinality = match token {
        "A" => Cardinality::PerAlt,
        "R" => Cardinality::PerAltAndRef,
        "G" => Cardinality::PerGenotype,
        "." => Cardinality::Variable,
        _ => {
            if !token.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(VcfError::InvalidCardinality(token.to_string()));
            }
            let count = token
                .parse::<u32>()
                .map_err(|_| VcfError::InvalidCardinality(token.to_string()))?;
            Cardinality::Fixed(count)
        }
    };
    Ok(NumberSpec::new(cardinality))
}
