//! Supplementary field metadata.
//!
//! Header declarations only carry `Number`, `Type` and a free-text
//! description. Downstream tools often need more: display labels, category
//! lists for categorical strings, the meaning of a missing value, and typed
//! schemas for the subfields of annotation blocks. That information arrives
//! from outside the document as JSON shaped like:
//!
//! ```json
//! {
//!   "info": {
//!     "CSQ": { "nestedFields": { "PHENO": { "type": "INTEGER", "numberType": "OTHER" } } },
//!     "DP":  { "type": "INTEGER", "numberType": "NUMBER", "numberCount": 1, "label": "Depth" }
//!   },
//!   "format": {}
//! }
//! ```
//!
//! A flat descriptor fully replaces the header-derived properties of the
//! field with the same id; a `nestedFields` descriptor only supplies child
//! schemas for an annotation block.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Read;

use super::number::{Cardinality, NumberSpec};
use super::{CategoryId, FieldId, FieldSchema, ValueDescription, ValueType};
use crate::error::{Result, VcfError};

/// Supplementary descriptors keyed by field id
pub type SupplementaryFields = IndexMap<FieldId, SupplementaryField>;

/// Externally supplied metadata for INFO and FORMAT fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplementarySchema {
    /// Descriptors for INFO fields
    #[serde(default)]
    pub info: SupplementaryFields,
    /// Descriptors for FORMAT fields
    #[serde(default)]
    pub format: SupplementaryFields,
}

impl SupplementarySchema {
    /// Deserialize from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deserialize from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One supplementary descriptor: either a flat override or nested child schemas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupplementaryField {
    /// Child schemas for an annotation block
    Nested(SupplementaryNested),
    /// Replacement properties for a flat field
    Item(SupplementaryItem),
}

impl SupplementaryField {
    /// The flat override, if this descriptor is one
    pub fn as_item(&self) -> Option<&SupplementaryItem> {
        match self {
            SupplementaryField::Item(item) => Some(item),
            SupplementaryField::Nested(_) => None,
        }
    }

    /// The nested child descriptors, if this descriptor is one
    pub fn as_nested(&self) -> Option<&SupplementaryNested> {
        match self {
            SupplementaryField::Nested(nested) => Some(nested),
            SupplementaryField::Item(_) => None,
        }
    }
}

/// Child descriptors of an annotation block, keyed by subfield name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementaryNested {
    /// Subfield descriptors
    pub nested_fields: IndexMap<FieldId, SupplementaryItem>,
}

/// Cardinality token as spelled in supplementary data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberType {
    /// Fixed count, taken from `numberCount`
    Number,
    /// One per alternate allele
    PerAlt,
    /// One per allele including the reference
    PerAltAndRef,
    /// One per possible genotype
    PerGenotype,
    /// Unspecified count
    Other,
}

impl NumberType {
    /// Combine with an optional count into a cardinality
    pub fn cardinality(self, count: Option<u32>) -> Result<Cardinality> {
        match self {
            NumberType::Number => count
                .map(Cardinality::Fixed)
                .ok_or_else(|| VcfError::InvalidCardinality("NUMBER without numberCount".to_string())),
            NumberType::PerAlt => Ok(Cardinality::PerAlt),
            NumberType::PerAltAndRef => Ok(Cardinality::PerAltAndRef),
            NumberType::PerGenotype => Ok(Cardinality::PerGenotype),
            NumberType::Other => Ok(Cardinality::Variable),
        }
    }
}

/// Flat field descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementaryItem {
    /// Value type
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cardinality kind
    pub number_type: NumberType,
    /// Count for `NUMBER`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_count: Option<u32>,
    /// Known categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<IndexMap<CategoryId, ValueDescription>>,
    /// Meaning of the missing value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_value: Option<ValueDescription>,
    /// Whether the field is always present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Element separator for multi-valued fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

impl SupplementaryItem {
    /// Build a field schema from this descriptor.
    ///
    /// Multi-valued descriptors without an explicit separator get
    /// `default_separator`.
    pub fn to_field_schema(&self, id: &str, default_separator: &str) -> Result<FieldSchema> {
        let cardinality = self.number_type.cardinality(self.number_count)?;
        let separator = self.separator.clone().or_else(|| {
            (!cardinality.is_single()).then(|| default_separator.to_string())
        });

        let mut field = FieldSchema::new(
            id,
            NumberSpec {
                cardinality,
                separator,
            },
            self.value_type,
        );
        field.label = self.label.clone();
        field.description = self.description.clone();
        field.required = self.required.unwrap_or(false);
        field.null_value = self.null_value.clone();
        field.categories = self.categories.clone();
        Ok(field)
    }
}
