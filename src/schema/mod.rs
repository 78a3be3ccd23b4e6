//! # Field Schemas
//!
//! This module turns `##INFO` and `##FORMAT` header declarations into typed
//! [`FieldSchema`] values that drive every later decoding decision.
//!
//! ## Resolution Pipeline
//!
//! 1. [`declaration`] tokenizes the fixed-order declaration grammar
//!    (`ID`, `Number`, `Type`, `Description`, optional `Source`/`Version`).
//! 2. [`number`] maps the `Number=` token onto a [`Cardinality`] and its default
//!    element separator.
//! 3. [`supplement`] optionally replaces the header-derived properties with an
//!    externally supplied descriptor (labels, categories, overrides).
//! 4. [`nested`] expands pipe-delimited annotation blocks (Ensembl VEP `CSQ`)
//!    into an ordered list of child schemas.
//!
//! Schemas are built once per document and never mutated afterwards, so they
//! can be shared freely between threads decoding independent records.
//!
//! ## Example
//!
//! ```
//! use vcfcodec::schema::{resolve_info_field, Cardinality, ValueType};
//!
//! let field = resolve_info_field(
//!     r#"##INFO=<ID=DP,Number=1,Type=Integer,Description="Total Depth">"#,
//!     None,
//! )?;
//! assert_eq!(field.id, "DP");
//! assert_eq!(field.number.cardinality, Cardinality::Fixed(1));
//! assert_eq!(field.value_type, ValueType::Integer);
//! # Ok::<(), vcfcodec::VcfError>(())
//! ```

pub mod declaration;
pub mod nested;
pub mod number;
pub mod supplement;


use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use declaration::{
    parse_value_type, resolve_format_field, resolve_info_field, tokenize_declaration, Declaration,
    DeclarationKind,
};
pub use nested::{annotation_subfields, expand_annotation_block, is_annotation_block};
pub use number::{parse_number, Cardinality, NumberSpec, DEFAULT_SEPARATOR, NESTED_ITEM_SEPARATOR};
pub use supplement::{
    NumberType, SupplementaryField, SupplementaryFields, SupplementaryItem, SupplementaryNested,
    SupplementarySchema,
};

/// Identifier of an INFO or FORMAT field, unique within its scope
pub type FieldId = String;

/// Identifier of a category within a categorical field
pub type CategoryId = String;

/// Ordered field schemas, iterated in header declaration order
pub type FieldSchemaMap = IndexMap<FieldId, FieldSchema>;

/// Human-readable description of a category or of the missing value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDescription {
    /// Short display label
    pub label: String,
    /// Longer free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    /// String restricted to a known set of categories (supplementary data only)
    Categorical,
    /// Single character
    Character,
    /// Integer, with `Inf`/`NaN` spellings tolerated
    Integer,
    /// Presence flag
    Flag,
    /// Floating point number
    Float,
    /// Free text
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Categorical => write!(f, "Categorical"),
            ValueType::Character => write!(f, "Character"),
            ValueType::Integer => write!(f, "Integer"),
            ValueType::Flag => write!(f, "Flag"),
            ValueType::Float => write!(f, "Float"),
            ValueType::String => write!(f, "String"),
        }
    }
}

/// Schema of one INFO or FORMAT field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field identifier
    pub id: FieldId,
    /// Cardinality and element separator
    pub number: NumberSpec,
    /// Value type of each element
    pub value_type: ValueType,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Description from the header or supplementary data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the field is expected on every record
    #[serde(default)]
    pub required: bool,
    /// Meaning of the missing value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_value: Option<ValueDescription>,
    /// Known categories for categorical fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<IndexMap<CategoryId, ValueDescription>>,
    /// Child schemas for annotation-block fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<NestedSchema>,
    /// Identifier of the enclosing field for nested children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<FieldId>,
    /// INFO `Source` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// INFO `Version` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl FieldSchema {
    /// Create a schema with the given identity and no optional properties
    pub fn new(id: impl Into<FieldId>, number: NumberSpec, value_type: ValueType) -> Self {
        Self {
            id: id.into(),
            number,
            value_type,
            label: None,
            description: None,
            required: false,
            null_value: None,
            categories: None,
            nested: None,
            parent: None,
            source: None,
            version: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True for `Number=0` and `Number=1` fields, which hold one value rather than an array
    #[inline]
    pub fn is_single(&self) -> bool {
        self.number.cardinality.is_single()
    }

    /// True for presence-only flags (`Number=0`)
    #[inline]
    pub fn is_presence_flag(&self) -> bool {
        self.number.cardinality == Cardinality::Fixed(0)
    }
}

/// Child schemas of an annotation block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedSchema {
    /// Separator between child values within one entry
    pub separator: String,
    /// Child schemas in subfield order
    pub items: Vec<FieldSchema>,
}

impl NestedSchema {
    /// Look up a child schema by identifier
    pub fn item(&self, id: &str) -> Option<&FieldSchema> {
        self.items.iter().find(|item| item.id == id)
    }
}
