//! Annotation block expansion.
//!
//! Variant-effect annotators such as Ensembl VEP pack many subfields into a
//! single INFO field. The header announces the layout in the description:
//!
//! ```text
//! ##INFO=<ID=CSQ,Number=.,Type=String,Description="Consequence annotations from Ensembl VEP. Format: Allele|Consequence|IMPACT">
//! ```
//!
//! Each comma-separated entry of the field is then a `|`-separated tuple
//! with one part per named subfield.

use log::debug;

use super::number::{Cardinality, NumberSpec, NESTED_ITEM_SEPARATOR};
use super::supplement::SupplementaryNested;
use super::{FieldSchema, NestedSchema, ValueType};
use crate::error::{Result, VcfError};

/// Separator between subfields of one annotation entry
pub const ANNOTATION_SEPARATOR: &str = "|";

const ANNOTATION_MARKER: &str = "Consequence annotations from Ensembl VEP";
const LAYOUT_MARKER: &str = " Format: ";

/// The `|`-delimited subfield list of an annotation block description.
///
/// The marker is followed by exactly one arbitrary character (normally
/// `.`) before `" Format: "`.
pub fn annotation_subfields(description: &str) -> Option<&str> {
    let start = description.find(ANNOTATION_MARKER)? + ANNOTATION_MARKER.len();
    let mut rest = description[start..].chars();
    rest.next()?;
    let layout = rest.as_str().strip_prefix(LAYOUT_MARKER)?;
    let layout = layout.lines().next().unwrap_or_default();
    (!layout.is_empty()).then_some(layout)
}

/// Whether the field's description declares an annotation block
pub fn is_annotation_block(field: &FieldSchema) -> bool {
    field
        .description
        .as_deref()
        .and_then(annotation_subfields)
        .is_some()
}

/// Build child schemas for an annotation block field.
///
/// Subfields with a supplementary descriptor take its properties; all others
/// default to a single optional string.
pub fn expand_annotation_block(
    parent: &FieldSchema,
    supplement: Option<&SupplementaryNested>,
) -> Result<NestedSchema> {
    let description = parent.description.as_deref().unwrap_or_default();
    let layout = annotation_subfields(description)
        .ok_or_else(|| VcfError::InvalidNestedMetadata(description.to_string()))?;

    let items = layout
        .split(ANNOTATION_SEPARATOR)
        .map(|name| {
            let descriptor = supplement.and_then(|s| s.nested_fields.get(name));
            let mut child = match descriptor {
                Some(item) => item.to_field_schema(name, NESTED_ITEM_SEPARATOR)?,
                None => FieldSchema::new(
                    name,
                    NumberSpec::new(Cardinality::Fixed(1)),
                    ValueType::String,
                ),
            };
            child.parent = Some(parent.id.clone());
            Ok(child)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Expanded annotation block {} into {} subfields",
        parent.id,
        items.len()
    );

    Ok(NestedSchema {
        separator: ANNOTATION_SEPARATOR.to_string(),
        items,
    })
}
