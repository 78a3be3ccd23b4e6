//! Schema-driven value trees.
//!
//! A field's [`Cardinality`](crate::schema::Cardinality) decides whether a
//! token is one value or an array, and its nested schema decides whether each
//! element is a scalar or an annotation entry. Children of an annotation
//! entry follow slightly different rules when encoded: a missing
//! single-valued child is an empty part rather than `.`, and multi-valued
//! children are joined with `&` unless their schema names another separator.

use indexmap::IndexMap;

use super::scalar::{decode_scalar, encode_scalar_token, MISSING};
use super::Value;
use crate::error::{Result, VcfError};
use crate::schema::{FieldSchema, NestedSchema, ValueType, DEFAULT_SEPARATOR, NESTED_ITEM_SEPARATOR};

/// Decode a token according to its field schema
pub fn decode_value(token: &str, field: &FieldSchema) -> Result<Value> {
    if field.is_single() {
        decode_single(token, field)
    } else {
        decode_multi(token, field)
    }
}

/// Decode a FORMAT token. An array whose elements are all missing collapses
/// to an empty array.
pub fn decode_format_value(token: &str, field: &FieldSchema) -> Result<Value> {
    match decode_value(token, field)? {
        Value::Array(values) if values.iter().all(Value::is_missing) => Ok(Value::Array(Vec::new())),
        value => Ok(value),
    }
}

fn decode_single(token: &str, field: &FieldSchema) -> Result<Value> {
    match &field.nested {
        Some(nested) => decode_nested(token, nested),
        None => decode_scalar(token, field.value_type),
    }
}

fn decode_multi(token: &str, field: &FieldSchema) -> Result<Value> {
    if token.is_empty() {
        return Ok(Value::Array(Vec::new()));
    }

    let separator = field.number.separator_or(DEFAULT_SEPARATOR);
    if field.value_type == ValueType::Character && !token.contains(separator) {
        return token
            .chars()
            .map(|c| decode_single(c.encode_utf8(&mut [0; 4]), field))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array);
    }

    token
        .split(separator)
        .map(|part| decode_single(part, field))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn decode_nested(token: &str, nested: &NestedSchema) -> Result<Value> {
    if token == MISSING {
        return Ok(Value::Object(None));
    }

    let parts: Vec<&str> = token.split(nested.separator.as_str()).collect();
    if parts.len() != nested.items.len() {
        return Err(VcfError::NestedArityMismatch {
            token: token.to_string(),
            expected: nested.items.len(),
            actual: parts.len(),
        });
    }

    let mut entry = IndexMap::with_capacity(parts.len());
    for (part, item) in parts.into_iter().zip(&nested.items) {
        entry.insert(item.id.clone(), decode_value(part, item)?);
    }
    Ok(Value::Object(Some(entry)))
}

/// Encode a value according to its field schema.
///
/// Missing values render as `.`; arrays are joined with the field separator.
pub fn encode_value(value: &Value, field: &FieldSchema) -> Result<String> {
    if field.is_single() {
        encode_single(value, field, MISSING)
    } else {
        encode_multi(value, field, MISSING, field.number.separator_or(DEFAULT_SEPARATOR))
    }
}

/// Encode one INFO entry: the bare id for a set presence flag, nothing for
/// an unset one, `id=value` otherwise.
pub fn encode_info_entry(value: &Value, field: &FieldSchema) -> Result<Option<String>> {
    if field.is_presence_flag() {
        return match value {
            Value::Flag(Some(true)) => Ok(Some(field.id.clone())),
            Value::Flag(_) => Ok(None),
            _ => Err(mismatch(field, "flag")),
        };
    }
    Ok(Some(format!("{}={}", field.id, encode_value(value, field)?)))
}

fn encode_single(value: &Value, field: &FieldSchema, missing: &str) -> Result<String> {
    match &field.nested {
        Some(nested) => encode_nested(value, field, nested),
        None => encode_scalar_token(value, field.value_type, missing)
            .ok_or_else(|| mismatch(field, &field.value_type.to_string())),
    }
}

fn encode_multi(value: &Value, field: &FieldSchema, missing: &str, separator: &str) -> Result<String> {
    let Value::Array(values) = value else {
        return Err(mismatch(field, "array"));
    };
    let parts = values
        .iter()
        .map(|element| encode_single(element, field, missing))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(separator))
}

fn encode_nested(value: &Value, field: &FieldSchema, nested: &NestedSchema) -> Result<String> {
    let entry = match value {
        Value::Object(Some(entry)) => entry,
        Value::Object(None) => return Ok(MISSING.to_string()),
        _ => return Err(mismatch(field, "object")),
    };

    let parts = nested
        .items
        .iter()
        .map(|item| match entry.get(&item.id) {
            None => Ok(String::new()),
            Some(child) if item.is_single() => encode_single(child, item, ""),
            // An empty part reads back as an empty list, so missing
            // elements of a list child keep the `.` marker.
            Some(child) => encode_multi(
                child,
                item,
                MISSING,
                item.number.separator_or(NESTED_ITEM_SEPARATOR),
            ),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(&nested.separator))
}

fn mismatch(field: &FieldSchema, expected: &str) -> VcfError {
    VcfError::ValueTypeMismatch {
        field: field.id.clone(),
        expected: expected.to_string(),
    }
}
