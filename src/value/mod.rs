//! # Typed Values
//!
//! A decoded INFO or FORMAT value is a tree: a typed scalar, an array of
//! values, or an annotation entry (an ordered object keyed by subfield id).
//! Which shape a token decodes to is decided entirely by its
//! [`FieldSchema`](crate::schema::FieldSchema), never by inspecting the text:
//!
//! | Schema | Token | Value |
//! |--------|-------|-------|
//! | `Number=1,Type=Integer` | `12` | `Integer(Some(12.0))` |
//! | `Number=.,Type=Float` | `1.5,.` | `Array([Float(Some(1.5)), Float(None)])` |
//! | `Number=0,Type=Flag` | *(key only)* | `Flag(Some(true))` |
//! | VEP `CSQ` | `A\|missense` | `Array([Object({Allele: "A", ...})])` |
//!
//! A missing scalar keeps its variant and carries `None`, so re-encoding
//! always knows which type it is dealing with.

pub mod scalar;
pub mod tree;

#[cfg(test)]
mod tests;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{FieldId, ValueType};

pub use scalar::{
    decode_scalar, decode_scalar_with, encode_scalar, escape, is_missing_token, unescape, MISSING,
};
pub use tree::{decode_format_value, decode_value, encode_info_entry, encode_value};

/// Decoded field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Single character
    Character(Option<char>),
    /// String or categorical value
    String(Option<String>),
    /// Integer; stored as `f64` so `Inf`/`NaN` spellings survive
    Integer(Option<f64>),
    /// Floating point number
    Float(Option<f64>),
    /// Flag
    Flag(Option<bool>),
    /// Multi-valued field
    Array(Vec<Value>),
    /// One annotation entry, keyed by subfield id in declaration order
    Object(Option<IndexMap<FieldId, Value>>),
}

impl Value {
    /// The missing value of a scalar type
    pub fn missing(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Categorical | ValueType::String => Value::String(None),
            ValueType::Character => Value::Character(None),
            ValueType::Integer => Value::Integer(None),
            ValueType::Float => Value::Float(None),
            ValueType::Flag => Value::Flag(None),
        }
    }

    /// Present string value
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(Some(value.into()))
    }

    /// Present integer value
    pub fn integer(value: i64) -> Self {
        Value::Integer(Some(value as f64))
    }

    /// Present float value
    pub fn float(value: f64) -> Self {
        Value::Float(Some(value))
    }

    /// True for a scalar whose payload is `None`
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Value::Character(None)
                | Value::String(None)
                | Value::Integer(None)
                | Value::Float(None)
                | Value::Flag(None)
                | Value::Object(None)
        )
    }

    /// Elements of an array value
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Numeric payload of an integer or float value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(value) | Value::Float(value) => *value,
            _ => None,
        }
    }

    /// Text payload of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => value.as_deref(),
            _ => None,
        }
    }

    /// Subfields of an annotation entry
    pub fn as_object(&self) -> Option<&IndexMap<FieldId, Value>> {
        match self {
            Value::Object(value) => value.as_ref(),
            _ => None,
        }
    }
}
