//! `##INFO` / `##FORMAT` declaration parsing.
//!
//! The grammar is positional: attributes must appear as `ID`, `Number`,
//! `Type`, `Description` and, for INFO only, optional `Source` then
//! `Version`. Reordered attributes are rejected even though other VCF
//! tooling accepts them.

use log::debug;

use super::nested::{expand_annotation_block, is_annotation_block};
use super::number::{parse_number, Cardinality, DEFAULT_SEPARATOR};
use super::supplement::SupplementaryFields;
use super::{FieldSchema, ValueType};
use crate::error::{Result, VcfError};

/// Scope of a field declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `##INFO=<...>`
    Info,
    /// `##FORMAT=<...>`
    Format,
}

impl DeclarationKind {
    fn prefix(self) -> &'static str {
        match self {
            DeclarationKind::Info => "##INFO=<ID=",
            DeclarationKind::Format => "##FORMAT=<ID=",
        }
    }
}

/// Raw attribute tokens of one declaration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// `ID` value
    pub id: &'a str,
    /// `Number` token
    pub number: &'a str,
    /// `Type` token
    pub value_type: &'a str,
    /// Unquoted `Description`
    pub description: &'a str,
    /// Unquoted `Source` (INFO only)
    pub source: Option<&'a str>,
    /// Unquoted `Version` (INFO only)
    pub version: Option<&'a str>,
}

/// Split a declaration line into its attribute tokens
pub fn tokenize_declaration(line: &str, kind: DeclarationKind) -> Result<Declaration<'_>> {
    let invalid = || VcfError::InvalidDeclaration(line.to_string());

    let rest = line.strip_prefix(kind.prefix()).ok_or_else(invalid)?;
    let (id, rest) = take_shortest(rest, ",Number=").ok_or_else(invalid)?;
    let (number, rest) = take_shortest(rest, ",Type=").ok_or_else(invalid)?;
    let (value_type, rest) = take_shortest(rest, ",Description=\"").ok_or_else(invalid)?;
    let (description, source, version) =
        split_description(rest, kind == DeclarationKind::Info).ok_or_else(invalid)?;

    Ok(Declaration {
        id,
        number,
        value_type,
        description,
        source,
        version,
    })
}

/// Resolve a `Type=` token
pub fn parse_value_type(token: &str) -> Result<ValueType> {
    match token {
        "Character" => Ok(ValueType::Character),
        "Flag" => Ok(ValueType::Flag),
        "Float" => Ok(ValueType::Float),
        "Integer" => Ok(ValueType::Integer),
        "String" => Ok(ValueType::String),
        _ => Err(VcfError::InvalidValueType(token.to_string())),
    }
}

/// Resolve an `##INFO` declaration, applying supplementary overrides
pub fn resolve_info_field(line: &str, supplement: Option<&SupplementaryFields>) -> Result<FieldSchema> {
    resolve_field(line, DeclarationKind::Info, supplement)
}

/// Resolve a `##FORMAT` declaration, applying supplementary overrides
pub fn resolve_format_field(
    line: &str,
    supplement: Option<&SupplementaryFields>,
) -> Result<FieldSchema> {
    resolve_field(line, DeclarationKind::Format, supplement)
}

fn resolve_field(
    line: &str,
    kind: DeclarationKind,
    supplement: Option<&SupplementaryFields>,
) -> Result<FieldSchema> {
    let declaration = tokenize_declaration(line, kind)?;
    let descriptor = supplement.and_then(|fields| fields.get(declaration.id));

    let mut field = match descriptor.and_then(|d| d.as_item()) {
        Some(item) => {
            debug!("Field {} overridden by supplementary metadata", declaration.id);
            item.to_field_schema(declaration.id, DEFAULT_SEPARATOR)?
        }
        None => FieldSchema::new(
            declaration.id,
            parse_number(declaration.number)?,
            parse_value_type(declaration.value_type)?,
        )
        .with_description(declaration.description),
    };

    if kind == DeclarationKind::Info {
        field.source = declaration.source.map(str::to_string);
        field.version = declaration.version.map(str::to_string);
    }

    if field.number.cardinality == Cardinality::Fixed(0) && field.value_type != ValueType::Flag {
        return Err(VcfError::InvalidDeclaration(line.to_string()));
    }

    if is_annotation_block(&field) {
        let nested = descriptor.and_then(|d| d.as_nested());
        field.nested = Some(expand_annotation_block(&field, nested)?);
    }

    debug!(
        "Registered {:?} field {} (Number={}, Type={})",
        kind, field.id, field.number.cardinality, field.value_type
    );
    Ok(field)
}

/// Shortest non-empty prefix of `input` followed by `delimiter`
fn take_shortest<'a>(input: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let first = input.chars().next()?.len_utf8();
    let end = input[first..].find(delimiter)? + first;
    Some((&input[..end], &input[end + delimiter.len()..]))
}

/// Split `input` (text after `Description="`) into description, source and version.
///
/// The description ends at the first closing quote after which the rest of
/// the declaration still parses.
fn split_description(
    input: &str,
    allow_source_version: bool,
) -> Option<(&str, Option<&str>, Option<&str>)> {
    input
        .match_indices('"')
        .filter(|(pos, _)| *pos > 0)
        .find_map(|(pos, _)| {
            let tail = &input[pos + 1..];
            let (source, version) = if allow_source_version {
                parse_source_version(tail)?
            } else {
                (None, closing(tail)?)
            };
            Some((&input[..pos], source, version))
        })
}

fn parse_source_version(tail: &str) -> Option<(Option<&str>, Option<&str>)> {
    match tail.strip_prefix(",Source=\"") {
        Some(rest) => quoted_then(rest, parse_version).map(|(source, version)| (Some(source), version)),
        None => parse_version(tail).map(|version| (None, version)),
    }
}

fn parse_version(tail: &str) -> Option<Option<&str>> {
    match tail.strip_prefix(",Version=\"") {
        Some(rest) => quoted_then(rest, closing).map(|(version, _)| Some(version)),
        None => closing(tail),
    }
}

fn closing(tail: &str) -> Option<Option<&str>> {
    tail.starts_with('>').then_some(None)
}

/// Shortest non-empty quoted value whose remainder satisfies `then`
fn quoted_then<'a, T>(
    input: &'a str,
    then: impl Fn(&'a str) -> Option<T>,
) -> Option<(&'a str, T)> {
    input
        .match_indices('"')
        .filter(|(pos, _)| *pos > 0)
        .find_map(|(pos, _)| then(&input[pos + 1..]).map(|rest| (&input[..pos], rest)))
}
