use super::*;
use crate::error::VcfError;
use crate::schema::{
    resolve_info_field, Cardinality, FieldSchema, NestedSchema, NumberSpec, ValueType,
};

fn field(id: &str, cardinality: Cardinality, value_type: ValueType) -> FieldSchema {
    FieldSchema::new(id, NumberSpec::new(cardinality), value_type)
}

fn nested_field() -> FieldSchema {
    let mut parent = field("XX", Cardinality::Variable, ValueType::String);
    let mut name = field("n", Cardinality::Fixed(1), ValueType::String);
    name.parent = Some("XX".to_string());
    let mut counts = field("c", Cardinality::Variable, ValueType::Integer);
    counts.number = counts.number.with_separator("&");
    counts.parent = Some("XX".to_string());
    parent.nested = Some(NestedSchema {
        separator: "|".to_string(),
        items: vec![name, counts],
    });
    parent
}

fn entry(name: &str, counts: &[i64]) -> Value {
    let mut object = indexmap::IndexMap::new();
    object.insert("n".to_string(), Value::string(name));
    object.insert(
        "c".to_string(),
        Value::Array(counts.iter().copied().map(Value::integer).collect()),
    );
    Value::Object(Some(object))
}

// ============================================================================
// Scalar codec
// ============================================================================

#[test]
fn test_missing_tokens() {
    for value_type in [
        ValueType::String,
        ValueType::Character,
        ValueType::Integer,
        ValueType::Float,
        ValueType::Flag,
    ] {
        assert_eq!(decode_scalar(".", value_type).unwrap(), Value::missing(value_type));
        assert_eq!(decode_scalar("", value_type).unwrap(), Value::missing(value_type));
    }
}

#[test]
fn test_decode_numbers() {
    assert_eq!(decode_scalar("12", ValueType::Integer).unwrap(), Value::integer(12));
    assert_eq!(decode_scalar("-3", ValueType::Integer).unwrap(), Value::integer(-3));
    assert_eq!(decode_scalar("0.25", ValueType::Float).unwrap(), Value::float(0.25));
    assert_eq!(decode_scalar("1e-3", ValueType::Float).unwrap(), Value::float(0.001));

    assert!(matches!(
        decode_scalar("1.5", ValueType::Integer),
        Err(VcfError::InvalidNumber(_))
    ));
    assert!(matches!(
        decode_scalar("abc", ValueType::Float),
        Err(VcfError::InvalidNumber(_))
    ));
}

#[test]
fn test_decode_special_numbers() {
    for token in ["Inf", "INF", "infinity", "Infinity", "+inf"] {
        assert_eq!(
            decode_scalar(token, ValueType::Float).unwrap().as_f64(),
            Some(f64::INFINITY),
            "{token}"
        );
        assert_eq!(
            decode_scalar(token, ValueType::Integer).unwrap().as_f64(),
            Some(f64::INFINITY),
            "{token}"
        );
    }
    assert_eq!(
        decode_scalar("-Infinity", ValueType::Integer).unwrap().as_f64(),
        Some(f64::NEG_INFINITY)
    );
    assert!(decode_scalar("NaN", ValueType::Float)
        .unwrap()
        .as_f64()
        .is_some_and(f64::is_nan));
}

#[test]
fn test_encode_special_numbers() {
    assert_eq!(encode_scalar(&Value::float(f64::INFINITY), ValueType::Float).unwrap(), "Infinity");
    assert_eq!(
        encode_scalar(&Value::Integer(Some(f64::NEG_INFINITY)), ValueType::Integer).unwrap(),
        "-Infinity"
    );
    assert_eq!(encode_scalar(&Value::float(f64::NAN), ValueType::Float).unwrap(), "NaN");
    assert_eq!(encode_scalar(&Value::integer(42), ValueType::Integer).unwrap(), "42");
    assert_eq!(encode_scalar(&Value::float(0.5), ValueType::Float).unwrap(), "0.5");
}

#[test]
fn test_flags() {
    assert_eq!(decode_scalar("true", ValueType::Flag).unwrap(), Value::Flag(Some(true)));
    assert_eq!(decode_scalar("false", ValueType::Flag).unwrap(), Value::Flag(Some(false)));
    assert!(matches!(
        decode_scalar("1", ValueType::Flag),
        Err(VcfError::InvalidFlag(_))
    ));
    assert_eq!(encode_scalar(&Value::Flag(Some(false)), ValueType::Flag).unwrap(), "false");
}

#[test]
fn test_characters() {
    assert_eq!(
        decode_scalar("A", ValueType::Character).unwrap(),
        Value::Character(Some('A'))
    );
    assert_eq!(
        decode_scalar("%3A", ValueType::Character).unwrap(),
        Value::Character(Some(':'))
    );
    assert!(matches!(
        decode_scalar("AB", ValueType::Character),
        Err(VcfError::InvalidCharacter(_))
    ));
    assert_eq!(
        encode_scalar(&Value::Character(Some(';')), ValueType::Character).unwrap(),
        "%3B"
    );
}

#[test]
fn test_unescape_single_pass() {
    assert_eq!(unescape("%%3A%3B%3D%25%2C%0D%0A%09%3A"), "%:;=%,\r\n\t:");
    assert_eq!(unescape("y%2Cy"), "y,y");
    assert_eq!(unescape("100%"), "100%");
    assert_eq!(unescape("%2"), "%2");
    assert_eq!(unescape("plain"), "plain");
}

#[test]
fn test_escape_every_occurrence() {
    assert_eq!(escape("a,b,c"), "a%2Cb%2Cc");
    assert_eq!(escape("50%;x=y"), "50%25%3Bx%3Dy");
    assert_eq!(escape("tab\there"), "tab%09here");
    assert_eq!(unescape(&escape("%:;=%,\r\n\t:")), "%:;=%,\r\n\t:");
}

#[test]
fn test_decode_without_unescaping() {
    assert_eq!(
        decode_scalar_with("y%2Cy", ValueType::String, false).unwrap(),
        Value::string("y%2Cy")
    );
    assert_eq!(
        decode_scalar_with("y%2Cy", ValueType::String, true).unwrap(),
        Value::string("y,y")
    );
}

#[test]
fn test_encode_scalar_type_mismatch() {
    assert!(matches!(
        encode_scalar(&Value::string("x"), ValueType::Integer),
        Err(VcfError::ValueTypeMismatch { .. })
    ));
}

// ============================================================================
// Value trees
// ============================================================================

#[test]
fn test_decode_single_and_multi() {
    let depth = field("DP", Cardinality::Fixed(1), ValueType::Integer);
    assert_eq!(decode_value("14", &depth).unwrap(), Value::integer(14));

    let freqs = field("AF", Cardinality::PerAlt, ValueType::Float);
    assert_eq!(
        decode_value("0.5,.", &freqs).unwrap(),
        Value::Array(vec![Value::float(0.5), Value::Float(None)])
    );
    assert_eq!(decode_value("", &freqs).unwrap(), Value::Array(vec![]));

    let names = field("NAMES", Cardinality::Variable, ValueType::String);
    assert_eq!(
        decode_value("y%2Cy,z", &names).unwrap(),
        Value::Array(vec![Value::string("y,y"), Value::string("z")])
    );
}

#[test]
fn test_decode_character_array_without_separator() {
    let bases = field("BASES", Cardinality::Variable, ValueType::Character);
    assert_eq!(
        decode_value("ACG", &bases).unwrap(),
        Value::Array(vec![
            Value::Character(Some('A')),
            Value::Character(Some('C')),
            Value::Character(Some('G')),
        ])
    );
    assert_eq!(
        decode_value("A,C", &bases).unwrap(),
        Value::Array(vec![Value::Character(Some('A')), Value::Character(Some('C'))])
    );
}

#[test]
fn test_decode_format_collapses_missing_arrays() {
    let depths = field("AD", Cardinality::PerAltAndRef, ValueType::Integer);
    assert_eq!(decode_format_value(".,.", &depths).unwrap(), Value::Array(vec![]));
    assert_eq!(
        decode_format_value("3,.", &depths).unwrap(),
        Value::Array(vec![Value::integer(3), Value::Integer(None)])
    );
    assert_eq!(
        decode_value(".,.", &depths).unwrap(),
        Value::Array(vec![Value::Integer(None), Value::Integer(None)])
    );
}

#[test]
fn test_decode_nested_entries() {
    let parent = nested_field();
    assert_eq!(
        decode_value("xx|1&2,yy|3&4", &parent).unwrap(),
        Value::Array(vec![entry("xx", &[1, 2]), entry("yy", &[3, 4])])
    );
}

#[test]
fn test_decode_nested_arity_mismatch() {
    let parent = nested_field();
    let err = decode_value("xx|1|2", &parent).unwrap_err();
    assert!(matches!(
        err,
        VcfError::NestedArityMismatch {
            expected: 2,
            actual: 3,
            ..
        }
    ));
    assert!(matches!(
        decode_value("xx", &parent),
        Err(VcfError::NestedArityMismatch { actual: 1, .. })
    ));
}

#[test]
fn test_nested_missing_children() {
    let parent = nested_field();
    let decoded = decode_value("|", &parent).unwrap();
    let mut object = indexmap::IndexMap::new();
    object.insert("n".to_string(), Value::String(None));
    object.insert("c".to_string(), Value::Array(vec![]));
    assert_eq!(decoded, Value::Array(vec![Value::Object(Some(object))]));
    assert_eq!(encode_value(&decoded, &parent).unwrap(), "|");
}

#[test]
fn test_nested_list_child_with_missing_element() {
    let parent = nested_field();
    for token in ["G|.", "G|.&.", "G|1&."] {
        let decoded = decode_value(token, &parent).unwrap();
        let encoded = encode_value(&decoded, &parent).unwrap();
        assert_eq!(encoded, token);
        assert_eq!(decode_value(&encoded, &parent).unwrap(), decoded);
    }

    let decoded = decode_value("G|.", &parent).unwrap();
    let entry = decoded.as_array().unwrap()[0].as_object().unwrap();
    assert_eq!(entry["c"], Value::Array(vec![Value::Integer(None)]));
}

#[test]
fn test_encode_nested_entries() {
    let parent = nested_field();
    let value = Value::Array(vec![entry("x,y", &[1, 2]), entry("z", &[])]);
    assert_eq!(encode_value(&value, &parent).unwrap(), "x%2Cy|1&2,z|");
}

#[test]
fn test_encode_vep_block() {
    let parent = resolve_info_field(
        r#"##INFO=<ID=CSQ,Number=.,Type=String,Description="Consequence annotations from Ensembl VEP. Format: Allele|Consequence">"#,
        None,
    )
    .unwrap();
    let token = "A|missense_variant,G|";
    let decoded = decode_value(token, &parent).unwrap();
    assert_eq!(decoded.as_array().map(<[Value]>::len), Some(2));
    assert_eq!(encode_value(&decoded, &parent).unwrap(), token);
}

#[test]
fn test_encode_info_entries() {
    let flag = field("DB", Cardinality::Fixed(0), ValueType::Flag);
    assert_eq!(
        encode_info_entry(&Value::Flag(Some(true)), &flag).unwrap(),
        Some("DB".to_string())
    );
    assert_eq!(encode_info_entry(&Value::Flag(Some(false)), &flag).unwrap(), None);

    let depth = field("DP", Cardinality::Fixed(1), ValueType::Integer);
    assert_eq!(
        encode_info_entry(&Value::integer(7), &depth).unwrap(),
        Some("DP=7".to_string())
    );

    let counts = field("AC", Cardinality::PerAlt, ValueType::Integer);
    assert_eq!(
        encode_info_entry(
            &Value::Array(vec![Value::integer(1), Value::Integer(None)]),
            &counts
        )
        .unwrap(),
        Some("AC=1,.".to_string())
    );
}

#[test]
fn test_encode_shape_mismatch() {
    let counts = field("AC", Cardinality::PerAlt, ValueType::Integer);
    assert!(matches!(
        encode_value(&Value::integer(1), &counts),
        Err(VcfError::ValueTypeMismatch { field, .. }) if field == "AC"
    ));
}
