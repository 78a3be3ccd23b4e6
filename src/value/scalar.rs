//! Scalar token codec: missing values, percent escaping and numeric spellings.

use std::borrow::Cow;

use super::Value;
use crate::error::{Result, VcfError};
use crate::schema::ValueType;

/// Missing-value sentinel used at every structural level
pub const MISSING: &str = ".";

/// Reserved characters and their percent encodings. `%` comes first so
/// encoding never double-escapes.
const ESCAPES: [(char, &str); 8] = [
    ('%', "%25"),
    (':', "%3A"),
    (';', "%3B"),
    ('=', "%3D"),
    (',', "%2C"),
    ('\r', "%0D"),
    ('\n', "%0A"),
    ('\t', "%09"),
];

/// `.` and the empty token both mean "no value"
#[inline]
pub fn is_missing_token(token: &str) -> bool {
    token.is_empty() || token == MISSING
}

/// Decode `%XX` escapes of reserved characters in a single left-to-right pass.
///
/// A `%` that does not start a known escape is kept literally.
pub fn unescape(token: &str) -> Cow<'_, str> {
    if !token.contains('%') {
        return Cow::Borrowed(token);
    }

    let mut decoded = String::with_capacity(token.len());
    let mut rest = token;
    while let Some(pos) = rest.find('%') {
        decoded.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let escaped = candidate.get(..3).and_then(|code| {
            ESCAPES
                .iter()
                .find(|(_, encoding)| encoding.eq_ignore_ascii_case(code))
                .map(|(c, _)| *c)
        });
        match escaped {
            Some(c) => {
                decoded.push(c);
                rest = &candidate[3..];
            }
            None => {
                decoded.push('%');
                rest = &candidate[1..];
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

/// Percent-escape every reserved character
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(|c| ESCAPES.iter().any(|(reserved, _)| *reserved == c)) {
        return Cow::Borrowed(value);
    }

    let mut encoded = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match ESCAPES.iter().find(|(reserved, _)| *reserved == c) {
            Some((_, encoding)) => encoded.push_str(encoding),
            None => encoded.push(c),
        }
    }
    Cow::Owned(encoded)
}

/// Decode one token as a scalar of `value_type`, unescaping strings
pub fn decode_scalar(token: &str, value_type: ValueType) -> Result<Value> {
    decode_scalar_with(token, value_type, true)
}

/// Decode one token as a scalar; `unescape_strings = false` keeps `%XX` verbatim
pub fn decode_scalar_with(token: &str, value_type: ValueType, unescape_strings: bool) -> Result<Value> {
    match value_type {
        ValueType::Categorical | ValueType::String => {
            Ok(Value::String(decode_string(token, unescape_strings)))
        }
        ValueType::Character => decode_character(token, unescape_strings).map(Value::Character),
        ValueType::Integer => decode_integer(token).map(Value::Integer),
        ValueType::Float => decode_float(token).map(Value::Float),
        ValueType::Flag => decode_flag(token).map(Value::Flag),
    }
}

/// Optional string
pub fn decode_string(token: &str, unescape_strings: bool) -> Option<String> {
    if is_missing_token(token) {
        None
    } else if unescape_strings {
        Some(unescape(token).into_owned())
    } else {
        Some(token.to_string())
    }
}

/// Required string; missing or empty fails with `InvalidString`
pub fn decode_required_string(token: &str) -> Result<String> {
    decode_string(token, true).ok_or_else(|| VcfError::InvalidString(token.to_string()))
}

/// Optional single character
pub fn decode_character(token: &str, unescape_strings: bool) -> Result<Option<char>> {
    let Some(text) = decode_string(token, unescape_strings) else {
        return Ok(None);
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Some(c)),
        _ => Err(VcfError::InvalidCharacter(token.to_string())),
    }
}

/// Optional integer. Accepts `Inf`/`Infinity`/`NaN` spellings in any case.
pub fn decode_integer(token: &str) -> Result<Option<f64>> {
    if is_missing_token(token) {
        return Ok(None);
    }
    if let Ok(value) = token.parse::<i64>() {
        return Ok(Some(value as f64));
    }
    special_number(token)
        .map(Some)
        .ok_or_else(|| VcfError::InvalidNumber(token.to_string()))
}


/// Optional float. Accepts `Inf`/`Infinity`/`NaN` spellings in any case.
pub fn decode_float(token: &str) -> Result<Option<f64>> {
    if is_missing_token(token) {
        return Ok(None);
    }
    if let Some(value) = special_number(token) {
        return Ok(Some(value));
    }
    token
        .parse::<f64>()
        .map(Some)
        .map_err(|_| VcfError::InvalidNumber(token.to_string()))
}

/// Optional flag: literal `true` or `false`
pub fn decode_flag(token: &str) -> Result<Option<bool>> {
    match token {
        _ if is_missing_token(token) => Ok(None),
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(VcfError::InvalidFlag(token.to_string())),
    }
}

fn special_number(token: &str) -> Option<f64> {
    let (negative, body) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
        Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        })
    } else if body.eq_ignore_ascii_case("nan") {
        Some(f64::NAN)
    } else {
        None
    }
}

/// Render a number the way it is read back: `Infinity`, `-Infinity`, `NaN`
/// or the shortest decimal form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

/// Encode a scalar, rendering a missing value as `.`
pub fn encode_scalar(value: &Value, value_type: ValueType) -> Result<String> {
    encode_scalar_token(value, value_type, MISSING).ok_or_else(|| VcfError::ValueTypeMismatch {
        field: value_type.to_string(),
        expected: value_type.to_string(),
    })
}

/// Encode a scalar with a caller-chosen missing placeholder.
///
/// Returns `None` when the value's variant does not match `value_type`.
pub(crate) fn encode_scalar_token(value: &Value, value_type: ValueType, missing: &str) -> Option<String> {
    let token = match (value_type, value) {
        (ValueType::Categorical | ValueType::String, Value::String(text)) => text
            .as_deref()
            .map_or_else(|| missing.to_string(), |t| escape(t).into_owned()),
        (ValueType::Character, Value::Character(c)) => c.map_or_else(
            || missing.to_string(),
            |c| escape(c.encode_utf8(&mut [0; 4])).into_owned(),
        ),
        (ValueType::Integer, Value::Integer(number)) | (ValueType::Float, Value::Float(number)) => {
            number.map_or_else(|| missing.to_string(), format_number)
        }
        (ValueType::Flag, Value::Flag(flag)) => {
            flag.map_or_else(|| missing.to_string(), |f| f.to_string())
        }
        _ => return None,
    };
    Some(token)
}
