//! # Result Unmarshalling
//!
//! Converts the raw result of a call into normalized output values.
//!
//! Every declared output and table is cast to its element kind. String and
//! array results additionally get their fixed-width padding removed: trailing
//! spaces, newlines and NUL bytes are stripped from every string at any
//! depth, unless the string contains a control character. Such strings are
//! treated as binary payloads and returned verbatim.
//!
//! A scalar string that does not parse as its kind stays a string, so one odd
//! field never costs the caller the rest of the result. Only shape mismatches,
//! such as a list where a scalar belongs, fail with [`Error::Cast`].

use chrono::NaiveDate;
use chrono::NaiveTime;

use crate::api::ApiDescriptor;
use crate::api::ApiElement;
use crate::api::ElementKind;
use crate::error::Error;
use crate::error::Result;
use crate::value::Fields;
use crate::value::Value;

const PADDING: &[char] = &[' ', '\n', '\0'];

/// Casts every result element of `api` found in `raw`.
///
/// The returned mapping follows descriptor order. Keys in `raw` that the
/// descriptor does not declare are dropped.
pub fn cast_outputs(api: &ApiDescriptor, raw: &Fields) -> Result<Fields> {
    let mut output = Fields::new();
    for element in api.results() {
        let value = raw
            .get(&element.name)
            .ok_or_else(|| Error::MissingOutput(element.name.clone()))?;
        let mut value = cast(element, value)?;
        if element.kind.is_trimmed() {
            value = rtrim_strings(value);
        }
        output.insert(element.name.clone(), value);
    }
    Ok(output)
}

/// Casts a raw value to the kind declared by `element`.
pub fn cast(element: &ApiElement, value: &Value) -> Result<Value> {
    match element.kind {
        ElementKind::Integer => cast_integer(element, value),
        ElementKind::Float => cast_float(element, value),
        ElementKind::String => cast_string(element, value),
        ElementKind::HexBin => Ok(value.clone()),
        ElementKind::Date => cast_date(element, value),
        ElementKind::Time => cast_time(element, value),
        ElementKind::Array => cast_array(element, value),
    }
}

/// Strips trailing padding from every printable string inside `value`.
///
/// Applying this twice yields the same result as applying it once.
pub fn rtrim_strings(value: Value) -> Value {
    match value {
        Value::Str(s) => Value::Str(rtrim(s)),
        Value::List(items) => Value::List(items.into_iter().map(rtrim_strings).collect()),
        Value::Map(fields) => Value::Map(
            fields
                .into_iter()
                .map(|(k, v)| (k, rtrim_strings(v)))
                .collect(),
        ),
        other => other,
    }
}

fn rtrim(mut s: String) -> String {
    if !is_printable(&s) {
        return s;
    }
    let len = s.trim_end_matches(PADDING).len();
    s.truncate(len);
    s
}

fn is_printable(s: &str) -> bool {
    !s.chars().any(char::is_control)
}

fn cast_error(element: &ApiElement, value: &Value, reason: impl Into<String>) -> Error {
    Error::Cast {
        element: element.name.clone(),
        kind: element.kind,
        found: value.type_name(),
        reason: reason.into(),
    }
}

// NUMC fields longer than 19 digits, `240000` times and similar values the
// remote sends but the target type cannot hold are returned as trimmed text.
fn keep(s: &str) -> Value {
    Value::Str(s.to_string())
}

fn cast_integer(element: &ApiElement, value: &Value) -> Result<Value> {
    match value {
        Value::Int(_) | Value::Null => Ok(value.clone()),
        Value::Float(f) => Ok(Value::Int(*f as i64)),
        Value::Bool(b) => Ok(Value::Int(*b as i64)),
        Value::Str(s) => {
            let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\0');
            if s.is_empty() {
                return Ok(Value::Int(0));
            }
            Ok(s.parse::<i64>().map_or_else(|_| keep(s), Value::Int))
        }
        _ => Err(cast_error(element, value, "not a scalar")),
    }
}

fn cast_float(element: &ApiElement, value: &Value) -> Result<Value> {
    match value {
        Value::Float(_) | Value::Null => Ok(value.clone()),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Str(s) => {
            let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\0');
            if s.is_empty() {
                return Ok(Value::Float(0.0));
            }
            Ok(s.parse::<f64>().map_or_else(|_| keep(s), Value::Float))
        }
        _ => Err(cast_error(element, value, "not a number")),
    }
}

fn cast_string(element: &ApiElement, value: &Value) -> Result<Value> {
    match value {
        Value::Str(_) | Value::Bytes(_) | Value::Null => Ok(value.clone()),
        Value::Int(i) => Ok(Value::Str(i.to_string())),
        Value::Float(f) => Ok(Value::Str(f.to_string())),
        Value::Bool(b) => Ok(Value::Str(if *b { "X" } else { "" }.to_string())),
        Value::Date(d) => Ok(Value::Str(d.format("%Y%m%d").to_string())),
        Value::Time(t) => Ok(Value::Str(t.format("%H%M%S").to_string())),
        Value::List(_) | Value::Map(_) => Err(cast_error(element, value, "not a scalar")),
    }
}

fn cast_date(element: &ApiElement, value: &Value) -> Result<Value> {
    match value {
        Value::Date(_) | Value::Null => Ok(value.clone()),
        Value::Str(s) => {
            let s = s.trim();
            // the initial value of an ABAP date field means "no date"
            if s.is_empty() || s == "00000000" {
                return Ok(Value::Null);
            }
            Ok(NaiveDate::parse_from_str(s, "%Y%m%d").map_or_else(|_| keep(s), Value::Date))
        }
        _ => Err(cast_error(element, value, "expected YYYYMMDD")),
    }
}

fn cast_time(element: &ApiElement, value: &Value) -> Result<Value> {
    match value {
        Value::Time(_) | Value::Null => Ok(value.clone()),
        Value::Str(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(Value::Null);
            }
            Ok(NaiveTime::parse_from_str(s, "%H%M%S").map_or_else(|_| keep(s), Value::Time))
        }
        _ => Err(cast_error(element, value, "expected HHMMSS")),
    }
}

fn cast_array(element: &ApiElement, value: &Value) -> Result<Value> {
    match value {
        Value::Null if element.is_table() => Ok(Value::List(Vec::new())),
        Value::Null => Ok(Value::Map(Fields::new())),
        Value::Map(fields) => Ok(Value::Map(cast_members(&element.members, fields)?)),
        Value::List(rows) => rows
            .iter()
            .map(|row| match row {
                Value::Map(fields) => Ok(Value::Map(cast_members(&element.members, fields)?)),
                other => Ok(other.clone()),
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        _ => Err(cast_error(element, value, "expected a structure or table")),
    }
}

fn cast_members(members: &[ApiElement], fields: &Fields) -> Result<Fields> {
    let mut fields = fields.clone();
    for member in members {
        if let Some(raw) = fields.get_mut(&member.name) {
            *raw = cast(member, raw)?;
        }
    }
    Ok(fields)
}
