//! # Values
//!
//! The tagged value that flows through every stage of a remote call: caller
//! parameters, the wire input mapping, the raw result and the normalized
//! output all share this one recursive shape.

use chrono::NaiveDate;
use chrono::NaiveTime;
use indexmap::IndexMap;

/// An insertion-ordered mapping of names to values.
///
/// Used for structures, table rows, wire inputs and call results alike.
pub type Fields = IndexMap<String, Value>;

/// A scalar, list or mapping exchanged with the remote system.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Raw binary payload (HEXBIN fields).
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Table rows, or any other repeating value.
    List(Vec<Value>),
    /// Structure members, or a single table row.
    Map(Fields),
}

impl Value {
    /// A short name for the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            Value::Map(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Str(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Str(s) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self { Value::Int(i as i64) }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Int(i) }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self { Value::Int(i as i64) }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self { Value::Float(f) }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self { Value::Bytes(b) }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self { Value::Date(d) }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self { Value::Time(t) }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self { Value::List(items) }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self { Value::Map(fields) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Builds a [`Fields`] mapping from `name => value` pairs.
///
/// ```
/// use rfcapi::fields;
/// let row = fields! { "RFCDEST" => "AOP3", "COUNT" => 3 };
/// assert_eq!(row.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::Fields::new() };
    ($($key:expr => $val:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $( fields.insert(::std::string::String::from($key), $crate::Value::from($val)); )+
        fields
    }};
}
