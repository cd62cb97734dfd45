//! # Parameter Marshalling
//!
//! Turns a caller's [`ParameterBag`] into the wire input mapping for one call.
//!
//! ## Invariants
//!
//! - Only declared inputs and tables reach the wire; unknown keys are dropped.
//! - Scalars other than strings travel as strings.
//! - Empty or non-list tables are omitted, never sent.

use crate::api::ApiDescriptor;
use crate::api::ApiElement;
use crate::error::Error;
use crate::error::Result;
use crate::value::Fields;
use crate::value::Value;

/// Caller-supplied parameters for a single invocation.
///
/// Keys are stored uppercase to line up with descriptor names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    params: Fields,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any earlier value under the same name.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.params.insert(name.to_uppercase(), value.into());
        self
    }

    /// Builder-style variant of [`ParameterBag::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(&name.to_uppercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.params.shift_remove(&name.to_uppercase())
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl From<Fields> for ParameterBag {
    fn from(fields: Fields) -> Self {
        let mut bag = Self::new();
        for (name, value) in fields {
            bag.set(&name, value);
        }
        bag
    }
}

/// Collects the declared inputs the caller supplied.
///
/// Fails with [`Error::MissingParameter`] on the first mandatory input that
/// is absent.
pub fn build_inputs<'a>(
    function: &str,
    inputs: impl IntoIterator<Item = &'a ApiElement>,
    params: &ParameterBag,
) -> Result<Fields> {
    let mut wire = Fields::new();
    for input in inputs {
        match params.get(&input.name) {
            Some(value) => {
                wire.insert(input.name.clone(), coerce(value));
            }
            None if input.optional => {}
            None => {
                return Err(Error::MissingParameter {
                    parameter: input.name.clone(),
                    function: function.to_string(),
                });
            }
        }
    }
    Ok(wire)
}

/// Collects the supplied tables that actually contain rows.
pub fn build_tables<'a>(
    tables: impl IntoIterator<Item = &'a ApiElement>,
    params: &ParameterBag,
) -> Fields {
    let mut wire = Fields::new();
    for table in tables {
        if let Some(Value::List(rows)) = params.get(&table.name) {
            if !rows.is_empty() {
                wire.insert(table.name.clone(), Value::List(rows.clone()));
            }
        }
    }
    wire
}

/// The merged input and table mapping handed to the transport.
pub fn build_call(function: &str, api: &ApiDescriptor, params: &ParameterBag) -> Result<Fields> {
    let mut wire = build_inputs(function, api.input_values(), params)?;
    wire.extend(build_tables(api.tables(), params));
    Ok(wire)
}

// The transport rejects non-string scalars, so everything except strings,
// binary payloads, lists and maps is rendered as a string.
fn coerce(value: &Value) -> Value {
    match value {
        Value::Str(_) | Value::Bytes(_) | Value::List(_) | Value::Map(_) => value.clone(),
        Value::Null => Value::Str(String::new()),
        Value::Bool(true) => Value::Str("X".to_string()),
        Value::Bool(false) => Value::Str(String::new()),
        Value::Int(i) => Value::Str(i.to_string()),
        Value::Float(f) => Value::Str(f.to_string()),
        Value::Date(d) => Value::Str(d.format("%Y%m%d").to_string()),
        Value::Time(t) => Value::Str(t.format("%H%M%S").to_string()),
    }
}
