//! # API Description
//!
//! The normalized, transport-independent signature of one remote function.
//!
//! ## Invariants
//!
//! - Element names are uppercase and unique within a descriptor.
//! - Table elements are always of kind `Array` and direction `Table`.
//! - A descriptor never changes after it has been built.

use std::fmt;

use indexmap::IndexMap;

use crate::error::Error;
use crate::error::Result;

/// The normalized data type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Date,
    Time,
    Integer,
    Float,
    String,
    HexBin,
    /// A structure or a table.
    Array,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Date => "date",
            ElementKind::Time => "time",
            ElementKind::Integer => "int",
            ElementKind::Float => "float",
            ElementKind::String => "string",
            ElementKind::HexBin => "hexbin",
            ElementKind::Array => "array",
        }
    }

    /// Whether padding cleanup applies to values of this kind.
    pub fn is_trimmed(self) -> bool {
        matches!(self, ElementKind::String | ElementKind::Array)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The normalized call direction of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
    Table,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => f.write_str("input"),
            Direction::Output => f.write_str("output"),
            Direction::Table => f.write_str("table"),
        }
    }
}

/// One named parameter or result of a remote function.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiElement {
    pub name: String,
    pub kind: ElementKind,
    pub direction: Direction,
    pub optional: bool,
    /// Members of a structure, or the row layout of a table.
    ///
    /// Empty for scalars, and also empty when the transport does not expose
    /// nested member metadata.
    pub members: Vec<ApiElement>,
}

impl ApiElement {
    /// A scalar input or output value.
    pub fn value(name: &str, kind: ElementKind, direction: Direction, optional: bool) -> Self {
        Self {
            name: name.to_uppercase(),
            kind,
            direction,
            optional,
            members: Vec::new(),
        }
    }

    /// A single composite value passed in the direction of its container.
    pub fn structure(name: &str, direction: Direction, optional: bool, members: Vec<ApiElement>) -> Self {
        Self {
            name: name.to_uppercase(),
            kind: ElementKind::Array,
            direction,
            optional,
            members,
        }
    }

    /// A repeating list of rows.
    pub fn table(name: &str, optional: bool, members: Vec<ApiElement>) -> Self {
        Self {
            name: name.to_uppercase(),
            kind: ElementKind::Array,
            direction: Direction::Table,
            optional,
            members,
        }
    }

    pub fn is_table(&self) -> bool {
        self.direction == Direction::Table
    }

    pub fn is_structure(&self) -> bool {
        self.kind == ElementKind::Array && self.direction != Direction::Table
    }
}

/// An ordered, immutable set of API elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiDescriptor {
    elements: IndexMap<String, ApiElement>,
}

impl ApiDescriptor {
    /// Assembles a descriptor, rejecting duplicate element names.
    pub fn from_elements(elements: impl IntoIterator<Item = ApiElement>) -> Result<Self> {
        let mut map = IndexMap::new();
        for element in elements {
            if map.contains_key(&element.name) {
                return Err(Error::DuplicateElement(element.name));
            }
            map.insert(element.name.clone(), element);
        }
        Ok(Self { elements: map })
    }

    pub fn get(&self, name: &str) -> Option<&ApiElement> {
        self.elements.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApiElement> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Scalars and structures the caller sends.
    pub fn input_values(&self) -> impl Iterator<Item = &ApiElement> {
        self.iter().filter(|e| e.direction == Direction::Input)
    }

    /// Scalars and structures the remote function returns.
    pub fn output_values(&self) -> impl Iterator<Item = &ApiElement> {
        self.iter().filter(|e| e.direction == Direction::Output)
    }

    pub fn tables(&self) -> impl Iterator<Item = &ApiElement> {
        self.iter().filter(|e| e.is_table())
    }

    /// Output values and tables, in descriptor order.
    ///
    /// These are exactly the elements present in a call result.
    pub fn results(&self) -> impl Iterator<Item = &ApiElement> {
        self.iter().filter(|e| e.direction != Direction::Input)
    }
}

impl<'a> IntoIterator for &'a ApiDescriptor {
    type Item = &'a ApiElement;
    type IntoIter = indexmap::map::Values<'a, String, ApiElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.values()
    }
}
