//! # API Extraction
//!
//! Walks the raw field metadata a callable handle exposes and assembles an
//! [`ApiDescriptor`]. Either every field maps or the whole extraction fails;
//! partial descriptors are never returned.

use indexmap::IndexMap;

use crate::api::ApiDescriptor;
use crate::api::ApiElement;
use crate::api::Direction;
use crate::api::ElementKind;
use crate::error::Result;
use crate::mapping::map_direction;
use crate::mapping::map_type;

/// The field holding the function's own name; it is not a parameter.
const NAME_FIELD: &str = "name";

/// Raw metadata of one parameter, as described by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire type tag, e.g. `RFCTYPE_CHAR`.
    pub ty: String,
    /// Wire direction tag, e.g. `RFC_IMPORT`.
    pub direction: String,
    pub optional: bool,
    pub description: String,
    pub default_value: String,
}

impl FieldSpec {
    pub fn new(ty: &str, direction: &str, optional: bool) -> Self {
        Self {
            ty: ty.to_string(),
            direction: direction.to_string(),
            optional,
            ..Self::default()
        }
    }
}

/// Builds the descriptor for a callable from its described fields.
pub fn extract_api(fields: &IndexMap<String, FieldSpec>) -> Result<ApiDescriptor> {
    let mut elements = Vec::with_capacity(fields.len());
    for (name, spec) in fields {
        if name == NAME_FIELD {
            continue;
        }
        let kind = map_type(&spec.ty)?;
        let direction = map_direction(&spec.direction)?;
        elements.push(create_element(name, kind, direction, spec.optional));
    }
    ApiDescriptor::from_elements(elements)
}

// The transport exposes no member metadata, so structures and tables start
// out with empty member lists.
fn create_element(name: &str, kind: ElementKind, direction: Direction, optional: bool) -> ApiElement {
    if direction == Direction::Table {
        return ApiElement::table(name, optional, Vec::new());
    }
    if kind == ElementKind::Array {
        return ApiElement::structure(name, direction, optional, Vec::new());
    }
    ApiElement::value(name, kind, direction, optional)
}
