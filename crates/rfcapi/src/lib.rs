//! # rfcapi
//!
//! Signature introspection and value marshalling for remote function modules.
//!
//! ## Architecture
//!
//! The crate is pure: it never talks to a transport. It takes what a
//! transport reports and produces what a transport accepts.
//!
//! - **mapping**: wire type/direction tags to [`ElementKind`] / [`Direction`]
//! - **builder**: raw field metadata to an [`ApiDescriptor`]
//! - **params**: a [`ParameterBag`] to the wire input mapping
//! - **cast**: a raw result to normalized, padding-free output values
//!
//! ## Example
//!
//! ```rust
//! use indexmap::IndexMap;
//! use rfcapi::{extract_api, build_call, cast_outputs, fields, FieldSpec, ParameterBag, Value};
//!
//! let mut described = IndexMap::new();
//! described.insert("count".to_string(), FieldSpec::new("RFCTYPE_INT", "RFC_EXPORT", false));
//! let api = extract_api(&described).unwrap();
//!
//! let wire = build_call("Z_COUNT", &api, &ParameterBag::new()).unwrap();
//! assert!(wire.is_empty());
//!
//! let out = cast_outputs(&api, &fields! { "COUNT" => "42  " }).unwrap();
//! assert_eq!(out["COUNT"], Value::Int(42));
//! ```

pub mod api;
pub mod builder;
pub mod cast;
pub mod error;
pub mod mapping;
pub mod params;
pub mod value;

pub use api::ApiDescriptor;
pub use api::ApiElement;
pub use api::Direction;
pub use api::ElementKind;
pub use builder::FieldSpec;
pub use builder::extract_api;
pub use cast::cast_outputs;
pub use cast::rtrim_strings;
pub use error::Error;
pub use error::Result;
pub use mapping::map_direction;
pub use mapping::map_type;
pub use params::ParameterBag;
pub use params::build_call;
pub use params::build_inputs;
pub use params::build_tables;
pub use value::Fields;
pub use value::Value;
