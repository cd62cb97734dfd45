//! # Error Definitions
//!
//! Failures raised while describing, marshalling or unmarshalling a call.
//! None of these involve I/O; they are either contract violations by the
//! remote signature or mistakes in the caller's parameters.

use crate::api::ElementKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The remote signature uses a wire type missing from the lookup table.
    #[error("unknown RFC type '{0}'")]
    UnmappedType(String),

    /// The remote signature uses a wire direction missing from the lookup table.
    #[error("unknown RFC direction '{0}'")]
    UnmappedDirection(String),

    /// Two fields collapse onto the same uppercase element name.
    #[error("duplicate API element '{0}'")]
    DuplicateElement(String),

    /// A mandatory input was not supplied by the caller.
    #[error("missing parameter '{parameter}' for function call '{function}'")]
    MissingParameter { parameter: String, function: String },

    /// The raw result lacks a declared output or table.
    #[error("result is missing declared element '{0}'")]
    MissingOutput(String),

    /// A raw value could not be converted to the declared element kind.
    #[error("cannot cast {found} value of '{element}' to {kind}: {reason}")]
    Cast {
        element: String,
        kind: ElementKind,
        found: &'static str,
        reason: String,
    },
}

impl Error {
    /// True for failures caused by an unrecognized wire vocabulary.
    pub fn is_unmapped(&self) -> bool {
        matches!(self, Error::UnmappedType(_) | Error::UnmappedDirection(_))
    }
}

/// A specialized Result type for marshalling operations.
pub type Result<T> = std::result::Result<T, Error>;
