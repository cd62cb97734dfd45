//! # Type Mapping
//!
//! Translates the transport's native type and direction tags into
//! [`ElementKind`] and [`Direction`]. Both tables are fixed; a tag missing
//! from them is a gap in this library and is reported, never defaulted.
//!
//! Tags are matched in full, with their `RFCTYPE_` / `RFC_` prefixes, exactly
//! as the vendor library reports them. A bare `INT` or `EXPORT` is rejected.

use crate::api::Direction;
use crate::api::ElementKind;
use crate::error::Error;
use crate::error::Result;

const TYPES: &[(&str, ElementKind)] = &[
    ("RFCTYPE_DATE", ElementKind::Date),
    ("RFCTYPE_TIME", ElementKind::Time),
    ("RFCTYPE_INT", ElementKind::Integer),
    ("RFCTYPE_NUM", ElementKind::Integer),
    ("RFCTYPE_INT1", ElementKind::Integer),
    ("RFCTYPE_INT2", ElementKind::Integer),
    ("RFCTYPE_BCD", ElementKind::Float),
    ("RFCTYPE_FLOAT", ElementKind::Float),
    ("RFCTYPE_CHAR", ElementKind::String),
    ("RFCTYPE_STRING", ElementKind::String),
    ("RFCTYPE_BYTE", ElementKind::HexBin),
    ("RFCTYPE_XSTRING", ElementKind::HexBin),
    ("RFCTYPE_STRUCTURE", ElementKind::Array),
    ("RFCTYPE_TABLE", ElementKind::Array),
];

const DIRECTIONS: &[(&str, Direction)] = &[
    ("RFC_EXPORT", Direction::Output),
    ("RFC_IMPORT", Direction::Input),
    ("RFC_TABLES", Direction::Table),
];

/// Maps a wire type tag such as `RFCTYPE_CHAR`.
pub fn map_type(wire: &str) -> Result<ElementKind> {
    TYPES
        .iter()
        .find(|(tag, _)| *tag == wire)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| Error::UnmappedType(wire.to_string()))
}

/// Maps a wire direction tag such as `RFC_IMPORT`.
pub fn map_direction(wire: &str) -> Result<Direction> {
    DIRECTIONS
        .iter()
        .find(|(tag, _)| *tag == wire)
        .map(|(_, dir)| *dir)
        .ok_or_else(|| Error::UnmappedDirection(wire.to_string()))
}
