#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts a design attribute into the field kind label written to the schema.
//! An explicit override in the attribute metadata wins over the declared kind.

use crate::design::{AttributeDefinition, Kind};
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Metadata key holding an explicit wire type for an attribute.
pub const TYPE_OVERRIDE_KEY: &str = "struct:field:grpctype";

/// Canonical field kind labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `bool`
    Bool,
    /// `int32`
    Int32,
    /// `number`
    Number,
    /// `string`
    String,
    /// `datetime`
    DateTime,
    /// `any`
    Any,
    /// `array`
    Array,
    /// `object`
    Object,
    /// `hash`
    Hash,
    /// Label taken verbatim from a metadata override.
    Custom(String),
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Int32 => write!(f, "int32"),
            FieldKind::Number => write!(f, "number"),
            FieldKind::String => write!(f, "string"),
            FieldKind::DateTime => write!(f, "datetime"),
            FieldKind::Any => write!(f, "any"),
            FieldKind::Array => write!(f, "array"),
            FieldKind::Object => write!(f, "object"),
            FieldKind::Hash => write!(f, "hash"),
            FieldKind::Custom(label) => write!(f, "{}", label),
        }
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Maps an attribute to its field kind.
///
/// An override with an empty value list is ignored.
pub fn map_type(attribute: &AttributeDefinition) -> FieldKind {
    if let Some(label) = attribute
        .metadata
        .get(TYPE_OVERRIDE_KEY)
        .and_then(|values| values.first())
    {
        return FieldKind::Custom(label.clone());
    }
    map_kind(attribute.kind)
}

/// Maps a declared kind through the closed kind table.
pub fn map_kind(kind: Kind) -> FieldKind {
    match kind {
        Kind::Boolean => FieldKind::Bool,
        Kind::Integer => FieldKind::Int32,
        Kind::Number => FieldKind::Number,
        Kind::String | Kind::Uuid => FieldKind::String,
        Kind::DateTime => FieldKind::DateTime,
        Kind::Array => FieldKind::Array,
        Kind::Object => FieldKind::Object,
        Kind::Hash => FieldKind::Hash,
        Kind::Any | Kind::UserType | Kind::MediaType | Kind::Unknown => FieldKind::Any,
    }
}
