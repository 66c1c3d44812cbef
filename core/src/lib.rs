#![deny(missing_docs)]

//! # Protodef Core
//!
//! Translates a declarative API design (resources, actions, media types) into a
//! deterministic proto3 service schema.
//!
//! ```text
//! ApiDescription --assemble--> Vec<ServiceDefinition> --render_proto--> String
//! ```

/// Shared error types.
pub mod error;

/// Design input model.
pub mod design;

/// Identifier casing and media type identifiers.
pub mod naming;

/// Type mapping logic (design kind -> field kind).
pub mod type_mapping;

/// Schema records and the translation pass.
pub mod schema;

/// Proto text emission.
pub mod render;

pub use design::{ApiDescription, AttributeDefinition, Kind};
pub use error::{DesignError, DesignResult, TranslateError, TranslateResult};
pub use render::{render_proto, render_schema_json, RenderOptions};
pub use schema::{
    assemble, AssemblerOptions, Field, ResponseShape, RpcDefinition, SchemaAssembler,
    ServiceDefinition, ViewPolicy,
};
pub use type_mapping::{map_type, FieldKind};

/// Version of the design format this crate reads.
pub const DESIGN_FORMAT_VERSION: &str = "1.0.0";
