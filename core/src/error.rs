//! # Error Handling
//!
//! Error types for loading a design and translating it into a service schema.

use derive_more::{Display, From};

/// Errors raised while reading or traversing a design description.
#[derive(Debug, Display, From)]
pub enum DesignError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The design document is not valid YAML/JSON or does not match the model.
    #[display("Parse Error: {_0}")]
    Parse(serde_yaml::Error),

    /// A view lists an attribute the media type does not declare.
    #[from(ignore)]
    #[display("view `{view}` of media type `{media_type}` references unknown attribute `{attribute}`")]
    UnknownViewAttribute {
        /// Media type identifier.
        media_type: String,
        /// View name.
        view: String,
        /// The missing attribute name.
        attribute: String,
    },

    /// A payload references a user type that is not declared.
    #[from(ignore)]
    #[display("action `{action}` references unknown type `{name}`")]
    UnknownType {
        /// Qualified action name (`resource.action`).
        action: String,
        /// The missing type name.
        name: String,
    },
}

impl std::error::Error for DesignError {}

/// Result alias for design traversal.
pub type DesignResult<T> = Result<T, DesignError>;

/// Errors raised by the schema translation pass.
///
/// Any error is fatal to the whole pass; no partial schema is ever returned.
#[derive(Debug, Display, From)]
pub enum TranslateError {
    /// The design is missing a required element or is malformed.
    #[from(ignore)]
    #[display("Structural Error: {_0}")]
    Structural(String),

    /// An error surfaced unchanged from design traversal.
    #[display("{_0}")]
    Propagated(DesignError),
}

impl std::error::Error for TranslateError {}

/// Result alias for the translation pass.
pub type TranslateResult<T> = Result<T, TranslateError>;
