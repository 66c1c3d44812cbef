#![deny(missing_docs)]

//! # Design Model
//!
//! In-memory representation of a declarative API design: resources with their
//! actions, media types with their views, and the attributes both are built from.
//!
//! A design is loaded once from YAML (or JSON), finalized, and only read afterwards.
//! It is passed explicitly to the schema assembler; there is no process-wide registry.

use crate::error::{DesignError, DesignResult};
use crate::naming::{canonical_identifier, COLLECTION_PARAM};
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

/// Identifier of the built-in error media type.
pub const ERROR_MEDIA_IDENTIFIER: &str = "application/vnd.goa.error";

/// Name of the view synthesized for media types declaring none.
pub const DEFAULT_VIEW: &str = "default";

/// Declared kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// `boolean`
    #[serde(alias = "bool")]
    Boolean,
    /// `integer`
    #[serde(alias = "int")]
    Integer,
    /// `number` (floating point)
    #[serde(alias = "float")]
    Number,
    /// `string`
    String,
    /// `date_time`
    #[serde(alias = "datetime")]
    DateTime,
    /// `uuid`
    Uuid,
    /// `any`
    #[default]
    Any,
    /// `array`
    Array,
    /// `object`
    Object,
    /// `hash` (map)
    #[serde(alias = "map")]
    Hash,
    /// `user_type`
    UserType,
    /// `media_type`
    MediaType,
    /// Any kind label this model does not know about.
    #[serde(other)]
    Unknown,
}

impl Kind {
    /// Whether values of this kind may repeat.
    ///
    /// Opaque values are included since the design does not tell them apart from scalars.
    pub fn is_repeatable(self) -> bool {
        matches!(self, Kind::Any | Kind::Array)
    }
}

/// Validation rules attached to an attribute.
///
/// Only enumerations shape the schema; other rules are ignored on load.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ValidationDefinition {
    /// Enumerated allowed values.
    #[serde(default, rename = "enum")]
    pub values: Option<Vec<serde_json::Value>>,
}

/// A node of the design: one typed attribute, possibly with children.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AttributeDefinition {
    /// Declared kind.
    #[serde(rename = "type", default)]
    pub kind: Kind,
    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Child attributes of object-like kinds, in declaration order.
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeDefinition>,
    /// Validation rules.
    #[serde(default)]
    pub validation: Option<ValidationDefinition>,
    /// Free-form metadata, used for explicit type overrides.
    #[serde(default)]
    pub metadata: IndexMap<String, Vec<String>>,
}

impl AttributeDefinition {
    /// Creates an attribute of the given kind with no children.
    pub fn of(kind: Kind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Child attributes when the kind is object-like, `None` otherwise.
    pub fn to_object(&self) -> Option<&IndexMap<String, AttributeDefinition>> {
        match self.kind {
            Kind::Object | Kind::UserType | Kind::MediaType => Some(&self.attributes),
            _ => None,
        }
    }
}

/// An HTTP route of an action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteDefinition {
    /// Path relative to the resource base path, may contain `:name` wildcards.
    #[serde(default)]
    pub path: String,
}

/// A response an action may return.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseDefinition {
    /// Response name (e.g. `OK`).
    pub name: String,
    /// Identifier of the media type describing the body.
    #[serde(default)]
    pub media_type: Option<String>,
}

/// The request body of an action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PayloadDefinition {
    /// Reference to a user type declared under `types`.
    Named(String),
    /// Inline attribute.
    Inline(AttributeDefinition),
}

/// One operation of a resource.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ActionDefinition {
    /// Action name, filled from the map key.
    #[serde(skip)]
    pub name: String,
    /// Name of the parent resource, filled on finalization.
    #[serde(skip)]
    pub resource: String,
    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// HTTP routes.
    #[serde(default)]
    pub routing: Vec<RouteDefinition>,
    /// Path and query parameters, in declaration order.
    #[serde(default)]
    pub params: IndexMap<String, AttributeDefinition>,
    /// Request body.
    #[serde(default)]
    pub payload: Option<PayloadDefinition>,
    /// Declared responses, in declaration order.
    #[serde(default)]
    pub responses: Vec<ResponseDefinition>,
    #[serde(skip)]
    path_param_names: Vec<String>,
}

impl ActionDefinition {
    /// Qualified name used in diagnostics (`resource.action`).
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.resource, self.name)
    }

    /// Parameters appearing as wildcards in the action routes, in declaration order.
    pub fn path_params(&self) -> impl Iterator<Item = (&String, &AttributeDefinition)> {
        self.params
            .iter()
            .filter(move |(name, _)| self.path_param_names.contains(name))
    }

    /// Parameters that are not path parameters, in declaration order.
    pub fn query_params(&self) -> impl Iterator<Item = (&String, &AttributeDefinition)> {
        self.params
            .iter()
            .filter(move |(name, _)| !self.path_param_names.contains(name))
    }
}

/// A named grouping of actions.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResourceDefinition {
    /// Resource name, filled from the map key.
    #[serde(skip)]
    pub name: String,
    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Path prefix shared by all actions.
    #[serde(default)]
    pub base_path: Option<String>,
    /// Actions, in declaration order.
    #[serde(default)]
    pub actions: IndexMap<String, ActionDefinition>,
    /// Responses shared by all actions.
    #[serde(default)]
    pub responses: Vec<ResponseDefinition>,
}

/// A named projection of media type attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct ViewDefinition {
    /// Attribute names, in rendering order.
    pub attributes: Vec<String>,
}

/// A typed, versioned representation with one or more views.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaTypeDefinition {
    /// Identifier, filled from the map key.
    #[serde(skip)]
    pub identifier: String,
    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Marks error-shaped media types.
    #[serde(default)]
    pub error: bool,
    /// Attributes, in declaration order.
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeDefinition>,
    /// Views, in declaration order.
    #[serde(default)]
    pub views: IndexMap<String, ViewDefinition>,
}

impl MediaTypeDefinition {
    /// Whether this media type describes errors.
    pub fn is_error(&self) -> bool {
        self.error || canonical_identifier(&self.identifier) == ERROR_MEDIA_IDENTIFIER
    }

    /// Views sorted by name.
    pub fn views_by_name(&self) -> Vec<(&String, &ViewDefinition)> {
        let mut views: Vec<_> = self.views.iter().collect();
        views.sort_by(|a, b| a.0.cmp(b.0));
        views
    }

    /// Projects a view onto the media type attributes, in view order.
    pub fn project(
        &self,
        view_name: &str,
        view: &ViewDefinition,
    ) -> DesignResult<Vec<(&String, &AttributeDefinition)>> {
        view.attributes
            .iter()
            .map(|name| {
                self.attributes.get_key_value(name).ok_or_else(|| {
                    DesignError::UnknownViewAttribute {
                        media_type: self.identifier.clone(),
                        view: view_name.to_string(),
                        attribute: name.clone(),
                    }
                })
            })
            .collect()
    }

    fn collection_of(&self, identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            description: self.description.clone(),
            error: self.error,
            attributes: self.attributes.clone(),
            views: self.views.clone(),
        }
    }
}

/// The root of a design.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ApiDescription {
    /// API name.
    pub name: String,
    /// API title.
    #[serde(default)]
    pub title: Option<String>,
    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// API version.
    #[serde(default)]
    pub version: Option<String>,
    /// Default host.
    #[serde(default)]
    pub host: Option<String>,
    /// Supported schemes, preferred first.
    #[serde(default)]
    pub schemes: Vec<String>,
    /// Resources, in declaration order.
    #[serde(default)]
    pub resources: IndexMap<String, ResourceDefinition>,
    /// Media types keyed by identifier.
    #[serde(default)]
    pub media_types: IndexMap<String, MediaTypeDefinition>,
    /// User types keyed by name.
    #[serde(default)]
    pub types: IndexMap<String, AttributeDefinition>,
}

impl ApiDescription {
    /// Parses and finalizes a design from YAML (or JSON) text.
    pub fn from_yaml_str(content: &str) -> DesignResult<Self> {
        let mut api: ApiDescription = serde_yaml::from_str(content)?;
        api.finalize();
        Ok(api)
    }

    /// Reads, parses and finalizes a design file.
    pub fn load(path: impl AsRef<Path>) -> DesignResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Child attributes of an action payload, if the payload is object-like.
    pub fn payload_object<'a>(
        &'a self,
        action: &'a ActionDefinition,
    ) -> DesignResult<Option<&'a IndexMap<String, AttributeDefinition>>> {
        match &action.payload {
            None => Ok(None),
            Some(PayloadDefinition::Inline(att)) => Ok(att.to_object()),
            Some(PayloadDefinition::Named(name)) => self
                .types
                .get(name)
                .map(|att| Some(&att.attributes))
                .ok_or_else(|| DesignError::UnknownType {
                    action: action.qualified_name(),
                    name: name.clone(),
                }),
        }
    }

    /// Fills derived fields once parsing is done. Idempotent.
    pub fn finalize(&mut self) {
        for (identifier, mt) in self.media_types.iter_mut() {
            mt.identifier = identifier.clone();
            if mt.views.is_empty() {
                mt.views.insert(
                    DEFAULT_VIEW.to_string(),
                    ViewDefinition {
                        attributes: mt.attributes.keys().cloned().collect(),
                    },
                );
            }
        }

        let mut referenced = Vec::new();
        for (resource_name, resource) in self.resources.iter_mut() {
            resource.name = resource_name.clone();
            let base_wildcards = wildcards(resource.base_path.as_deref().unwrap_or_default());
            for (action_name, action) in resource.actions.iter_mut() {
                action.name = action_name.clone();
                action.resource = resource_name.clone();

                let mut names = base_wildcards.clone();
                for route in &action.routing {
                    for name in wildcards(&route.path) {
                        if !names.contains(&name) {
                            names.push(name);
                        }
                    }
                }
                for name in &names {
                    if !action.params.contains_key(name) {
                        action
                            .params
                            .insert(name.clone(), AttributeDefinition::of(Kind::String));
                    }
                }
                action.path_param_names = names;

                for shared in &resource.responses {
                    if !action.responses.iter().any(|r| r.name == shared.name) {
                        action.responses.push(shared.clone());
                    }
                }
                referenced.extend(action.responses.iter().filter_map(|r| r.media_type.clone()));
            }
        }

        for identifier in referenced {
            if self.media_types.contains_key(&identifier) {
                continue;
            }
            if let Some(element) = self.collection_element(&identifier) {
                let collection = element.collection_of(&identifier);
                self.media_types.insert(identifier, collection);
            }
        }
    }

    fn collection_element(&self, identifier: &str) -> Option<&MediaTypeDefinition> {
        let canonical = canonical_identifier(identifier);
        if !canonical.contains(COLLECTION_PARAM) {
            return None;
        }
        let element = canonical.replacen(&format!("; {}", COLLECTION_PARAM), "", 1);
        self.media_types
            .values()
            .find(|mt| canonical_identifier(&mt.identifier) == element)
    }
}

/// Extracts `:name` and `*name` wildcards from a route path.
fn wildcards(path: &str) -> Vec<String> {
    static WILDCARD_RE: OnceLock<Regex> = OnceLock::new();
    let wildcard_re =
        WILDCARD_RE.get_or_init(|| Regex::new(r"/(?::|\*)([a-zA-Z0-9_]+)").expect("Invalid regex"));

    // Leading slash lets a relative path like `:id` match.
    let path = format!("/{}", path.trim_start_matches('/'));
    wildcard_re
        .captures_iter(&path)
        .map(|c| c[1].to_string())
        .collect()
}
