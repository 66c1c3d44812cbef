#![deny(missing_docs)]

//! # Service Schema
//!
//! The normalized, position-addressed schema derived from a design: services made
//! of RPCs whose requests and responses are ordered field lists.
//!
//! All records are value objects built once per translation pass.
//!
//! Ordering guarantees:
//! - services sorted by resource name;
//! - RPCs in action declaration order;
//! - request fields sorted by name (stable);
//! - response fields in view order.

use crate::error::{TranslateError, TranslateResult};
use crate::naming::upper_identifier;
use crate::type_mapping::FieldKind;
use serde::Serialize;
use std::collections::BTreeMap;

pub mod actions;
pub mod assembler;
pub mod media_types;
pub mod params;
pub mod services;

pub use actions::resolve_action;
pub use assembler::{assemble, AssemblerOptions, SchemaAssembler, ViewPolicy};
pub use media_types::{resolve_media_types, ResponseShapes};
pub use params::normalize;
pub use services::resolve_services;

/// Name of the shared message used for empty requests and responses.
pub const EMPTY_MESSAGE: &str = "Empty";

/// Canonical form of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Lower identifier form.
    pub name: String,
    /// Capitalized identifier form.
    pub display_name: String,
    /// Field kind label.
    pub kind: FieldKind,
    /// Description, empty when absent.
    pub description: String,
    /// Allowed string values in declaration order.
    pub enum_values: Vec<String>,
    /// Whether the value may repeat.
    pub is_repeated: bool,
}

/// A media type view resolved into a response message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseShape {
    /// Originating media type identifier.
    pub identifier: String,
    /// Message name derived from the identifier.
    pub name: String,
    /// View the fields were taken from.
    pub view: String,
    /// Whether the identifier denotes a collection.
    pub is_stream: bool,
    /// Fields in view order.
    pub fields: Vec<Field>,
}

/// One action resolved into an RPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcDefinition {
    /// RPC name.
    pub name: String,
    /// Name of the owning resource.
    pub resource: String,
    /// Request fields sorted by name.
    pub request: Vec<Field>,
    /// First declared response with a known media type.
    pub response: Option<ResponseShape>,
}

impl RpcDefinition {
    /// Request message name, `Empty` when there are no request fields.
    pub fn request_name(&self) -> String {
        if self.request.is_empty() {
            return EMPTY_MESSAGE.to_string();
        }
        format!("{}{}Type", upper_identifier(&self.resource), self.name)
    }

    /// Response message name, `None` when there is no response or it has no fields.
    pub fn response_message(&self) -> Option<&str> {
        self.response
            .as_ref()
            .filter(|shape| !shape.fields.is_empty())
            .map(|shape| shape.name.as_str())
    }

    /// Response type as written in the RPC signature.
    pub fn response_name(&self) -> String {
        let name = self.response_message().unwrap_or(EMPTY_MESSAGE);
        match &self.response {
            Some(shape) if shape.is_stream => format!("stream {}", name),
            _ => name.to_string(),
        }
    }

    /// The RPC line of the service block.
    pub fn signature(&self) -> String {
        format!(
            "rpc {}({}) returns ({});",
            self.name,
            self.request_name(),
            self.response_name()
        )
    }
}

/// One resource resolved into a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDefinition {
    /// Resource name.
    pub name: String,
    /// RPCs in action declaration order.
    pub rpcs: Vec<RpcDefinition>,
}

impl ServiceDefinition {
    /// Service name as written in the schema.
    pub fn service_name(&self) -> String {
        format!("{}Service", upper_identifier(&self.name))
    }
}

/// Every non-empty request and response message, in RPC order, repeats included.
pub fn message_shapes(
    services: &[ServiceDefinition],
) -> impl Iterator<Item = (String, &[Field])> {
    services.iter().flat_map(|s| &s.rpcs).flat_map(|rpc| {
        let request = (!rpc.request.is_empty())
            .then(|| (rpc.request_name(), rpc.request.as_slice()));
        let response = rpc
            .response_message()
            .zip(rpc.response.as_ref())
            .map(|(name, shape)| (name.to_string(), shape.fields.as_slice()));
        request.into_iter().chain(response)
    })
}

/// Fails when one message name stands for two different field lists.
pub fn check_message_names(services: &[ServiceDefinition]) -> TranslateResult<()> {
    let mut seen: BTreeMap<String, &[Field]> = BTreeMap::new();
    for (name, fields) in message_shapes(services) {
        match seen.get(&name) {
            Some(previous) if *previous != fields => {
                return Err(TranslateError::Structural(format!(
                    "message name `{}` is derived from two different field lists",
                    name
                )));
            }
            Some(_) => {}
            None => {
                seen.insert(name, fields);
            }
        }
    }
    Ok(())
}
