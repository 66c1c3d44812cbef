//! # Parameter Normalization
//!
//! Turns one named design attribute into a schema [`Field`].

use super::Field;
use crate::design::AttributeDefinition;
use crate::naming::{lower_identifier, upper_identifier};
use crate::type_mapping::map_type;
use tracing::trace;

/// Normalizes one attribute.
///
/// `context` names where the attribute was found (e.g. `user.get` or a media
/// type view) and is only used for diagnostics.
pub fn normalize(context: &str, raw_name: &str, attribute: &AttributeDefinition) -> Field {
    let field = Field {
        name: lower_identifier(raw_name),
        display_name: upper_identifier(raw_name),
        kind: map_type(attribute),
        description: attribute.description.clone().unwrap_or_default(),
        enum_values: enum_values(attribute),
        is_repeated: attribute.kind.is_repeatable(),
    };
    trace!(context, raw_name, kind = %field.kind, "normalized attribute");
    field
}

/// Declared enum values when all of them are strings, empty otherwise.
fn enum_values(attribute: &AttributeDefinition) -> Vec<String> {
    let Some(values) = attribute
        .validation
        .as_ref()
        .and_then(|v| v.values.as_ref())
    else {
        return Vec::new();
    };

    values
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}
