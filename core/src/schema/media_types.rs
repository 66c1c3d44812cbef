//! # Media Type Resolution
//!
//! Builds one [`ResponseShape`] per media type identifier from its views.
//! Error media types are skipped.

use super::assembler::ViewPolicy;
use super::params::normalize;
use super::ResponseShape;
use crate::design::ApiDescription;
use crate::error::{TranslateError, TranslateResult};
use crate::naming::identifier_name;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Response shapes keyed by media type identifier.
pub type ResponseShapes = BTreeMap<String, ResponseShape>;

/// Resolves every non-error media type of the design.
///
/// Media types are visited by identifier and views by name, so when several
/// views share an identifier the outcome of `policy` never depends on map order.
pub fn resolve_media_types(
    api: &ApiDescription,
    policy: ViewPolicy,
) -> TranslateResult<ResponseShapes> {
    let mut shapes = ResponseShapes::new();

    let mut media_types: Vec<_> = api.media_types.values().collect();
    media_types.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    for mt in media_types {
        if mt.is_error() {
            debug!(identifier = %mt.identifier, "skipping error media type");
            continue;
        }

        let (name, is_stream) = identifier_name(&mt.identifier);
        for (view_name, view) in mt.views_by_name() {
            let context = format!("{}#{}", mt.identifier, view_name);
            let fields = mt
                .project(view_name, view)?
                .into_iter()
                .map(|(attr_name, att)| normalize(&context, attr_name, att))
                .collect();

            let shape = ResponseShape {
                identifier: mt.identifier.clone(),
                name: name.clone(),
                view: view_name.clone(),
                is_stream,
                fields,
            };

            if let Some(previous) = shapes.insert(mt.identifier.clone(), shape) {
                match policy {
                    ViewPolicy::LastWins => {
                        debug!(
                            identifier = %mt.identifier,
                            replaced = %previous.view,
                            by = %view_name,
                            "view replaces earlier view"
                        );
                    }
                    ViewPolicy::Reject => {
                        warn!(identifier = %mt.identifier, "conflicting views");
                        return Err(TranslateError::Structural(format!(
                            "media type `{}` resolves views `{}` and `{}` to the same identifier",
                            mt.identifier, previous.view, view_name
                        )));
                    }
                }
            }
        }
        debug!(identifier = %mt.identifier, %name, is_stream, "resolved media type");
    }

    Ok(shapes)
}
