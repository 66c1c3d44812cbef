//! # Service Resolution
//!
//! Resolves design resources into [`ServiceDefinition`]s.

use super::actions::resolve_action;
use super::media_types::ResponseShapes;
use super::ServiceDefinition;
use crate::design::ApiDescription;
use crate::error::TranslateResult;
use tracing::debug;

/// Resolves all resources, sorted by name, with actions in declaration order.
///
/// The first failing action aborts the whole pass.
pub fn resolve_services(
    api: &ApiDescription,
    responses: &ResponseShapes,
) -> TranslateResult<Vec<ServiceDefinition>> {
    let mut resources: Vec<_> = api.resources.values().collect();
    resources.sort_by(|a, b| a.name.cmp(&b.name));

    resources
        .into_iter()
        .map(|resource| -> TranslateResult<ServiceDefinition> {
            let rpcs = resource
                .actions
                .values()
                .map(|action| resolve_action(api, action, responses))
                .collect::<TranslateResult<Vec<_>>>()?;
            debug!(resource = %resource.name, rpcs = rpcs.len(), "resolved service");
            Ok(ServiceDefinition {
                name: resource.name.clone(),
                rpcs,
            })
        })
        .collect()
}
