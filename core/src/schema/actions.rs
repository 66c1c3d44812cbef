//! # Action Resolution
//!
//! Resolves one design action into an [`RpcDefinition`].

use super::media_types::ResponseShapes;
use super::params::normalize;
use super::{Field, ResponseShape, RpcDefinition};
use crate::design::{ActionDefinition, ApiDescription};
use crate::error::{TranslateError, TranslateResult};
use crate::naming::upper_identifier;

/// Resolves an action.
///
/// Request fields are path params, then query params, then payload attributes,
/// stably sorted by name afterwards. Names present in several sources yield
/// several fields.
pub fn resolve_action(
    api: &ApiDescription,
    action: &ActionDefinition,
    responses: &ResponseShapes,
) -> TranslateResult<RpcDefinition> {
    let name = upper_identifier(&action.name);
    if name.is_empty() {
        return Err(TranslateError::Structural(format!(
            "action `{}` has no usable name",
            action.qualified_name()
        )));
    }

    let context = action.qualified_name();
    let mut request: Vec<Field> = action
        .path_params()
        .chain(action.query_params())
        .map(|(raw, att)| normalize(&context, raw, att))
        .collect();

    if let Some(payload) = api.payload_object(action)? {
        request.extend(
            payload
                .iter()
                .map(|(raw, att)| normalize(&context, raw, att)),
        );
    }

    request.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(RpcDefinition {
        name,
        resource: action.resource.clone(),
        request,
        response: first_response(action, responses),
    })
}

/// First declared response whose media type was resolved.
fn first_response(action: &ActionDefinition, responses: &ResponseShapes) -> Option<ResponseShape> {
    action
        .responses
        .iter()
        .filter_map(|r| r.media_type.as_deref())
        .find_map(|identifier| responses.get(identifier))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::assembler::ViewPolicy;
    use crate::schema::media_types::resolve_media_types;

    const DESIGN: &str = r#"
name: users
resources:
  user:
    actions:
      list:
        routing: [{ verb: GET, path: "" }]
        responses:
          - { name: Unauthorized, status: 401 }
          - { name: OK, status: 200, media_type: "application/vnd.user+json; type=collection" }
      get:
        routing: [{ verb: GET, path: ":UserID" }]
        params:
          UserID: { type: integer, description: ID of user }
        responses:
          - { name: NotFound, status: 404, media_type: application/vnd.unknown+json }
          - { name: OK, status: 200, media_type: application/vnd.user+json }
      update:
        routing: [{ verb: PUT, path: ":name" }]
        params:
          zone: { type: string }
          name: { type: string }
        payload:
          type: object
          attributes:
            name: { type: string, description: new name }
            age: { type: integer }
media_types:
  application/vnd.user+json:
    attributes:
      name: { type: string }
"#;

    fn setup() -> (ApiDescription, ResponseShapes) {
        let api = ApiDescription::from_yaml_str(DESIGN).unwrap();
        let shapes = resolve_media_types(&api, ViewPolicy::LastWins).unwrap();
        (api, shapes)
    }

    fn action<'a>(api: &'a ApiDescription, name: &str) -> &'a ActionDefinition {
        &api.resources["user"].actions[name]
    }

    #[test]
    fn test_no_params_yields_empty_request() {
        let (api, shapes) = setup();
        let rpc = resolve_action(&api, action(&api, "list"), &shapes).unwrap();
        assert_eq!(rpc.name, "List");
        assert!(rpc.request.is_empty());
        assert_eq!(rpc.signature(), "rpc List(Empty) returns (stream User);");
    }

    #[test]
    fn test_unknown_media_type_skipped() {
        let (api, shapes) = setup();
        let rpc = resolve_action(&api, action(&api, "get"), &shapes).unwrap();
        assert_eq!(rpc.signature(), "rpc Get(UserGetType) returns (User);");
        assert_eq!(rpc.request[0].name, "user_id");
        assert_eq!(rpc.request[0].description, "ID of user");
    }

    #[test]
    fn test_sources_merged_sorted_and_not_deduplicated() {
        let (api, shapes) = setup();
        let rpc = resolve_action(&api, action(&api, "update"), &shapes).unwrap();
        let names: Vec<_> = rpc.request.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["age", "name", "name", "zone"]);
        // Stable sort keeps the path param ahead of the payload attribute.
        assert_eq!(rpc.request[1].description, "");
        assert_eq!(rpc.request[2].description, "new name");
        assert!(rpc.response.is_none());
    }

    #[test]
    fn test_unknown_payload_type_propagates() {
        let (api, shapes) = setup();
        let mut broken = action(&api, "list").clone();
        broken.payload = Some(crate::design::PayloadDefinition::Named("Nope".into()));
        let err = resolve_action(&api, &broken, &shapes).unwrap_err();
        assert!(matches!(err, TranslateError::Propagated(_)));
    }

    #[test]
    fn test_unusable_name_is_structural() {
        let (api, shapes) = setup();
        let mut broken = action(&api, "list").clone();
        broken.name = "--".into();
        let err = resolve_action(&api, &broken, &shapes).unwrap_err();
        assert!(matches!(err, TranslateError::Structural(_)));
    }
}
