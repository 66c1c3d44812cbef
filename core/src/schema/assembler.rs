//! # Schema Assembler
//!
//! Entry point of the translation pass: media types first, then services.

use super::media_types::resolve_media_types;
use super::services::resolve_services;
use super::{check_message_names, ServiceDefinition};
use crate::design::ApiDescription;
use crate::error::{TranslateError, TranslateResult};
use tracing::info;

/// What to do when several views of a media type share its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPolicy {
    /// Keep the view whose name sorts last.
    #[default]
    LastWins,
    /// Fail with a structural error.
    Reject,
}

/// Options of the translation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblerOptions {
    /// View collision handling.
    pub view_policy: ViewPolicy,
}

/// Translates a design into an ordered list of services.
#[derive(Debug, Clone)]
pub struct SchemaAssembler<'a> {
    api: &'a ApiDescription,
    options: AssemblerOptions,
}

impl<'a> SchemaAssembler<'a> {
    /// Creates an assembler with default options.
    pub fn new(api: &'a ApiDescription) -> Self {
        Self {
            api,
            options: AssemblerOptions::default(),
        }
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: AssemblerOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the pass. Either the whole schema is returned or nothing.
    pub fn assemble(&self) -> TranslateResult<Vec<ServiceDefinition>> {
        if self.api.resources.is_empty() {
            return Err(TranslateError::Structural(format!(
                "design `{}` declares no resources",
                self.api.name
            )));
        }

        let responses = resolve_media_types(self.api, self.options.view_policy)?;
        let services = resolve_services(self.api, &responses)?;
        check_message_names(&services)?;
        info!(
            api = %self.api.name,
            services = services.len(),
            responses = responses.len(),
            "assembled schema"
        );
        Ok(services)
    }
}

/// Assembles a design with default options.
pub fn assemble(api: &ApiDescription) -> TranslateResult<Vec<ServiceDefinition>> {
    SchemaAssembler::new(api).assemble()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_resources_is_structural() {
        let api = ApiDescription::from_yaml_str("name: empty").unwrap();
        let err = assemble(&api).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Structural Error: design `empty` declares no resources"
        );
    }

    #[test]
    fn test_colliding_request_names_fail_the_pass() {
        let design = r#"
name: users
resources:
  user:
    actions:
      get_all:
        params:
          limit: { type: integer }
  user_get:
    actions:
      all:
        params:
          cursor: { type: string }
"#;
        let api = ApiDescription::from_yaml_str(design).unwrap();
        let err = assemble(&api).unwrap_err();
        assert!(matches!(err, TranslateError::Structural(_)));
        assert!(err.to_string().contains("`UserGetAllType`"));
    }

    #[test]
    fn test_colliding_response_names_fail_the_pass() {
        let design = r#"
name: users
resources:
  user:
    actions:
      show:
        responses: [{ name: OK, media_type: application/vnd.user+json }]
      export:
        responses: [{ name: OK, media_type: application/vnd.user+xml }]
media_types:
  application/vnd.user+json:
    attributes:
      name: { type: string }
  application/vnd.user+xml:
    attributes:
      name: { type: string }
      email: { type: string }
"#;
        let api = ApiDescription::from_yaml_str(design).unwrap();
        let err = assemble(&api).unwrap_err();
        assert!(err.to_string().contains("`User`"));
    }

    #[test]
    fn test_options_applied() {
        let design = r#"
name: racks
resources:
  rack:
    actions:
      show:
        responses: [{ name: OK, media_type: application/vnd.rack+json }]
media_types:
  application/vnd.rack+json:
    attributes:
      id: { type: integer }
    views:
      default: [id]
      link: [id]
"#;
        let api = ApiDescription::from_yaml_str(design).unwrap();
        assert!(assemble(&api).is_ok());

        let strict = SchemaAssembler::new(&api).with_options(AssemblerOptions {
            view_policy: ViewPolicy::Reject,
        });
        assert!(strict.assemble().is_err());
    }
}
