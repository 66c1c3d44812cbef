#![deny(missing_docs)]

//! # Proto Rendering
//!
//! Writes a resolved schema as proto3 text.
//!
//! Layout:
//! - a header declaring the syntax, the package and the shared `Empty` message;
//! - one `service` block per service, one `rpc` line per RPC;
//! - one `message` block per distinct non-empty request or response, fields
//!   numbered from 1 in list order.

use crate::schema::{message_shapes, Field, ServiceDefinition, EMPTY_MESSAGE};
use std::collections::BTreeSet;

const INDENT: &str = "  ";

/// Header settings of a rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Proto package name.
    pub package: String,
    /// API title written in the header comment.
    pub title: Option<String>,
    /// `scheme://host` the API is served at.
    pub endpoint: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            package: "proto".to_string(),
            title: None,
            endpoint: None,
        }
    }
}

/// Renders a complete proto file.
pub fn render_proto(services: &[ServiceDefinition], options: &RenderOptions) -> String {
    let mut code = render_header(options);
    for service in services {
        code.push_str(&render_service(service));
        code.push('\n');
    }
    code.push_str(&render_messages(services));
    code
}

/// Renders the file header.
pub fn render_header(options: &RenderOptions) -> String {
    let mut code = String::from("syntax = \"proto3\";\n\n");
    code.push_str(&format!("package {};\n\n", options.package));

    let comment = match (&options.title, &options.endpoint) {
        (Some(title), Some(endpoint)) => Some(format!("{} ({})", title, endpoint)),
        (Some(title), None) => Some(title.clone()),
        (None, Some(endpoint)) => Some(endpoint.clone()),
        (None, None) => None,
    };
    if let Some(comment) = comment {
        code.push_str(&format!("// {}\n\n", comment));
    }

    code.push_str(&format!("message {} {{\n}}\n\n", EMPTY_MESSAGE));
    code
}

/// Renders one service block.
pub fn render_service(service: &ServiceDefinition) -> String {
    let mut code = format!("service {} {{\n", service.service_name());
    for rpc in &service.rpcs {
        code.push_str(INDENT);
        code.push_str(&rpc.signature());
        code.push('\n');
    }
    code.push_str("}\n");
    code
}

/// Renders request and response messages, each name at most once.
pub fn render_messages(services: &[ServiceDefinition]) -> String {
    let mut code = String::new();
    let mut seen = BTreeSet::new();

    for (name, fields) in message_shapes(services) {
        if seen.insert(name.clone()) {
            code.push_str(&render_message(&name, fields));
            code.push('\n');
        }
    }

    code
}

/// Renders one message block.
pub fn render_message(name: &str, fields: &[Field]) -> String {
    let mut code = format!("message {} {{\n", name);
    for (i, field) in fields.iter().enumerate() {
        for line in message_field(field, i + 1) {
            code.push_str(INDENT);
            code.push_str(&line);
            code.push('\n');
        }
    }
    code.push_str("}\n");
    code
}

/// Lines of one numbered field, preceded by its enum block if any.
pub fn message_field(field: &Field, index: usize) -> Vec<String> {
    let mut lines = enum_block(field);

    let mut line = format!("{} {} = {};", field.kind, field.name, index);
    if !field.description.is_empty() {
        let description: Vec<_> = field.description.split_whitespace().collect();
        line.push_str(&format!(" // {}", description.join(" ")));
    }
    lines.push(line);
    lines
}

/// Enum block of a field, values numbered from 0. Empty when the field has no enum.
pub fn enum_block(field: &Field) -> Vec<String> {
    if field.enum_values.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![format!("enum {} {{", field.display_name)];
    for (i, value) in field.enum_values.iter().enumerate() {
        lines.push(format!("{}{} = {};", INDENT, value, i));
    }
    lines.push("}".to_string());
    lines
}

/// Serializes the schema as pretty JSON.
pub fn render_schema_json(services: &[ServiceDefinition]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ResponseShape, RpcDefinition};
    use crate::type_mapping::FieldKind;
    use pretty_assertions::assert_eq;

    fn field(name: &str, kind: FieldKind) -> Field {
        Field {
            name: name.to_string(),
            display_name: crate::naming::upper_identifier(name),
            kind,
            description: String::new(),
            enum_values: vec![],
            is_repeated: false,
        }
    }

    fn user_shape(is_stream: bool) -> ResponseShape {
        ResponseShape {
            identifier: "application/vnd.user+json".into(),
            name: "User".into(),
            view: "default".into(),
            is_stream,
            fields: vec![field("name", FieldKind::String)],
        }
    }

    #[test]
    fn test_fields_numbered_from_one() {
        let fields = vec![
            field("a", FieldKind::String),
            field("b", FieldKind::Int32),
            field("c", FieldKind::Bool),
        ];
        let expected = "message Abc {\n  string a = 1;\n  int32 b = 2;\n  bool c = 3;\n}\n";
        assert_eq!(render_message("Abc", &fields), expected);
    }

    #[test]
    fn test_enum_block_rendered_first() {
        let mut sex = field("sex", FieldKind::String);
        sex.enum_values = vec!["male".into(), "female".into(), "other".into()];
        sex.description = "sex of\nthe user".into();

        assert_eq!(
            message_field(&sex, 4),
            vec![
                "enum Sex {",
                "  male = 0;",
                "  female = 1;",
                "  other = 2;",
                "}",
                "string sex = 4; // sex of the user",
            ]
        );
    }

    #[test]
    fn test_header() {
        let options = RenderOptions {
            package: "api".into(),
            title: Some("Users".into()),
            endpoint: Some("http://localhost:8080".into()),
        };
        let expected = "syntax = \"proto3\";\n\npackage api;\n\n// Users (http://localhost:8080)\n\nmessage Empty {\n}\n\n";
        assert_eq!(render_header(&options), expected);
    }

    #[test]
    fn test_messages_emitted_once() {
        let service = ServiceDefinition {
            name: "user".into(),
            rpcs: vec![
                RpcDefinition {
                    name: "List".into(),
                    resource: "user".into(),
                    request: vec![],
                    response: Some(user_shape(true)),
                },
                RpcDefinition {
                    name: "Get".into(),
                    resource: "user".into(),
                    request: vec![field("user_id", FieldKind::Int32)],
                    response: Some(user_shape(false)),
                },
            ],
        };

        let expected = "message User {\n  string name = 1;\n}\n\nmessage UserGetType {\n  int32 user_id = 1;\n}\n\n";
        assert_eq!(render_messages(&[service]), expected);
    }

    #[test]
    fn test_fieldless_response_not_referenced() {
        let mut pong = user_shape(false);
        pong.name = "Pong".into();
        pong.fields.clear();
        let service = ServiceDefinition {
            name: "health".into(),
            rpcs: vec![RpcDefinition {
                name: "Check".into(),
                resource: "health".into(),
                request: vec![],
                response: Some(pong),
            }],
        };

        let out = render_proto(&[service], &RenderOptions::default());
        assert!(out.contains("rpc Check(Empty) returns (Empty);"));
        assert!(!out.contains("Pong"));
    }

    #[test]
    fn test_schema_json() {
        let service = ServiceDefinition {
            name: "user".into(),
            rpcs: vec![],
        };
        let json = render_schema_json(&[service]).unwrap();
        assert!(json.contains("\"name\": \"user\""));
    }
}
