#![deny(missing_docs)]

//! # Naming Utilities
//!
//! The single identifier-casing transform shared by every component that derives
//! a name, plus media-type identifier canonicalization.

use heck::{ToSnakeCase, ToUpperCamelCase};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Media type parameter marking the collection (stream) variant.
pub const COLLECTION_PARAM: &str = "type=collection";

/// Vendor prefix stripped from media type identifiers.
pub const VENDOR_PREFIX: &str = "application/vnd.";

/// Lower (snake_case) identifier form, e.g. `UserID` -> `user_id`.
pub fn lower_identifier(raw: &str) -> String {
    guard_leading_digit(raw.to_snake_case())
}

/// Capitalized (UpperCamelCase) identifier form, e.g. `user_id` -> `UserId`.
pub fn upper_identifier(raw: &str) -> String {
    guard_leading_digit(raw.to_upper_camel_case())
}

fn guard_leading_digit(ident: String) -> String {
    match ident.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{}", ident),
        _ => ident,
    }
}

/// Canonicalizes a media type identifier.
///
/// The base type is lower-cased and stripped of its structured syntax suffix
/// (`+json`), and parameters are re-emitted sorted by key. Malformed identifiers
/// are returned verbatim.
///
/// e.g. `application/vnd.User+json; type=collection` -> `application/vnd.user; type=collection`
pub fn canonical_identifier(identifier: &str) -> String {
    static MEDIA_TYPE_RE: OnceLock<Regex> = OnceLock::new();
    let media_type_re = MEDIA_TYPE_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9!#$&^_.+-]+/[a-z0-9!#$&^_.+-]+$").expect("Invalid regex")
    });

    let mut parts = identifier.split(';');
    let base = parts
        .next()
        .map(|b| b.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if !media_type_re.is_match(&base) {
        return identifier.to_string();
    }

    let base = match base.find('+') {
        Some(i) => base[..i].to_string(),
        None => base,
    };

    let mut params = BTreeMap::new();
    for param in parts {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }
        let Some((key, value)) = param.split_once('=') else {
            return identifier.to_string();
        };
        params.insert(
            key.trim().to_ascii_lowercase(),
            value.trim().trim_matches('"').to_string(),
        );
    }

    let mut canonical = base;
    for (key, value) in params {
        canonical.push_str(&format!("; {}={}", key, value));
    }
    canonical
}

/// Converts a media type identifier to a message name and stream flag.
///
/// e.g. `application/vnd.user+json` -> (`User`, false)
/// e.g. `application/vnd.user+json; type=collection` -> (`User`, true)
pub fn identifier_name(identifier: &str) -> (String, bool) {
    let canonical = canonical_identifier(identifier);
    let stream = canonical.contains(COLLECTION_PARAM);
    let stripped = canonical
        .replacen(&format!("; {}", COLLECTION_PARAM), "", 1)
        .replacen(VENDOR_PREFIX, "", 1);
    (upper_identifier(&stripped), stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_forms() {
        assert_eq!(lower_identifier("UserID"), "user_id");
        assert_eq!(lower_identifier("name"), "name");
        assert_eq!(lower_identifier("createdAt"), "created_at");
        assert_eq!(upper_identifier("user"), "User");
        assert_eq!(upper_identifier("user_id"), "UserId");
        assert_eq!(upper_identifier("list"), "List");
    }

    #[test]
    fn test_leading_digit_guard() {
        assert_eq!(lower_identifier("2fa"), "_2fa");
        assert_eq!(upper_identifier("3d_view"), "_3dView");
    }

    #[test]
    fn test_canonical_identifier() {
        assert_eq!(
            canonical_identifier("application/vnd.User+json; type=collection"),
            "application/vnd.user; type=collection"
        );
        assert_eq!(
            canonical_identifier("application/vnd.user+json;view=tiny; type=collection"),
            "application/vnd.user; type=collection; view=tiny"
        );
        assert_eq!(canonical_identifier("User"), "User");
        assert_eq!(
            canonical_identifier("application/vnd.user; broken"),
            "application/vnd.user; broken"
        );
    }

    #[test]
    fn test_identifier_name_stream_detection() {
        assert_eq!(
            identifier_name("application/vnd.user+json; type=collection"),
            ("User".to_string(), true)
        );
        assert_eq!(
            identifier_name("application/vnd.user+json"),
            ("User".to_string(), false)
        );
        assert_eq!(
            identifier_name("application/vnd.bottle-rack+json"),
            ("BottleRack".to_string(), false)
        );
    }

    #[test]
    fn test_identifier_name_without_affixes() {
        assert_eq!(identifier_name("User"), ("User".to_string(), false));
        assert_eq!(identifier_name("text/plain"), ("TextPlain".to_string(), false));
    }
}
