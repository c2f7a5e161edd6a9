use heck::ToPascalCase;

use crate::ir::NormalizedName;

/// Create a `NormalizedName` from an arbitrary string, computing its casings.
pub fn normalize_name(name: &str) -> NormalizedName {
    let pascal_case = format_name(name);
    NormalizedName {
        original: name.to_string(),
        camel_case: uncapitalize(&pascal_case),
        pascal_case,
    }
}

/// Turn an arbitrary string into a PascalCase identifier.
///
/// Words are split on any character that cannot appear in an identifier and
/// the first letter of each word is upper-cased; the rest of each word is kept
/// as written, so `HTTPError` stays `HTTPError`.
pub fn format_name(name: &str) -> String {
    let formatted: String = name
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();

    if formatted.is_empty() {
        return "Unnamed".to_string();
    }
    formatted
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn uncapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Suffix distinguishing content-type variants of one operation:
/// the PascalCase media subtype.
///
/// - `application/json` → `Json`
/// - `application/octet-stream` → `OctetStream`
/// - `application/vnd.api+json` → `VndApiJson`
pub fn media_type_suffix(content_type: &str) -> String {
    let essence = media_type_essence(content_type);
    let subtype = match essence.split_once('/') {
        Some((_, subtype)) if !subtype.is_empty() => subtype,
        _ => essence,
    };
    subtype.to_pascal_case()
}

/// Suffixes for the content types of one body or response, in order.
///
/// Content types whose subtypes clash (`text/xml`, `application/xml`) are
/// suffixed with the whole `type/subtype` instead (`TextXml`, `ApplicationXml`).
pub fn media_type_suffixes<'a>(content_types: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let content_types: Vec<&str> = content_types.into_iter().collect();
    let short: Vec<String> = content_types.iter().map(|ct| media_type_suffix(ct)).collect();
    content_types
        .iter()
        .zip(&short)
        .map(|(content_type, suffix)| {
            if short.iter().filter(|other| *other == suffix).count() > 1 {
                media_type_essence(content_type).to_pascal_case()
            } else {
                suffix.clone()
            }
        })
        .collect()
}

fn media_type_essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or(content_type).trim()
}

/// Split free text into its non-blank lines.
pub fn description_lines(text: Option<&str>) -> Vec<String> {
    text.map(|t| {
        t.lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Derive a camelCase operation name from HTTP method + path.
///
/// Examples:
/// - `GET /users` → `listUsers`
/// - `POST /users` → `createUsers`
/// - `GET /users/{userId}` → `getUser`
/// - `PUT /users/{userId}` → `updateUser`
/// - `DELETE /users/{userId}` → `deleteUser`
/// - `GET /users/{userId}/messages` → `listUsersMessages`
pub fn route_to_name(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut resource_parts: Vec<String> = Vec::new();
    let mut ends_with_param = false;

    for seg in &segments {
        if seg.starts_with('{') && seg.ends_with('}') {
            ends_with_param = true;
        } else {
            resource_parts.push(seg.to_string());
            ends_with_param = false;
        }
    }

    let method_upper = method.to_uppercase();
    let prefix = match method_upper.as_str() {
        "GET" if ends_with_param => "get",
        "GET" => "list",
        "POST" => "create",
        "PUT" => "update",
        "DELETE" => "delete",
        "PATCH" => "patch",
        "OPTIONS" => "options",
        "HEAD" => "head",
        "TRACE" => "trace",
        other => return format!("{}{}", other.to_lowercase(), resource_suffix(&resource_parts, ends_with_param)),
    };

    format!("{prefix}{}", resource_suffix(&resource_parts, ends_with_param))
}

fn resource_suffix(resource_parts: &[String], ends_with_param: bool) -> String {
    let mut pascal_parts = String::new();
    for (i, part) in resource_parts.iter().enumerate() {
        let is_last = i == resource_parts.len() - 1;
        let word = if is_last && ends_with_param {
            singularize(part)
        } else {
            part.to_string()
        };
        pascal_parts.push_str(&word.to_pascal_case());
    }
    pascal_parts
}

/// Naive singularization: strips trailing 's' if present.
fn singularize(word: &str) -> String {
    if word.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if word.ends_with("ses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        let n = normalize_name("listPets");
        assert_eq!(n.pascal_case, "ListPets");
        assert_eq!(n.camel_case, "listPets");
    }

    #[test]
    fn test_tag_with_spaces() {
        let n = normalize_name("pet store");
        assert_eq!(n.pascal_case, "PetStore");
        assert_eq!(n.camel_case, "petStore");
        assert_eq!(n.original, "pet store");
    }

    #[test]
    fn test_acronyms_preserved() {
        assert_eq!(format_name("HTTPError"), "HTTPError");
        assert_eq!(format_name("pet-status"), "PetStatus");
        assert_eq!(format_name("snake_case"), "Snake_case");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(format_name("--"), "Unnamed");
    }

    #[test]
    fn test_media_type_suffix() {
        assert_eq!(media_type_suffix("application/json"), "Json");
        assert_eq!(media_type_suffix("application/octet-stream"), "OctetStream");
        assert_eq!(media_type_suffix("text/plain; charset=utf-8"), "Plain");
        assert_eq!(media_type_suffix("application/vnd.api+json"), "VndApiJson");
        assert_eq!(media_type_suffix("octet-stream"), "OctetStream");
    }

    #[test]
    fn test_clashing_subtypes_use_full_media_type() {
        assert_eq!(
            media_type_suffixes(["application/json", "text/xml", "application/xml"]),
            vec!["Json", "TextXml", "ApplicationXml"]
        );
        assert_eq!(
            media_type_suffixes(["application/json", "application/octet-stream"]),
            vec!["Json", "OctetStream"]
        );
    }

    #[test]
    fn test_description_lines() {
        assert_eq!(
            description_lines(Some("First line\n\n  \nSecond line\n")),
            vec!["First line", "Second line"]
        );
        assert!(description_lines(None).is_empty());
    }

    #[test]
    fn test_route_to_name_list() {
        assert_eq!(route_to_name("GET", "/users"), "listUsers");
    }

    #[test]
    fn test_route_to_name_create() {
        assert_eq!(route_to_name("POST", "/users"), "createUsers");
    }

    #[test]
    fn test_route_to_name_get_single() {
        assert_eq!(route_to_name("GET", "/users/{userId}"), "getUser");
    }

    #[test]
    fn test_route_to_name_delete() {
        assert_eq!(route_to_name("DELETE", "/users/{userId}"), "deleteUser");
    }

    #[test]
    fn test_route_to_name_nested_single() {
        assert_eq!(
            route_to_name("GET", "/users/{userId}/messages/{messageId}"),
            "getUsersMessage"
        );
    }
}
