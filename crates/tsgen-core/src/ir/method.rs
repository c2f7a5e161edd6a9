use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::model::Model;
use super::types::NormalizedName;
use crate::error::TransformError;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    /// Every method an OpenAPI path item can declare.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// How a payload is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// JSON text encoding and decoding.
    Json,
    /// Payload passed through unchanged.
    Raw,
}

/// How a response payload is read from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyReader {
    Text,
    Blob,
}

/// One content-type variant of a request body or response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaTypeModel {
    pub content_type: String,
    /// Content-type suffix (`Json`, `OctetStream`), used to tell variants apart.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,
}

impl MediaTypeModel {
    pub fn type_name(&self) -> String {
        self.model
            .as_ref()
            .map(Model::type_name)
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn codec(&self) -> Codec {
        let essence = media_type_essence(&self.content_type);
        if essence == "application/json" || essence.ends_with("+json") {
            Codec::Json
        } else {
            Codec::Raw
        }
    }

    pub fn reader(&self) -> BodyReader {
        let essence = media_type_essence(&self.content_type);
        let binary_model = self.model.as_ref().is_some_and(Model::is_binary);
        if matches!(essence, "application/octet-stream" | "octet-stream") || binary_model {
            BodyReader::Blob
        } else {
            BodyReader::Text
        }
    }

    pub fn is_binary(&self) -> bool {
        self.reader() == BodyReader::Blob
    }
}

/// Content type without parameters (`application/json; charset=utf-8` →
/// `application/json`).
fn media_type_essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or(content_type).trim()
}

/// A path or query parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,
}

impl Param {
    pub fn type_name(&self) -> String {
        self.model
            .as_ref()
            .map(Model::type_name)
            .unwrap_or_else(|| "string".to_string())
    }
}

/// One piece of a templated path: literal text or a `{variable}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub is_variable: bool,
    pub value: String,
}

impl PathSegment {
    pub fn literal(value: &str) -> Self {
        Self {
            is_variable: false,
            value: value.to_string(),
        }
    }

    pub fn variable(value: &str) -> Self {
        Self {
            is_variable: true,
            value: value.to_string(),
        }
    }
}

/// Split a path template into interleaved literal and variable segments.
/// The leading `/` is dropped.
///
/// `/users/{id}/posts/{postId}` → `users/`, `{id}`, `/posts/`, `{postId}`
pub fn split_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut rest = path.strip_prefix('/').unwrap_or(path);

    while !rest.is_empty() {
        let Some(open) = rest.find('{') else {
            segments.push(PathSegment::literal(rest));
            break;
        };
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            // Unterminated placeholder: keep the remainder as text.
            segments.push(PathSegment::literal(rest));
            break;
        };
        if open > 0 {
            segments.push(PathSegment::literal(&rest[..open]));
        }
        segments.push(PathSegment::variable(&rest[open + 1..close]));
        rest = &rest[close + 1..];
    }

    segments
}

/// One HTTP verb bound to one path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    /// Absent when the operation declares no `operationId`.
    pub name: Option<NormalizedName>,
    pub verb: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub path_params: Vec<Param>,
    pub query_params: Vec<Param>,
    pub bodies: Vec<MediaTypeModel>,
    pub returns: Vec<MediaTypeModel>,
    pub deprecated: bool,
}

impl Method {
    /// Display label for diagnostics: the name, else `VERB path`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.camel_case.clone(),
            None => format!("{} {}", self.verb, self.path),
        }
    }

    pub fn path_segments(&self) -> Vec<PathSegment> {
        split_path(&self.path)
    }

    /// Path with `{param}` placeholders rewritten as `${param}`.
    pub fn templated_path(&self) -> String {
        self.path.replace('{', "${")
    }

    pub fn has_body(&self) -> bool {
        !self.bodies.is_empty()
    }

    pub fn has_one_body(&self) -> bool {
        self.bodies.len() == 1
    }

    pub fn has_different_bodies(&self) -> bool {
        self.bodies.len() > 1
    }

    pub fn has_one_return(&self) -> bool {
        self.returns.len() == 1
    }

    pub fn has_different_returns(&self) -> bool {
        self.returns.len() > 1
    }

    /// The single request body variant.
    pub fn body(&self) -> Result<&MediaTypeModel, TransformError> {
        single(&self.bodies).ok_or_else(|| TransformError::AmbiguousAccessor {
            method: self.label(),
            accessor: "body",
            count: self.bodies.len(),
        })
    }

    /// The single response variant.
    pub fn response(&self) -> Result<&MediaTypeModel, TransformError> {
        single(&self.returns).ok_or_else(|| TransformError::AmbiguousAccessor {
            method: self.label(),
            accessor: "response",
            count: self.returns.len(),
        })
    }

    pub fn body_type(&self) -> String {
        join_variant_types(&self.bodies)
    }

    pub fn return_type(&self) -> String {
        join_variant_types(&self.returns)
    }

    pub fn body_content_types(&self) -> Vec<&str> {
        self.bodies.iter().map(|b| b.content_type.as_str()).collect()
    }

    pub fn return_content_types(&self) -> Vec<&str> {
        self.returns.iter().map(|r| r.content_type.as_str()).collect()
    }

    /// Root models of this method: responses, then bodies, then parameters.
    pub fn root_models(&self) -> impl Iterator<Item = &Model> {
        let params = self.path_params.iter().chain(&self.query_params);
        self.returns
            .iter()
            .chain(&self.bodies)
            .filter_map(|variant| variant.model.as_ref())
            .chain(params.filter_map(|p| p.model.as_ref()))
    }

    /// Every model reachable from this method, pre-order.
    pub fn models(&self) -> Vec<&Model> {
        self.root_models().flat_map(Model::models).collect()
    }
}

fn single<T>(items: &[T]) -> Option<&T> {
    match items {
        [only] => Some(only),
        _ => None,
    }
}

fn join_variant_types(variants: &[MediaTypeModel]) -> String {
    if variants.is_empty() {
        return "unknown".to_string();
    }
    let mut types: Vec<String> = Vec::new();
    for name in variants.iter().map(MediaTypeModel::type_name) {
        if !types.contains(&name) {
            types.push(name);
        }
    }
    types.join(" | ")
}
