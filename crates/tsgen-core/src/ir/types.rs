use std::fmt;

use serde::Serialize;

use super::method::Method;
use super::model::Model;

/// The render-ready representation of one OpenAPI document.
#[derive(Debug, Clone, Serialize)]
pub struct Api {
    pub info: ApiInfo,
    /// One per declared tag, in document order.
    pub endpoints: Vec<Endpoint>,
    /// Every operation in the document, including ones no endpoint lists.
    pub methods: Vec<Method>,
    /// Named models reachable from the endpoints, deduplicated and sorted.
    pub models: Vec<Model>,
}

impl Api {
    /// Methods attached to `endpoint`, in attachment order.
    pub fn endpoint_methods<'a>(
        &'a self,
        endpoint: &'a Endpoint,
    ) -> impl Iterator<Item = &'a Method> {
        endpoint.methods.iter().filter_map(|&i| self.methods.get(i))
    }
}

/// API metadata.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiInfo {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

/// A tag-grouped collection of operations.
#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub name: NormalizedName,
    pub description: Option<String>,
    /// Indices into `Api::methods`. A method may be listed by several endpoints.
    pub methods: Vec<usize>,
}

/// A name with its identifier casings pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
