use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use crate::ir::HttpMethod;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
}

/// A path item, containing operations keyed by HTTP method.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPathItem")]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,

    /// Operations in the order the document declares them.
    #[serde(flatten)]
    pub operations: IndexMap<HttpMethod, Operation>,
}

/// Wire shape of a path item: verbs are picked out of the remaining keys so
/// that their document order survives.
#[derive(Deserialize)]
struct RawPathItem {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Vec<ParameterOrRef>,
    #[serde(flatten)]
    rest: IndexMap<String, Value>,
}

impl TryFrom<RawPathItem> for PathItem {
    type Error = serde_json::Error;

    fn try_from(raw: RawPathItem) -> Result<Self, Self::Error> {
        let mut operations = IndexMap::new();
        for (key, value) in raw.rest {
            // `servers`, `$ref` and extensions are not operations.
            let Ok(method) = key.parse::<HttpMethod>() else {
                continue;
            };
            operations.insert(method, Operation::deserialize(value)?);
        }
        Ok(Self {
            summary: raw.summary,
            description: raw.description,
            parameters: raw.parameters,
            operations,
        })
    }
}

impl PathItem {
    /// The operation bound to `method`, if the path declares one.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.operations.get(&method)
    }

    /// Declared operations in document order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        self.operations.iter().map(|(method, op)| (*method, op))
    }
}
