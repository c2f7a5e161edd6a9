use std::fmt;

use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// Parameter location. Locations the generator does not handle are kept
/// verbatim in `Other` so a document using them still parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
    Other(String),
}

impl From<String> for ParameterLocation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "query" => ParameterLocation::Query,
            "header" => ParameterLocation::Header,
            "path" => ParameterLocation::Path,
            "cookie" => ParameterLocation::Cookie,
            _ => ParameterLocation::Other(value),
        }
    }
}

impl From<ParameterLocation> for String {
    fn from(value: ParameterLocation) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterLocation::Query => f.write_str("query"),
            ParameterLocation::Header => f.write_str("header"),
            ParameterLocation::Path => f.write_str("path"),
            ParameterLocation::Cookie => f.write_str("cookie"),
            ParameterLocation::Other(other) => f.write_str(other),
        }
    }
}

/// An API parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Parameter),
}
