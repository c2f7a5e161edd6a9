use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The `type` field can be a single type or an array of types.
///
/// Type names are kept as strings: unknown scalar types are passed through
/// to the generated code verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(String),
    Multiple(Vec<String>),
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    pub fn ref_path(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path } => Some(ref_path.as_str()),
            SchemaOrRef::Schema(_) => None,
        }
    }
}

/// A JSON Schema object, reduced to the keywords client generation needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    // Object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    // Composition
    // Presence matters: `oneOf: []` is an empty union, not an absent one.
    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaOrRef>>,

    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaOrRef>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl Schema {
    /// The single scalar `type`, if one is declared. Multi-type arrays are
    /// not supported and yield `None`.
    pub fn single_type(&self) -> Option<&str> {
        match &self.schema_type {
            Some(TypeSet::Single(t)) => Some(t.as_str()),
            Some(TypeSet::Multiple(_)) | None => None,
        }
    }

    /// Whether this schema produces a composite model (object, array, or a
    /// composition) rather than a scalar.
    pub fn is_structural(&self) -> bool {
        self.one_of.is_some()
            || self.all_of.is_some()
            || matches!(self.single_type(), Some("object" | "array"))
    }
}
