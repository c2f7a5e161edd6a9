use serde::Deserialize;
use serde_json::Value;

use super::spec::OpenApiSpec;
use crate::error::ParseError;

/// A loaded OpenAPI document.
///
/// Holds the typed view used to enumerate tags and paths, and the raw tree
/// that `$ref` pointers are resolved against. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Document {
    spec: OpenApiSpec,
    raw: Value,
}

impl Document {
    /// Build a document from an already-decoded tree. Rejects documents
    /// whose `openapi` version is not 3.x.
    pub fn from_value(raw: Value) -> Result<Self, ParseError> {
        let version = raw
            .get("openapi")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingField("openapi".to_string()))?;
        if !version.starts_with("3.") {
            return Err(ParseError::UnsupportedVersion(version.to_string()));
        }
        let spec = OpenApiSpec::deserialize(&raw)?;
        Ok(Self { spec, raw })
    }

    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}
