pub mod components;
pub mod document;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod spec;

use crate::error::ParseError;
pub use document::Document;

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    let raw: serde_json::Value = serde_yaml_ng::from_str(input)?;
    Document::from_value(raw)
}

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    let raw: serde_json::Value = serde_json::from_str(input)?;
    Document::from_value(raw)
}

/// Parse a document whose format is not known up front: JSON first, then YAML.
pub fn from_str(input: &str) -> Result<Document, ParseError> {
    match serde_json::from_str::<serde_json::Value>(input) {
        Ok(raw) => Document::from_value(raw),
        Err(_) => from_yaml(input),
    }
}
