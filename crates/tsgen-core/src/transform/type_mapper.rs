use serde::Serialize;

use crate::ir::{Model, ModelKind, Primitive};

use super::name_normalizer::capitalize;

/// Map a scalar schema `type` (plus `format`) to a primitive.
pub fn map_primitive(schema_type: &str, format: Option<&str>) -> Primitive {
    match (schema_type, format) {
        ("integer" | "number", _) => Primitive::Number,
        ("string", Some("binary")) => Primitive::Binary,
        ("string", _) => Primitive::String,
        (other, _) => Primitive::Other(other.to_string()),
    }
}

/// What a renderer needs to know to reference a model's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub type_name: String,
    pub is_array: bool,
    pub is_binary: bool,
    /// Serializer function for the type (`serializePet`), when the type (or
    /// its array element) is a named model that needs one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serializer: Option<String>,
    /// Named models the type mentions directly.
    pub depends_on: Vec<String>,
}

pub fn describe(model: &Model) -> TypeDescriptor {
    let element = match &model.kind {
        ModelKind::Array { item } => item.as_ref(),
        _ => model,
    };

    let depends_on = match &model.name {
        Some(name) => vec![name.clone()],
        None => model.dependencies(),
    };

    TypeDescriptor {
        type_name: model.type_name(),
        is_array: model.is_array(),
        is_binary: model.is_binary(),
        serializer: serializer_name(element),
        depends_on,
    }
}

/// Models that are emitted as declarations get a serializer; primitives and
/// anonymous shapes are passed through as-is.
pub fn serializer_name(model: &Model) -> Option<String> {
    match (&model.name, &model.kind) {
        (_, ModelKind::Primitive { .. } | ModelKind::Unknown) => None,
        (Some(name), _) => Some(format!("serialize{}", capitalize(name))),
        (None, _) => None,
    }
}
