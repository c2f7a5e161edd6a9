use std::borrow::Cow;
use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::document::Document;
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::response::{Response, ResponseOrRef};
use super::schema::{Schema, SchemaOrRef};
use crate::error::ResolveError;
use crate::transform::name_normalizer::format_name;

/// A node that is either inline or a `$ref` to a node of the same kind.
pub trait RefOr: DeserializeOwned {
    type Target: Clone;

    /// The inline target, or the pointer when this node is a reference.
    fn as_target(&self) -> Result<&Self::Target, &str>;
}

impl RefOr for SchemaOrRef {
    type Target = Schema;

    fn as_target(&self) -> Result<&Schema, &str> {
        match self {
            SchemaOrRef::Schema(schema) => Ok(schema.as_ref()),
            SchemaOrRef::Ref { ref_path } => Err(ref_path.as_str()),
        }
    }
}

impl RefOr for ParameterOrRef {
    type Target = Parameter;

    fn as_target(&self) -> Result<&Parameter, &str> {
        match self {
            ParameterOrRef::Parameter(param) => Ok(param),
            ParameterOrRef::Ref { ref_path } => Err(ref_path.as_str()),
        }
    }
}

impl RefOr for RequestBodyOrRef {
    type Target = RequestBody;

    fn as_target(&self) -> Result<&RequestBody, &str> {
        match self {
            RequestBodyOrRef::RequestBody(body) => Ok(body),
            RequestBodyOrRef::Ref { ref_path } => Err(ref_path.as_str()),
        }
    }
}

impl RefOr for ResponseOrRef {
    type Target = Response;

    fn as_target(&self) -> Result<&Response, &str> {
        match self {
            ResponseOrRef::Response(resp) => Ok(resp),
            ResponseOrRef::Ref { ref_path } => Err(ref_path.as_str()),
        }
    }
}

/// Return the node a document-local pointer (`#/components/schemas/Pet`)
/// designates.
pub fn resolve_pointer<'a>(doc: &'a Document, pointer: &str) -> Result<&'a Value, ResolveError> {
    let path = pointer
        .strip_prefix('#')
        .filter(|p| p.starts_with('/'))
        .ok_or_else(|| ResolveError::InvalidRefFormat(pointer.to_string()))?;
    doc.raw()
        .pointer(path)
        .filter(|node| !node.is_null())
        .ok_or_else(|| ResolveError::UnresolvedRef(pointer.to_string()))
}

/// Resolve a pointer and decode the target as `T`.
pub fn resolve<T: DeserializeOwned>(doc: &Document, pointer: &str) -> Result<T, ResolveError> {
    let node = resolve_pointer(doc, pointer)?;
    T::deserialize(node).map_err(|source| ResolveError::InvalidTarget {
        pointer: pointer.to_string(),
        source,
    })
}

/// Dereference a node, following reference chains until an inline target
/// is reached.
pub fn resolve_or_inline<'a, T: RefOr>(
    doc: &Document,
    node: &'a T,
) -> Result<Cow<'a, T::Target>, ResolveError> {
    let mut pointer = match node.as_target() {
        Ok(target) => return Ok(Cow::Borrowed(target)),
        Err(pointer) => pointer.to_string(),
    };
    let mut visited = HashSet::new();
    loop {
        if !visited.insert(pointer.clone()) {
            return Err(ResolveError::CircularRef(pointer));
        }
        let resolved: T = resolve(doc, &pointer)?;
        match resolved.as_target() {
            Ok(target) => return Ok(Cow::Owned(target.clone())),
            Err(next) => pointer = next.to_string(),
        }
    }
}

/// Model name for a reference: its final segment, formatted as an identifier.
pub fn ref_name(pointer: &str) -> Result<String, ResolveError> {
    let segment = pointer
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && *s != "#")
        .ok_or_else(|| ResolveError::InvalidRefFormat(pointer.to_string()))?;
    let unescaped = segment.replace("~1", "/").replace("~0", "~");
    Ok(format_name(&unescaped))
}
