use indexmap::IndexMap;

use crate::error::TransformError;
use crate::ir::{HttpMethod, MediaTypeModel, Method, NormalizedName, Param, split_path};
use crate::parse::Document;
use crate::parse::media_type::MediaType;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::ParameterLocation;
use crate::parse::ref_resolve::resolve_or_inline;
use crate::parse::schema::SchemaOrRef;

use super::model_builder::ModelBuilder;
use super::name_normalizer::{format_name, media_type_suffixes, normalize_name, route_to_name};

/// Status codes treated as success, in selection order.
const SUCCESS_CODES: [&str; 7] = ["200", "201", "202", "203", "204", "205", "206"];

/// Build the method bound to `verb` on `path`.
pub fn build_method(doc: &Document, path: &str, verb: HttpMethod) -> Result<Method, TransformError> {
    let item = doc
        .spec()
        .paths
        .get(path)
        .ok_or_else(|| TransformError::InvalidPath(path.to_string()))?;
    let op = item
        .operation(verb)
        .ok_or_else(|| TransformError::InvalidVerb {
            path: path.to_string(),
            verb: verb.as_str().to_lowercase(),
        })?;

    MethodBuilder::new(doc, path, verb, op).build(item, op)
}

/// Like [`build_method`], with the verb given as text (`"get"`, `"POST"`).
pub fn build_method_for_verb(doc: &Document, path: &str, verb: &str) -> Result<Method, TransformError> {
    let verb = verb
        .parse::<HttpMethod>()
        .map_err(|verb| TransformError::InvalidVerb {
            path: path.to_string(),
            verb,
        })?;
    build_method(doc, path, verb)
}

struct MethodBuilder<'a> {
    doc: &'a Document,
    path: &'a str,
    verb: HttpMethod,
    name: Option<NormalizedName>,
    /// Base for synthesized model names; the route-derived name stands in
    /// when the operation has no `operationId`.
    base: NormalizedName,
    models: ModelBuilder<'a>,
}

impl<'a> MethodBuilder<'a> {
    fn new(doc: &'a Document, path: &'a str, verb: HttpMethod, op: &Operation) -> Self {
        let name = op.operation_id.as_deref().map(normalize_name);
        let base = name
            .clone()
            .unwrap_or_else(|| normalize_name(&route_to_name(verb.as_str(), path)));
        Self {
            doc,
            path,
            verb,
            name,
            base,
            models: ModelBuilder::new(doc),
        }
    }

    fn build(mut self, item: &PathItem, op: &Operation) -> Result<Method, TransformError> {
        let (path_params, query_params) = self.build_params(item, op)?;
        let returns = self.build_returns(op)?;
        let bodies = self.build_bodies(op, returns.len())?;

        Ok(Method {
            name: self.name,
            verb: self.verb,
            path: self.path.to_string(),
            summary: op.summary.clone(),
            description: op.description.clone(),
            tags: op.tags.clone(),
            path_params,
            query_params,
            bodies,
            returns,
            deprecated: op.deprecated.unwrap_or(false),
        })
    }

    fn build_params(
        &mut self,
        item: &PathItem,
        op: &Operation,
    ) -> Result<(Vec<Param>, Vec<Param>), TransformError> {
        let mut path_params = Vec::new();
        let mut query_params = Vec::new();

        for node in item.parameters.iter().chain(&op.parameters) {
            let param = resolve_or_inline(self.doc, node)?;
            let target = match param.location {
                ParameterLocation::Path => &mut path_params,
                ParameterLocation::Query => &mut query_params,
                ref other => {
                    log::warn!(
                        "skipping {other} parameter `{}` of {} {}",
                        param.name,
                        self.verb,
                        self.path
                    );
                    continue;
                }
            };

            let model = match &param.schema {
                Some(schema) => {
                    let name = self.structural_name(schema, &format_name(&param.name));
                    Some(self.models.build_schema_or_ref(schema, name.as_deref())?)
                }
                None => None,
            };

            target.push(Param {
                name: param.name.clone(),
                required: param.required || param.location == ParameterLocation::Path,
                description: param.description.clone(),
                model,
            });
        }

        // Template variables nobody declared still need an argument.
        for segment in split_path(self.path).into_iter().filter(|s| s.is_variable) {
            if path_params.iter().any(|p: &Param| p.name == segment.value) {
                continue;
            }
            log::warn!(
                "path variable `{}` of {} {} is not declared, typing it as string",
                segment.value,
                self.verb,
                self.path
            );
            path_params.push(Param {
                name: segment.value,
                required: true,
                description: None,
                model: None,
            });
        }

        Ok((path_params, query_params))
    }

    /// `{Op}{suffix}` for inline structural schemas; scalars stay unnamed.
    fn structural_name(&self, schema: &SchemaOrRef, suffix: &str) -> Option<String> {
        match schema {
            SchemaOrRef::Schema(inline) if inline.is_structural() => {
                Some(format!("{}{suffix}", self.base.pascal_case))
            }
            _ => None,
        }
    }

    fn build_returns(&mut self, op: &Operation) -> Result<Vec<MediaTypeModel>, TransformError> {
        let Some(node) = SUCCESS_CODES.iter().find_map(|code| op.responses.get(*code)) else {
            return Ok(Vec::new());
        };
        let response = resolve_or_inline(self.doc, node)?;

        let multiple = response.content.len() > 1;
        let base = self.base.camel_case.clone();
        self.build_variants(&response.content, |suffix| {
            if multiple {
                format!("{base}{suffix}")
            } else {
                base.clone()
            }
        })
    }

    fn build_bodies(
        &mut self,
        op: &Operation,
        return_count: usize,
    ) -> Result<Vec<MediaTypeModel>, TransformError> {
        let Some(node) = &op.request_body else {
            return Ok(Vec::new());
        };
        let body = resolve_or_inline(self.doc, node)?;

        // Body variants are only told apart when the responses are.
        let qualified = return_count > 1;
        let base = self.base.pascal_case.clone();
        self.build_variants(&body.content, |suffix| {
            if qualified {
                format!("{base}{suffix}Body")
            } else {
                format!("{base}Body")
            }
        })
    }

    fn build_variants(
        &mut self,
        content: &IndexMap<String, MediaType>,
        model_name: impl Fn(&str) -> String,
    ) -> Result<Vec<MediaTypeModel>, TransformError> {
        let suffixes = media_type_suffixes(content.keys().map(String::as_str));
        content
            .iter()
            .zip(suffixes)
            .map(|((content_type, media), suffix)| {
                let model = match &media.schema {
                    Some(schema) => {
                        let name = model_name(&suffix);
                        Some(self.models.build_schema_or_ref(schema, Some(&name))?)
                    }
                    None => None,
                };
                Ok::<_, TransformError>(MediaTypeModel {
                    content_type: content_type.clone(),
                    name: suffix,
                    model,
                })
            })
            .collect()
    }
}
