//! Parameter objects bound by the templates, built from the IR.

use serde::Serialize;
use tsgen_core::ir::{Api, BodyReader, Codec, Endpoint, MediaTypeModel, Method, Model, ModelKind, Param};
use tsgen_core::transform::name_normalizer::{
    capitalize, description_lines, format_name, route_to_name, uncapitalize,
};
use tsgen_core::transform::type_mapper::{TypeDescriptor, describe, serializer_name};

use crate::error::RenderError;

/// Context of the `dto` and `serializer` templates.
#[derive(Debug, Clone, Serialize)]
pub struct ModelContext {
    pub name: String,
    pub kind: &'static str,
    pub description_lines: Vec<String>,
    /// Literal type the declaration aliases (`Pet[]`, `A | B`).
    #[serde(rename = "type")]
    pub type_name: String,
    pub is_object: bool,
    pub is_array: bool,
    pub properties: Vec<PropertyContext>,
    /// Element of an array model.
    pub item: Option<TypeDescriptor>,
    /// Members of a union or intersection.
    pub members: Vec<TypeDescriptor>,
    /// Other models the declaration mentions.
    pub imports: Vec<String>,
    /// Name the serializer function is exported under.
    pub serializer_name: Option<String>,
    /// Serializers the serializer body calls, excluding its own.
    pub serializer_imports: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyContext {
    pub name: String,
    /// Object-literal key: the name, quoted when it is not an identifier.
    pub key: String,
    /// Member access suffix: `.name` or `["name"]`.
    pub accessor: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub is_required: bool,
    pub is_array: bool,
    pub serializer: Option<String>,
    pub description_lines: Vec<String>,
}

pub fn model_context(model: &Model) -> ModelContext {
    let name = model.type_name();
    let properties: Vec<PropertyContext> = model
        .properties()
        .iter()
        .map(|p| {
            let descriptor = describe(&p.model);
            PropertyContext {
                name: p.name.clone(),
                key: property_key(&p.name),
                accessor: accessor(&p.name),
                type_name: descriptor.type_name,
                is_required: p.is_required,
                is_array: descriptor.is_array,
                serializer: descriptor.serializer,
                description_lines: description_lines(p.description.as_deref()),
            }
        })
        .collect();

    let item = match &model.kind {
        ModelKind::Array { item } => Some(describe(item)),
        _ => None,
    };
    let members: Vec<TypeDescriptor> = match &model.kind {
        ModelKind::Union { members } | ModelKind::Intersection { members } => {
            members.iter().map(describe).collect()
        }
        _ => Vec::new(),
    };

    let mut imports: Vec<String> = Vec::new();
    let referenced = model
        .properties()
        .iter()
        .map(|p| &p.model)
        .chain(model.depends_on());
    for dependency in referenced {
        let names = describe(dependency).depends_on;
        push_unique(&mut imports, names.into_iter().filter(|n| *n != name));
    }

    let own_serializer = serializer_name(model);
    let mut serializer_imports: Vec<String> = Vec::new();
    let used = properties
        .iter()
        .filter_map(|p| p.serializer.as_ref())
        .chain(item.iter().filter_map(|i| i.serializer.as_ref()))
        .chain(members.iter().filter_map(|m| m.serializer.as_ref()));
    for serializer in used {
        if own_serializer.as_ref() != Some(serializer) && !serializer_imports.contains(serializer) {
            serializer_imports.push(serializer.clone());
        }
    }

    ModelContext {
        kind: model.kind_name(),
        description_lines: description_lines(model.description.as_deref()),
        type_name: model.literal_type().unwrap_or_else(|| "unknown".to_string()),
        is_object: matches!(model.kind, ModelKind::Object { .. }),
        is_array: model.is_array(),
        properties,
        item,
        members,
        imports,
        serializer_name: own_serializer,
        serializer_imports,
        name,
    }
}

/// Context of the `endpoint` template.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointContext {
    pub name: String,
    pub pascal_name: String,
    pub camel_name: String,
    pub description_lines: Vec<String>,
    pub methods: Vec<MethodContext>,
    pub imports: Vec<String>,
    pub serializer_imports: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodContext {
    pub name: String,
    pub capitalized_name: String,
    pub description_lines: Vec<String>,
    pub verb: &'static str,
    pub path: Vec<PathPart>,
    /// Request path relative to the client's base URL, as a template
    /// literal body.
    pub url: String,
    pub signature: String,
    pub params: Vec<ParamContext>,
    pub query_params: Vec<ParamContext>,
    /// Set when the method takes exactly one body variant.
    pub body: Option<VariantContext>,
    pub bodies: Vec<VariantContext>,
    pub body_type: String,
    pub response_type: String,
    pub is_binary_response: bool,
    pub returns: Vec<VariantContext>,
    pub deprecated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathPart {
    pub is_variable: bool,
    /// Literal text, or the argument name of a variable.
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamContext {
    pub name: String,
    /// Identifier used as a function argument.
    pub arg: String,
    pub key: String,
    pub accessor: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub is_required: bool,
}

/// One content-type variant of a body or response.
#[derive(Debug, Clone, Serialize)]
pub struct VariantContext {
    pub content_type: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub is_array: bool,
    pub is_binary: bool,
    pub serializer: Option<String>,
    pub codec: Codec,
    pub reader: BodyReader,
}

fn variant_context(variant: &MediaTypeModel) -> VariantContext {
    let descriptor = variant.model.as_ref().map(describe);
    VariantContext {
        content_type: variant.content_type.clone(),
        name: variant.name.clone(),
        type_name: variant.type_name(),
        is_array: descriptor.as_ref().is_some_and(|d| d.is_array),
        is_binary: variant.is_binary(),
        serializer: descriptor.and_then(|d| d.serializer),
        codec: variant.codec(),
        reader: variant.reader(),
    }
}

fn param_context(param: &Param) -> ParamContext {
    ParamContext {
        name: param.name.clone(),
        arg: argument_name(&param.name),
        key: property_key(&param.name),
        accessor: accessor(&param.name),
        type_name: param.type_name(),
        is_required: param.required,
    }
}

/// Name generated code uses for a method. Operations without an
/// `operationId` fall back to a route-derived name.
pub fn method_name(method: &Method) -> String {
    match &method.name {
        Some(name) => name.camel_case.clone(),
        None => route_to_name(method.verb.as_str(), &method.path),
    }
}

pub fn method_context(method: &Method) -> Result<MethodContext, RenderError> {
    let name = method_name(method);
    let params: Vec<ParamContext> = method.path_params.iter().map(param_context).collect();
    let query_params: Vec<ParamContext> = method.query_params.iter().map(param_context).collect();
    let bodies: Vec<VariantContext> = method.bodies.iter().map(variant_context).collect();
    let returns: Vec<VariantContext> = method.returns.iter().map(variant_context).collect();

    let body = if method.has_one_body() {
        Some(variant_context(method.body()?))
    } else {
        None
    };
    let is_binary_response = method.has_one_return() && method.response()?.is_binary();

    let path: Vec<PathPart> = method
        .path_segments()
        .into_iter()
        .map(|segment| PathPart {
            value: if segment.is_variable {
                argument_name(&segment.value)
            } else {
                segment.value
            },
            is_variable: segment.is_variable,
        })
        .collect();
    let url: String = path
        .iter()
        .map(|part| {
            if part.is_variable {
                format!("${{encodeURIComponent(String({}))}}", part.value)
            } else {
                part.value.clone()
            }
        })
        .collect();

    let response_type = if returns.is_empty() {
        "void".to_string()
    } else {
        method.return_type()
    };

    Ok(MethodContext {
        capitalized_name: capitalize(&name),
        description_lines: description_lines(
            method.description.as_deref().or(method.summary.as_deref()),
        ),
        verb: method.verb.as_str(),
        signature: signature(method, &params, &query_params),
        url,
        path,
        params,
        query_params,
        body,
        bodies,
        body_type: method.body_type(),
        response_type,
        is_binary_response,
        returns,
        deprecated: method.deprecated,
        name,
    })
}

/// Argument list: path parameters, then the body, then a query object.
fn signature(method: &Method, params: &[ParamContext], query_params: &[ParamContext]) -> String {
    let mut parts: Vec<String> = params
        .iter()
        .map(|p| format!("{}: {}", p.arg, p.type_name))
        .collect();

    if method.has_one_body() {
        parts.push(format!("body: {}", method.body_type()));
    } else if method.has_different_bodies() {
        parts.push(format!("body: {}", method.body_type()));
        let content_types: Vec<String> = method
            .body_content_types()
            .into_iter()
            .map(|ct| format!("\"{ct}\""))
            .collect();
        parts.push(format!("contentType: {}", content_types.join(" | ")));
    }

    if !query_params.is_empty() {
        let fields: Vec<String> = query_params
            .iter()
            .map(|q| {
                let optional = if q.is_required { "" } else { "?" };
                format!("{}{optional}: {}", q.key, q.type_name)
            })
            .collect();
        let default = if query_params.iter().any(|q| q.is_required) {
            ""
        } else {
            " = {}"
        };
        parts.push(format!("query: {{ {} }}{default}", fields.join("; ")));
    }

    parts.join(", ")
}

pub fn endpoint_context(api: &Api, endpoint: &Endpoint) -> Result<EndpointContext, RenderError> {
    let methods = api
        .endpoint_methods(endpoint)
        .map(method_context)
        .collect::<Result<Vec<_>, _>>()?;

    let mut imports: Vec<String> = Vec::new();
    let mut serializer_imports: Vec<String> = Vec::new();
    for method in api.endpoint_methods(endpoint) {
        let variants = method.bodies.iter().chain(&method.returns);
        let params = method.path_params.iter().chain(&method.query_params);
        let models = variants
            .filter_map(|v| v.model.as_ref())
            .chain(params.filter_map(|p| p.model.as_ref()));
        for model in models {
            push_unique(&mut imports, describe(model).depends_on);
        }
    }
    for method in &methods {
        let serializers = method.body.iter().chain(&method.bodies);
        push_unique(
            &mut serializer_imports,
            serializers.filter_map(|b| b.serializer.clone()),
        );
    }

    Ok(EndpointContext {
        name: endpoint.name.original.clone(),
        pascal_name: endpoint.name.pascal_case.clone(),
        camel_name: endpoint.name.camel_case.clone(),
        description_lines: description_lines(endpoint.description.as_deref()),
        methods,
        imports,
        serializer_imports,
    })
}

/// Context of the `client` template.
#[derive(Debug, Clone, Serialize)]
pub struct ClientContext {
    pub title: String,
    pub version: String,
    pub description_lines: Vec<String>,
    pub endpoints: Vec<EndpointRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointRef {
    pub pascal_name: String,
    pub camel_name: String,
}

pub fn client_context(api: &Api) -> ClientContext {
    ClientContext {
        title: api.info.title.clone(),
        version: api.info.version.clone(),
        description_lines: description_lines(api.info.description.as_deref()),
        endpoints: api
            .endpoints
            .iter()
            .map(|e| EndpointRef {
                pascal_name: e.name.pascal_case.clone(),
                camel_name: e.name.camel_case.clone(),
            })
            .collect(),
    }
}

/// Context of the `index` template.
#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    pub files: Vec<String>,
}

fn push_unique(target: &mut Vec<String>, items: impl IntoIterator<Item = String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        serde_json::Value::from(name).to_string()
    }
}

fn accessor(name: &str) -> String {
    if is_identifier(name) {
        format!(".{name}")
    } else {
        format!("[{}]", property_key(name))
    }
}

fn argument_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        uncapitalize(&format_name(name))
    }
}
