use crate::error::TransformError;
use crate::ir::{Endpoint, Method};
use crate::parse::Document;

use super::method_builder::build_method;
use super::name_normalizer::normalize_name;

/// Endpoints with the methods they index into.
#[derive(Debug, Clone)]
pub struct Aggregated {
    pub endpoints: Vec<Endpoint>,
    pub methods: Vec<Method>,
}

/// Build every operation once and attach it to the endpoint of each declared
/// tag it lists.
///
/// Operations matching no declared tag are kept in `methods` but are not
/// reachable from any endpoint.
pub fn aggregate(doc: &Document) -> Result<Aggregated, TransformError> {
    let spec = doc.spec();

    let mut endpoints: Vec<Endpoint> = spec
        .tags
        .iter()
        .map(|tag| Endpoint {
            name: normalize_name(&tag.name),
            description: tag.description.clone(),
            methods: Vec::new(),
        })
        .collect();
    let mut methods = Vec::new();

    for (path, item) in &spec.paths {
        for (verb, _) in item.operations() {
            let method = build_method(doc, path, verb)?;
            let index = methods.len();

            let mut attached = false;
            for endpoint in &mut endpoints {
                if method.tags.contains(&endpoint.name.original) {
                    endpoint.methods.push(index);
                    attached = true;
                }
            }
            if !attached {
                log::warn!(
                    "{} is not tagged with any declared tag and will not be generated",
                    method.label()
                );
            }

            methods.push(method);
        }
    }

    Ok(Aggregated { endpoints, methods })
}
