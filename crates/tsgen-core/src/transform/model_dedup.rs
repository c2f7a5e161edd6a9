use std::cmp::Ordering;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::TransformError;
use crate::ir::{Endpoint, Method, Model};

/// Collect the named models reachable from `endpoints`, one per name,
/// sorted by name.
///
/// Traversal is endpoints → methods → responses, bodies, parameters → model
/// tree (pre-order). The first occurrence of a name is kept, except that a
/// pending back-reference gives way to the full model. Two occurrences that
/// disagree structurally are a [`TransformError::NameCollision`].
pub fn collect_models(endpoints: &[Endpoint], methods: &[Method]) -> Result<Vec<Model>, TransformError> {
    let mut models: IndexMap<String, Model> = IndexMap::new();

    let reachable = endpoints
        .iter()
        .flat_map(|endpoint| endpoint.methods.iter())
        .filter_map(|&index| methods.get(index));

    for method in reachable {
        for model in method.models() {
            let Some(name) = &model.name else {
                continue;
            };
            match models.entry(name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(model.clone());
                }
                Entry::Occupied(mut slot) => {
                    if !slot.get().same_shape(model) {
                        return Err(TransformError::NameCollision(name.clone()));
                    }
                    if slot.get().is_pending() && !model.is_pending() {
                        slot.insert(model.clone());
                    }
                }
            }
        }
    }

    let mut models: Vec<Model> = models.into_values().collect();
    models.sort_by(|a, b| compare_names(a.name.as_deref(), b.name.as_deref()));
    Ok(models)
}

/// Case-insensitive ordering, lowercase before uppercase on ties, unnamed
/// first.
pub fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| b.cmp(a)),
    }
}
