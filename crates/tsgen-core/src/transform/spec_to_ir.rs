use crate::error::TransformError;
use crate::ir::{Api, ApiInfo};
use crate::parse::Document;

use super::endpoints::aggregate;
use super::model_dedup::collect_models;

/// Transform a loaded document into the render-ready IR.
pub fn transform(doc: &Document) -> Result<Api, TransformError> {
    // Phase 1: Build every operation and group them by tag
    let aggregated = aggregate(doc)?;

    // Phase 2: Flatten the model trees reachable from the endpoints
    let models = collect_models(&aggregated.endpoints, &aggregated.methods)?;

    // Phase 3: API metadata
    let info = &doc.spec().info;
    let info = ApiInfo {
        title: info.title.clone(),
        description: info.description.clone(),
        version: info.version.clone(),
    };

    log::debug!(
        "built {} endpoints, {} methods, {} models",
        aggregated.endpoints.len(),
        aggregated.methods.len(),
        models.len()
    );

    Ok(Api {
        info,
        endpoints: aggregated.endpoints,
        methods: aggregated.methods,
        models,
    })
}
