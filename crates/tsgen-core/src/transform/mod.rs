pub mod endpoints;
pub mod method_builder;
pub mod model_builder;
pub mod model_dedup;
pub mod name_normalizer;
pub mod spec_to_ir;
pub mod type_mapper;

pub use method_builder::{build_method, build_method_for_verb};
pub use model_builder::ModelBuilder;
pub use spec_to_ir::transform;
