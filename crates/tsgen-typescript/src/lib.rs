pub mod context;
pub mod error;
pub mod generator;
pub mod templates;

pub use error::RenderError;
pub use generator::{GeneratorConfig, TypescriptGenerator};
pub use templates::{TemplateName, Templates};
