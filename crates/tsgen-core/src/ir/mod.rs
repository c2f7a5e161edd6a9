pub mod method;
pub mod model;
pub mod types;

pub use method::*;
pub use model::*;
pub use types::{Api, ApiInfo, Endpoint, NormalizedName};
