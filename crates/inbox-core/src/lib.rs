mod display;
mod endpoint;
mod model;

pub use display::{category_icon, DEFAULT_ACTIONS};
pub use endpoint::ApiEndpoint;
pub use model::*;
