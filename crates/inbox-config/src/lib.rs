mod error;
mod manager;
mod model;

pub use error::ConfigError;
pub use manager::{ConfigManager, API_BASE_ENV};
pub use model::*;
