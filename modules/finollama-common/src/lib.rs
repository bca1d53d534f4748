pub mod config;
pub mod error;
pub mod hash;
pub mod types;
pub mod validate;

pub use config::AppConfig;
pub use error::{ConfigError, ValidationError};
pub use hash::content_hash;
pub use types::*;
pub use validate::validate_url;
