mod auth;
mod credentials;
mod loader;
mod types;

pub use auth::{build_auth_header, AuthHeader};
pub use credentials::SecureString;
pub use loader::ConfigError;
pub use types::{ApiConfig, Config, StorageConfig};
