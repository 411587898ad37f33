pub mod config;
pub mod loader;
pub mod validate;

pub use config::{
    AuditConfig, CorsConfig, DatabaseConfig, HostConfig, ProbeConfig, SecretsConfig, TargetConfig,
};
pub use loader::{load_config, DEFAULT_CONFIG_PATH};
pub use validate::validate_config;
