use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct AuditConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub host: HostConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TargetConfig {
    /// Base URL of the deployment under audit.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path probed for public exposure, relative to `base_url`.
    #[serde(default = "default_sensitive_path")]
    pub sensitive_path: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            sensitive_path: default_sensitive_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_sensitive_path() -> String {
    "/.env".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SecretsConfig {
    /// Env file in KEY=VALUE line format.
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,
    /// Variable holding the application signing secret.
    #[serde(default = "default_secret_key")]
    pub key: String,
    /// Substrings indicating a placeholder/default secret (case-insensitive).
    #[serde(default = "default_weak_values")]
    pub weak_values: Vec<String>,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            key: default_secret_key(),
            weak_values: default_weak_values(),
        }
    }
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_secret_key() -> String {
    "SECRET_KEY".to_string()
}

fn default_weak_values() -> Vec<String> {
    ["your-secret-key", "change-this", "example", "123456", "secret"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Variable holding the connection string.
    #[serde(default = "default_url_key")]
    pub url_key: String,
    /// Substrings indicating a guessable password (case-insensitive).
    #[serde(default = "default_weak_substrings")]
    pub weak_substrings: Vec<String>,
    /// Passwords shorter than this are flagged outright.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    /// Administrative account probed for trivial credentials.
    #[serde(default = "default_admin_user")]
    pub admin_user: String,
    /// Well-known weak passwords tried in order before the empty password.
    #[serde(default = "default_admin_passwords")]
    pub admin_passwords: Vec<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url_key: default_url_key(),
            weak_substrings: default_weak_substrings(),
            min_length: default_min_length(),
            host: default_db_host(),
            port: default_db_port(),
            admin_user: default_admin_user(),
            admin_passwords: default_admin_passwords(),
        }
    }
}

fn default_url_key() -> String {
    "DATABASE_URL".to_string()
}

fn default_weak_substrings() -> Vec<String> {
    ["password", "123", "admin", "root"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_min_length() -> usize {
    8
}

fn default_db_host() -> String {
    "127.0.0.1".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_admin_user() -> String {
    "root".to_string()
}

fn default_admin_passwords() -> Vec<String> {
    vec!["root".to_string()]
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    /// Subtree searched for CORS configuration text.
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,
    /// Marker token located by plain text search, not a parser.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Stop collecting after this many matching lines.
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            marker: default_marker(),
            max_matches: default_max_matches(),
        }
    }
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_marker() -> String {
    "allow_origins".to_string()
}

fn default_max_matches() -> usize {
    5
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProbeConfig {
    /// Bound on the HTTP probe and on each database authentication attempt.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    3
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HostConfig {
    /// Most permissive acceptable mode for the env file, as an octal string.
    #[serde(default = "default_max_mode")]
    pub max_mode: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_mode: default_max_mode(),
        }
    }
}

fn default_max_mode() -> String {
    "0600".to_string()
}

impl HostConfig {
    /// Parsed permission threshold. Validation rejects malformed values
    /// before any check runs, so callers may fall back to the default.
    pub fn max_mode_bits(&self) -> Option<u32> {
        u32::from_str_radix(self.max_mode.trim_start_matches("0o"), 8).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.target.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.target.sensitive_path, "/.env");
        assert_eq!(config.secrets.key, "SECRET_KEY");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.admin_user, "root");
        assert_eq!(config.cors.marker, "allow_origins");
        assert_eq!(config.cors.max_matches, 5);
        assert_eq!(config.probe.timeout_secs, 3);
        assert_eq!(config.host.max_mode_bits(), Some(0o600));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
[target]
base_url = "https://api.example.com"

[database]
port = 3307
"#;
        let config: AuditConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.target.base_url, "https://api.example.com");
        assert_eq!(config.target.sensitive_path, "/.env");
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.database.url_key, "DATABASE_URL");
        assert_eq!(config.secrets.weak_values.len(), 5);
    }

    #[test]
    fn test_max_mode_parsing() {
        let mut host = HostConfig::default();
        assert_eq!(host.max_mode_bits(), Some(0o600));

        host.max_mode = "0o640".to_string();
        assert_eq!(host.max_mode_bits(), Some(0o640));

        host.max_mode = "rw-------".to_string();
        assert_eq!(host.max_mode_bits(), None);
    }
}
