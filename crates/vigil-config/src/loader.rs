use crate::config::AuditConfig;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "vigil.toml";

/// Load configuration from an explicit path or from `vigil.toml` in the
/// working directory. A missing default file yields the built-in defaults;
/// a missing explicit path is a configuration error.
pub fn load_config(path: Option<&Path>) -> Result<AuditConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            read_config(path)
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if !path.exists() {
                return Ok(AuditConfig::default());
            }
            read_config(path)
        }
    }
}

fn read_config(path: &Path) -> Result<AuditConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {:?}", path))?;

    let config: AuditConfig =
        toml::from_str(&content).with_context(|| "Failed to parse TOML config file")?;

    Ok(config)
}

pub fn save_config(config: &AuditConfig, path: &Path) -> Result<()> {
    let content =
        toml::to_string_pretty(config).with_context(|| "Failed to serialize config to TOML")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file to {:?}", path))?;

    Ok(())
}
