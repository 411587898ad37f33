use crate::config::AuditConfig;
use anyhow::{bail, Result};
use std::fs::File;
use std::io::ErrorKind;

/// Reject invalid configuration before any check runs. Findings cover
/// missing inputs; this covers inputs the tool itself cannot work with.
pub fn validate_config(config: &AuditConfig) -> Result<()> {
    if config.target.base_url.trim().is_empty() {
        bail!("Invalid config field 'target.base_url': must not be empty");
    }
    if !config.target.sensitive_path.starts_with('/') {
        bail!(
            "Invalid config field 'target.sensitive_path': must start with '/' (got {:?})",
            config.target.sensitive_path
        );
    }

    if config.secrets.key.trim().is_empty() {
        bail!("Invalid config field 'secrets.key': must not be empty");
    }

    if config.database.url_key.trim().is_empty() {
        bail!("Invalid config field 'database.url_key': must not be empty");
    }
    if config.database.min_length == 0 || config.database.min_length > 128 {
        bail!("Invalid config field 'database.min_length': must be between 1 and 128");
    }
    if config.database.admin_user.trim().is_empty() {
        bail!("Invalid config field 'database.admin_user': must not be empty");
    }

    if config.cors.marker.trim().is_empty() {
        bail!("Invalid config field 'cors.marker': must not be empty");
    }
    if config.cors.max_matches == 0 {
        bail!("Invalid config field 'cors.max_matches': must be at least 1");
    }
    if !config.cors.project_root.exists() {
        bail!(
            "Invalid config field 'cors.project_root': directory not found: {}",
            config.cors.project_root.display()
        );
    }

    if config.probe.timeout_secs == 0 || config.probe.timeout_secs > 60 {
        bail!("Invalid config field 'probe.timeout_secs': must be between 1 and 60");
    }

    if config.host.max_mode_bits().is_none() {
        bail!(
            "Invalid config field 'host.max_mode': not an octal mode string (got {:?})",
            config.host.max_mode
        );
    }

    // A missing env file is a finding, not a config error. A present but
    // unreadable one means the audit cannot say anything useful about it.
    match File::open(&config.secrets.env_file) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            bail!(
                "env file {} exists but cannot be read: {}",
                config.secrets.env_file.display(),
                e
            );
        }
    }

    Ok(())
}
