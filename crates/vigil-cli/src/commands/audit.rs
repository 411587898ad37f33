use crate::formatters::{Format, Formatter, JsonFormatter, Summary, TextFormatter};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use vigil_config::{load_config, validate_config};

pub fn audit(
    config_path: Option<&Path>,
    env_file: Option<&Path>,
    url: Option<&str>,
    project_root: Option<&Path>,
    format: &str,
    quiet: bool,
) -> Result<()> {
    // 1. Load config, then apply CLI overrides
    let mut config = load_config(config_path)?;

    if let Some(path) = env_file {
        config.secrets.env_file = path.to_path_buf();
    }
    if let Some(url) = url {
        config.target.base_url = url.to_string();
    }
    if let Some(root) = project_root {
        config.cors.project_root = root.to_path_buf();
    }

    // 2. Fail fast on configuration the checks cannot work with
    validate_config(&config).context("invalid configuration")?;

    // 3. Run the registry
    let checks = vigil_core::default_checks().context("failed to set up checks")?;
    let start = Instant::now();
    let report = vigil_core::run_audit(&config, &checks);
    let summary = Summary::new(checks.len(), &report, start.elapsed());

    // 4. Render
    let formatter: Box<dyn Formatter> = match Format::from(format) {
        Format::Json => Box::new(JsonFormatter),
        Format::Text => Box::new(TextFormatter { quiet }),
    };
    formatter.print(&report, &summary)
}
