use anyhow::{bail, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use vigil_config::DEFAULT_CONFIG_PATH;

const DEFAULT_CONFIG: &str = r##"# vigil configuration
# Every key is optional; the values below are the defaults.

[target]
# Base URL of the deployment under audit.
base_url = "http://127.0.0.1:8000"
# Path probed for public exposure.
sensitive_path = "/.env"

[secrets]
# Env file in KEY=VALUE line format.
env_file = ".env"
# Variable holding the application signing secret.
key = "SECRET_KEY"
# Substrings indicating a placeholder/default secret (case-insensitive).
weak_values = ["your-secret-key", "change-this", "example", "123456", "secret"]

[database]
# Variable holding the connection string.
url_key = "DATABASE_URL"
# Substrings indicating a guessable password (case-insensitive).
weak_substrings = ["password", "123", "admin", "root"]
# Passwords shorter than this are flagged outright.
min_length = 8
host = "127.0.0.1"
port = 3306
# Administrative account probed for trivial credentials.
admin_user = "root"
# Well-known weak passwords tried in order before the empty password.
admin_passwords = ["root"]

[cors]
# Subtree searched for CORS configuration text.
project_root = "."
# Marker token located by plain text search.
marker = "allow_origins"
# Stop collecting after this many matching lines.
max_matches = 5

[probe]
# Bound on the HTTP probe and on each database authentication attempt.
timeout_secs = 3

[host]
# Most permissive acceptable mode for the env file (octal).
max_mode = "0600"
"##;

pub fn init(force: bool) -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            DEFAULT_CONFIG_PATH
        );
    }

    fs::write(path, DEFAULT_CONFIG)?;
    println!(
        "{} wrote {}",
        "OK".green().bold(),
        DEFAULT_CONFIG_PATH.bold()
    );
    Ok(())
}
