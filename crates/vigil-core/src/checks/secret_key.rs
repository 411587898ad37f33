use crate::checks::Check;
use crate::envfile::EnvFile;
use crate::model::{truncate_value, Finding};
use tracing::debug;
use vigil_config::AuditConfig;

const SHOWN_CHARS: usize = 30;

/// Flags missing or placeholder application secrets in the env file.
pub struct SecretKeyCheck;

impl Check for SecretKeyCheck {
    fn key(&self) -> &'static str {
        "secret_key"
    }

    fn run(&self, config: &AuditConfig) -> Vec<Finding> {
        let key = &config.secrets.key;
        let env_file = &config.secrets.env_file;

        let env = match EnvFile::load(env_file) {
            Ok(env) => env,
            Err(e) => {
                debug!(path = %env_file.display(), error = %e, "env file not readable");
                return vec![missing_finding(self.key(), key, &env_file.display().to_string())];
            }
        };

        let value = match env.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => {
                return vec![missing_finding(self.key(), key, &env_file.display().to_string())];
            }
        };

        let lowered = value.to_lowercase();
        let weak_hit = config
            .secrets
            .weak_values
            .iter()
            .find(|w| lowered.contains(&w.to_lowercase()));

        if let Some(weak) = weak_hit {
            let line = env.raw_line(key).unwrap_or_default();
            return vec![Finding::critical(
                self.key(),
                format!("{key} is a weak or placeholder value"),
            )
            .with_detail(format!("{} (matched weak value {:?})", line, weak))
            .with_remediation([
                "Regenerate the secret with a cryptographically secure random generator"
                    .to_string(),
                "Use at least 32 random bytes, hex-encoded (e.g. `openssl rand -hex 32`)"
                    .to_string(),
                format!("Set the new value for {key} in {}", env_file.display()),
            ])];
        }

        vec![
            Finding::ok(self.key(), format!("{key} appears to be set to a non-default value"))
                .with_detail(format!("{key}={}", truncate_value(value, SHOWN_CHARS))),
        ]
    }
}

fn missing_finding(check: &str, key: &str, env_file: &str) -> Finding {
    Finding::critical(check, format!("{key} is not set in {env_file}")).with_remediation([
        "Generate a long random value (e.g. `openssl rand -hex 32`)".to_string(),
        format!("Add {key}=<generated value> to {env_file}"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;
    use std::io::Write;

    fn config_with_env(content: &str) -> (tempfile::TempDir, AuditConfig) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let mut config = AuditConfig::default();
        config.secrets.env_file = path;
        (dir, config)
    }

    #[test]
    fn test_missing_key_is_critical_with_generation_advice() {
        let (_dir, config) = config_with_env("OTHER=1\n");
        let findings = SecretKeyCheck.run(&config);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert!(findings[0]
            .remediation
            .iter()
            .any(|s| s.to_lowercase().contains("generate")));
    }

    #[test]
    fn test_missing_file_behaves_like_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AuditConfig::default();
        config.secrets.env_file = dir.path().join("absent.env");
        let findings = SecretKeyCheck.run(&config);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
    }

    #[test]
    fn test_weak_value_is_critical_and_shows_line() {
        let (_dir, config) = config_with_env("SECRET_KEY=change-this-now\n");
        let findings = SecretKeyCheck.run(&config);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        let detail = findings[0].detail.as_deref().unwrap();
        assert!(detail.contains("SECRET_KEY=change-this-now"));
    }

    #[test]
    fn test_weak_match_is_case_insensitive() {
        let (_dir, config) = config_with_env("SECRET_KEY=MY-EXAMPLE-KEY\n");
        let findings = SecretKeyCheck.run(&config);
        assert_eq!(findings[0].severity, Severity::Critical);
    }

    #[test]
    fn test_strong_value_is_ok_and_truncated() {
        let value = "f".repeat(64);
        let (_dir, config) = config_with_env(&format!("SECRET_KEY={value}\n"));
        let findings = SecretKeyCheck.run(&config);
        assert_eq!(findings[0].severity, Severity::Ok);
        let detail = findings[0].detail.as_deref().unwrap();
        assert!(detail.ends_with('…'));
        assert!(!detail.contains(&value));
    }

    #[test]
    fn test_first_match_wins_over_later_strong_value() {
        let (_dir, config) =
            config_with_env("SECRET_KEY=123456\nSECRET_KEY=fb1b1fcb6d39c0e95a1e7a9c\n");
        let findings = SecretKeyCheck.run(&config);
        assert_eq!(findings[0].severity, Severity::Critical);
    }
}
