use crate::checks::Check;
use crate::envfile::EnvFile;
use crate::model::Finding;
use vigil_config::AuditConfig;

const DEBUG_KEY: &str = "DEBUG";

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Flags a deployment left in debug mode. Debug responses leak stack traces
/// and settings, so a truthy `DEBUG` in the env file is worth a warning even
/// though it is not a credential problem.
pub struct DebugModeCheck;

impl Check for DebugModeCheck {
    fn key(&self) -> &'static str {
        "debug_mode"
    }

    fn run(&self, config: &AuditConfig) -> Vec<Finding> {
        let enabled = EnvFile::load(&config.secrets.env_file)
            .ok()
            .and_then(|env| env.get(DEBUG_KEY).map(is_truthy))
            .unwrap_or(false);

        if enabled {
            vec![Finding::warn(self.key(), "debug mode is enabled")
                .with_detail(format!("{DEBUG_KEY} is set to a truthy value"))
                .with_remediation([
                    "Disable debug mode in production (DEBUG=false)",
                ])]
        } else {
            vec![Finding::ok(self.key(), "debug mode is not enabled")]
        }
    }
}
