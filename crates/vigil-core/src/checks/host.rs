use crate::checks::Check;
use crate::model::Finding;
use std::io::ErrorKind;
use std::path::Path;
use vigil_config::AuditConfig;

const DEFAULT_MAX_MODE: u32 = 0o600;

/// Two independent host-level observations: whether the process runs with
/// superuser privileges, and whether the secrets file is locked down.
pub struct HostHygieneCheck;

impl Check for HostHygieneCheck {
    fn key(&self) -> &'static str {
        "host_hygiene"
    }

    fn run(&self, config: &AuditConfig) -> Vec<Finding> {
        vec![
            privilege_finding(self.key()),
            permission_finding(
                self.key(),
                &config.secrets.env_file,
                config.host.max_mode_bits().unwrap_or(DEFAULT_MAX_MODE),
            ),
        ]
    }
}

#[cfg(unix)]
fn privilege_finding(check: &str) -> Finding {
    let euid = unsafe { libc::geteuid() };
    if euid == 0 {
        Finding::warn(check, "process is running as root")
            .with_remediation([
                "Run the application under a dedicated unprivileged account",
            ])
    } else {
        Finding::ok(check, "process is not running as root")
            .with_detail(format!("effective uid: {euid}"))
    }
}

#[cfg(not(unix))]
fn privilege_finding(check: &str) -> Finding {
    Finding::warn(check, "process privilege undeterminable on this platform")
        .with_remediation(["Verify manually that the service runs unprivileged"])
}

#[cfg(unix)]
fn permission_finding(check: &str, env_file: &Path, max_mode: u32) -> Finding {
    use std::os::unix::fs::PermissionsExt;

    let metadata = match std::fs::metadata(env_file) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Finding::critical(
                check,
                format!("secrets file {} is missing", env_file.display()),
            )
            .with_remediation([format!(
                "Create {} with the deployment's secrets, mode 0600",
                env_file.display()
            )]);
        }
        Err(e) => {
            return Finding::warn(
                check,
                format!("could not stat secrets file {}", env_file.display()),
            )
            .with_detail(e.to_string());
        }
    };

    let mode = metadata.permissions().mode() & 0o777;
    if mode & !max_mode != 0 {
        Finding::warn(
            check,
            format!("secrets file {} is too permissive", env_file.display()),
        )
        .with_detail(format!("mode {mode:04o}, expected at most {max_mode:04o}"))
        .with_remediation([format!(
            "chmod {max_mode:o} {} (owner read/write only)",
            env_file.display()
        )])
    } else {
        Finding::ok(
            check,
            format!("secrets file {} permissions look sane", env_file.display()),
        )
        .with_detail(format!("mode {mode:04o}"))
    }
}

#[cfg(not(unix))]
fn permission_finding(check: &str, env_file: &Path, _max_mode: u32) -> Finding {
    match std::fs::metadata(env_file) {
        Ok(_) => Finding::warn(
            check,
            "secrets file permissions undeterminable on this platform",
        ),
        Err(e) if e.kind() == ErrorKind::NotFound => Finding::critical(
            check,
            format!("secrets file {} is missing", env_file.display()),
        ),
        Err(e) => Finding::warn(
            check,
            format!("could not stat secrets file {}", env_file.display()),
        )
        .with_detail(e.to_string()),
    }
}
