use crate::checks::{
    Check, CorsCheck, DbAuthCheck, DbPasswordCheck, DebugModeCheck, EnvExposureCheck,
    HostHygieneCheck, SecretKeyCheck,
};
use crate::model::{Finding, Report};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};
use vigil_config::AuditConfig;

/// The default registry, in fixed execution order. Report order is this
/// order; nothing is sorted by severity at collection time.
pub fn default_checks() -> std::io::Result<Vec<Box<dyn Check>>> {
    Ok(vec![
        Box::new(SecretKeyCheck),
        Box::new(DbPasswordCheck),
        Box::new(EnvExposureCheck),
        Box::new(CorsCheck),
        Box::new(DbAuthCheck::new()?),
        Box::new(HostHygieneCheck),
        Box::new(DebugModeCheck),
    ])
}

/// Run every check in order, strictly sequentially. A failure inside one
/// check never prevents the remaining checks from running: panics are
/// converted into a WARN finding for that check.
pub fn run_audit(config: &AuditConfig, checks: &[Box<dyn Check>]) -> Report {
    let mut findings = Vec::new();

    for check in checks {
        debug!(check = check.key(), "running check");
        match panic::catch_unwind(AssertUnwindSafe(|| check.run(config))) {
            Ok(results) => findings.extend(results),
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                warn!(check = check.key(), %reason, "check panicked");
                findings.push(
                    Finding::warn(check.key(), format!("check internal error: {reason}"))
                        .with_remediation(["Re-run with RUST_LOG=debug and report the failure"]),
                );
            }
        }
    }

    Report { findings }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
