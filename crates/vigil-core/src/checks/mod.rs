use crate::model::Finding;
use vigil_config::AuditConfig;

pub mod cors;
pub mod db_auth;
pub mod db_password;
pub mod debug_mode;
pub mod env_exposure;
pub mod host;
pub mod secret_key;

pub use cors::CorsCheck;
pub use db_auth::{AuthAttempt, AuthOutcome, CredentialProbe, DbAuthCheck, MySqlProbe, ProbeResult};
pub use db_password::DbPasswordCheck;
pub use debug_mode::DebugModeCheck;
pub use env_exposure::EnvExposureCheck;
pub use host::HostHygieneCheck;
pub use secret_key::SecretKeyCheck;

/// A self-contained inspection. Checks are stateless apart from their
/// collaborators (probes); all per-run input arrives through the config.
/// A check never fails the run: anything it cannot determine becomes a
/// WARN finding.
pub trait Check {
    /// Stable identifier used as `Finding::check`.
    fn key(&self) -> &'static str;

    fn run(&self, config: &AuditConfig) -> Vec<Finding>;
}
