use crate::checks::Check;
use crate::model::Finding;
use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};
use sqlx::{ConnectOptions, Connection};
use std::time::Duration;
use tracing::{debug, warn};
use vigil_config::AuditConfig;

/// One credential candidate, tried in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAttempt {
    Password(String),
    Empty,
}

impl AuthAttempt {
    fn password(&self) -> Option<&str> {
        match self {
            AuthAttempt::Password(pw) => Some(pw.as_str()),
            AuthAttempt::Empty => None,
        }
    }
}

/// Result of a single authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Authenticated,
    Denied,
    Unreachable(String),
}

/// Outcome of the ordered attempt list, early-exit on first success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Succeeded(AuthAttempt),
    AllDenied,
    Unreachable(String),
}

/// Seam between the attempt ordering logic and the live database client, so
/// the check is testable without a running server.
pub trait CredentialProbe {
    fn try_authenticate(
        &self,
        host: &str,
        port: u16,
        user: &str,
        password: Option<&str>,
        timeout: Duration,
    ) -> ProbeResult;
}

/// Live MySQL probe. Each attempt opens one connection and closes it
/// immediately; no session outlives the attempt.
pub struct MySqlProbe {
    rt: tokio::runtime::Runtime,
}

impl MySqlProbe {
    pub fn new() -> std::io::Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { rt })
    }
}

impl CredentialProbe for MySqlProbe {
    fn try_authenticate(
        &self,
        host: &str,
        port: u16,
        user: &str,
        password: Option<&str>,
        timeout: Duration,
    ) -> ProbeResult {
        // Plaintext on purpose: the probe tests credentials, not transport.
        let mut opts = MySqlConnectOptions::new()
            .host(host)
            .port(port)
            .username(user)
            .ssl_mode(MySqlSslMode::Disabled);
        if let Some(pw) = password {
            opts = opts.password(pw);
        }
        // Drop sqlx's own statement logging; probe attempts are expected to
        // fail and would otherwise be noisy.
        let opts = opts.disable_statement_logging();

        self.rt.block_on(async {
            match tokio::time::timeout(timeout, sqlx::MySqlConnection::connect_with(&opts)).await {
                Err(_) => ProbeResult::Unreachable(format!(
                    "connection attempt timed out after {}s",
                    timeout.as_secs()
                )),
                Ok(Ok(conn)) => {
                    if let Err(e) = conn.close().await {
                        debug!(error = %e, "probe connection close failed");
                    }
                    ProbeResult::Authenticated
                }
                // The server answered and rejected the credentials.
                Ok(Err(sqlx::Error::Database(_))) => ProbeResult::Denied,
                Ok(Err(e)) => ProbeResult::Unreachable(e.to_string()),
            }
        })
    }
}

/// Tries the configured administrative account with well-known weak
/// passwords, then no password, stopping at the first success.
pub struct DbAuthCheck<P: CredentialProbe> {
    probe: P,
}

impl<P: CredentialProbe> DbAuthCheck<P> {
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    fn evaluate(&self, config: &AuditConfig) -> AuthOutcome {
        let db = &config.database;
        let timeout = config.probe.timeout();

        let mut attempts: Vec<AuthAttempt> = db
            .admin_passwords
            .iter()
            .cloned()
            .map(AuthAttempt::Password)
            .collect();
        attempts.push(AuthAttempt::Empty);

        for attempt in attempts {
            debug!(user = %db.admin_user, empty = attempt.password().is_none(), "admin auth attempt");
            match self.probe.try_authenticate(
                &db.host,
                db.port,
                &db.admin_user,
                attempt.password(),
                timeout,
            ) {
                ProbeResult::Authenticated => return AuthOutcome::Succeeded(attempt),
                ProbeResult::Denied => continue,
                ProbeResult::Unreachable(reason) => {
                    warn!(host = %db.host, port = db.port, %reason, "database unreachable");
                    return AuthOutcome::Unreachable(reason);
                }
            }
        }

        AuthOutcome::AllDenied
    }
}

impl DbAuthCheck<MySqlProbe> {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self::with_probe(MySqlProbe::new()?))
    }
}

impl<P: CredentialProbe> Check for DbAuthCheck<P> {
    fn key(&self) -> &'static str {
        "db_auth"
    }

    fn run(&self, config: &AuditConfig) -> Vec<Finding> {
        let user = &config.database.admin_user;
        match self.evaluate(config) {
            AuthOutcome::Succeeded(AuthAttempt::Password(_)) => vec![Finding::critical(
                self.key(),
                format!("{user} authenticates with a well-known weak password"),
            )
            .with_remediation([
                "Change the administrative password immediately",
                "Audit recent connections for unauthorized access",
            ])],
            AuthOutcome::Succeeded(AuthAttempt::Empty) => vec![Finding::critical(
                self.key(),
                format!("{user} authenticates with no password at all"),
            )
            .with_remediation([
                "Set a password for the administrative account immediately",
            ])],
            AuthOutcome::AllDenied => vec![Finding::ok(
                self.key(),
                format!("{user} password appears non-trivial (all weak attempts denied)"),
            )],
            AuthOutcome::Unreachable(reason) => vec![Finding::warn(
                self.key(),
                "admin credential strength undeterminable: database not reachable",
            )
            .with_detail(reason)
            .with_remediation([
                "Re-run the audit from a host that can reach the database",
            ])],
        }
    }
}
