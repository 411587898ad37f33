use crate::checks::Check;
use crate::model::Finding;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use vigil_config::AuditConfig;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to create tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

/// Minimal status-only HTTP probe. Sync wrapper over an owned runtime so the
/// strictly sequential engine stays synchronous.
pub struct HttpProbe {
    rt: tokio::runtime::Runtime,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProbeError::Client)?;
        Ok(Self {
            rt,
            client,
            timeout,
        })
    }

    /// GET the URL and report the status code. The body is never read.
    pub fn status(&self, url: &str) -> Result<u16, ProbeError> {
        self.rt.block_on(async {
            let resp = self
                .client
                .get(url)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(ProbeError::Request)?;
            Ok(resp.status().as_u16())
        })
    }
}

/// Probes whether the secrets file is served publicly by the deployment.
/// Unreachability of the target degrades to WARN; it never aborts the run.
pub struct EnvExposureCheck;

impl Check for EnvExposureCheck {
    fn key(&self) -> &'static str {
        "env_exposure"
    }

    fn run(&self, config: &AuditConfig) -> Vec<Finding> {
        let url = format!(
            "{}{}",
            config.target.base_url.trim_end_matches('/'),
            config.target.sensitive_path
        );

        let probe = match HttpProbe::new(config.probe.timeout()) {
            Ok(probe) => probe,
            Err(e) => {
                warn!(error = %e, "could not construct http probe");
                return vec![undeterminable(self.key(), &url, &e.to_string())];
            }
        };

        debug!(url = %url, "probing sensitive file exposure");

        match probe.status(&url) {
            Ok(200) => vec![Finding::critical(
                self.key(),
                format!("{} is publicly accessible (HTTP 200)", config.target.sensitive_path),
            )
            .with_detail(format!("GET {url} returned 200"))
            .with_remediation([
                "Add a reverse-proxy deny rule for dotfiles (e.g. `location ~ /\\. { deny all; }` in nginx)",
                "Ensure the file is excluded from version control and from the deployed document root",
                "Rotate every secret the file contains; treat them as exposed",
            ])],
            Ok(status @ (404 | 403)) => vec![Finding::ok(
                self.key(),
                format!(
                    "{} is correctly blocked (HTTP {status})",
                    config.target.sensitive_path
                ),
            )],
            Ok(status) => vec![undeterminable(
                self.key(),
                &url,
                &format!("unexpected status {status}"),
            )],
            Err(e) => vec![undeterminable(self.key(), &url, &e.to_string())],
        }
    }
}

fn undeterminable(check: &str, url: &str, reason: &str) -> Finding {
    Finding::warn(
        check,
        "exposure undeterminable: service not reachable or unexpected status",
    )
    .with_detail(format!("GET {url}: {reason}"))
    .with_remediation(["Verify manually once the service is reachable"])
}
