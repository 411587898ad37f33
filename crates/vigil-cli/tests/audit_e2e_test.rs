#![cfg(unix)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Scenario {
    _dir: TempDir,
    config_path: PathBuf,
    // Keeps the mock server and its runtime alive for the test duration.
    _rt: tokio::runtime::Runtime,
    _server: MockServer,
}

/// The full scenario: weak SECRET_KEY, 7-char db password, /.env correctly
/// blocked with 403, no CORS configuration, unreachable database, 0600 env
/// file.
fn scenario() -> Scenario {
    let dir = TempDir::new().unwrap();

    let env_path = dir.path().join(".env");
    fs::write(
        &env_path,
        "SECRET_KEY=change-this-now\nDATABASE_URL=mysql://u:pw12345@h/d\n",
    )
    .unwrap();
    fs::set_permissions(&env_path, fs::Permissions::from_mode(0o600)).unwrap();

    let project_root = dir.path().join("app");
    fs::create_dir(&project_root).unwrap();
    fs::write(project_root.join("main.py"), "app = FastAPI()\n").unwrap();

    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/.env"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server),
    );

    let config_path = dir.path().join("vigil.toml");
    let config = format!(
        r#"
[target]
base_url = "{url}"

[secrets]
env_file = {env_file:?}

[database]
port = 1

[cors]
project_root = {root:?}

[probe]
timeout_secs = 1
"#,
        url = server.uri(),
        env_file = env_path,
        root = project_root,
    );
    fs::write(&config_path, config).unwrap();

    Scenario {
        _dir: dir,
        config_path,
        _rt: rt,
        _server: server,
    }
}

fn run_json(config_path: &Path) -> Value {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    let output = cmd
        .arg("--config")
        .arg(config_path)
        .arg("audit")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .clone();
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_end_to_end_findings_in_registry_order() {
    let scenario = scenario();
    let report = run_json(&scenario.config_path);

    assert_eq!(report["schemaVersion"], "vigil-v1");

    let findings = report["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 8);

    let brief: Vec<(&str, &str)> = findings
        .iter()
        .map(|f| {
            (
                f["check"].as_str().unwrap(),
                f["severity"].as_str().unwrap(),
            )
        })
        .collect();

    assert_eq!(brief[0], ("secret_key", "CRITICAL"));
    assert_eq!(brief[1], ("db_password", "CRITICAL"));
    assert_eq!(brief[2], ("env_exposure", "OK"));
    assert_eq!(brief[3], ("cors", "WARN"));
    assert_eq!(brief[4], ("db_auth", "WARN"));
    // Privilege depends on who runs the tests.
    assert_eq!(brief[5].0, "host_hygiene");
    let expected_privilege = if unsafe { libc::geteuid() } == 0 {
        "WARN"
    } else {
        "OK"
    };
    assert_eq!(brief[5].1, expected_privilege);
    assert_eq!(brief[6], ("host_hygiene", "OK"));
    assert_eq!(brief[7], ("debug_mode", "OK"));

    // Spot-check the interesting content
    assert!(findings[1]["message"].as_str().unwrap().contains("too short"));
    assert!(findings[2]["message"].as_str().unwrap().contains("403"));
    assert!(findings[4]["message"]
        .as_str()
        .unwrap()
        .contains("undeterminable"));
}

#[test]
fn test_two_runs_yield_identical_findings() {
    let scenario = scenario();
    let first = run_json(&scenario.config_path);
    let second = run_json(&scenario.config_path);
    assert_eq!(first["findings"], second["findings"]);
}

#[test]
fn test_text_output_has_priority_summary() {
    let scenario = scenario();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    let assert = cmd
        .arg("--config")
        .arg(&scenario.config_path)
        .arg("--no-color")
        .arg("audit")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary_pos = stdout.find("Priority summary").unwrap();
    // Findings come first, in execution order; the summary groups CRITICAL
    // before WARN after them.
    let secret_pos = stdout.find("secret_key").unwrap();
    assert!(secret_pos < summary_pos);
    let critical_pos = stdout[summary_pos..].find("CRITICAL").unwrap();
    let warn_pos = stdout[summary_pos..].find("WARN").unwrap();
    assert!(critical_pos < warn_pos);
    assert!(stdout.contains("no action needed"));
}

#[test]
fn test_quiet_suppresses_findings_but_keeps_summary() {
    let scenario = scenario();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    let assert = cmd
        .arg("--config")
        .arg(&scenario.config_path)
        .arg("--no-color")
        .arg("--quiet")
        .arg("audit")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("Priority summary"));
    assert!(!stdout.contains("-> "));
}
