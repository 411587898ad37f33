use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Config pointing every probe at a closed port so tests stay fast and
/// deterministic without any live services.
fn write_config(dir: &Path) -> std::path::PathBuf {
    let config_path = dir.join("vigil.toml");
    let config = format!(
        r#"
[target]
base_url = "http://127.0.0.1:1"

[secrets]
env_file = {env_file:?}

[database]
port = 1

[cors]
project_root = {root:?}

[probe]
timeout_secs = 1
"#,
        env_file = dir.join(".env"),
        root = dir,
    );
    fs::write(&config_path, config).unwrap();
    config_path
}

#[test]
fn test_findings_do_not_affect_exit_code() {
    let dir = tempdir().unwrap();
    // Weak secret and short password: plenty of CRITICAL findings.
    fs::write(
        dir.path().join(".env"),
        "SECRET_KEY=change-this\nDATABASE_URL=mysql://u:pw@h/d\n",
    )
    .unwrap();
    let config_path = write_config(dir.path());

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    cmd.arg("--config")
        .arg(&config_path)
        .arg("audit")
        .assert()
        .success();
}

#[test]
fn test_missing_explicit_config_exits_2() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    cmd.arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("audit")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_invalid_project_root_exits_2() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".env"), "SECRET_KEY=x\n").unwrap();
    let config_path = write_config(dir.path());

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    cmd.arg("--config")
        .arg(&config_path)
        .arg("audit")
        .arg("--project-root")
        .arg("/definitely/not/a/real/path")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cors.project_root"));
}

#[test]
fn test_malformed_config_exits_2() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("vigil.toml");
    fs::write(&config_path, "[target\nbase_url = ").unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    cmd.arg("--config")
        .arg(&config_path)
        .arg("audit")
        .assert()
        .failure()
        .code(2);
}
