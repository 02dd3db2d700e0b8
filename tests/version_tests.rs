use std::path::PathBuf;
use std::process::Command;

fn get_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push("clawpulse");
    path
}

#[test]
fn test_version_flag() {
    let output = Command::new(get_binary_path())
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(), "Command should exit successfully");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("clawpulse {}", env!("CARGO_PKG_VERSION")),
        "Output should be in format 'clawpulse X.Y.Z'"
    );
}

#[test]
fn test_version_subcommand() {
    let output = Command::new(get_binary_path())
        .arg("version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(&format!("ClawPulse v{}", env!("CARGO_PKG_VERSION"))),
        "Unexpected output: {}",
        stdout
    );
}

#[test]
fn test_fleet_json_reads_data_root() {
    let tmp = tempfile::tempdir().unwrap();
    let sessions = tmp.path().join("main").join("sessions");
    std::fs::create_dir_all(&sessions).unwrap();
    std::fs::write(
        sessions.join("sessions.json"),
        r#"{"a": {"updatedAt": 1000, "totalTokens": 42}}"#,
    )
    .unwrap();

    let output = Command::new(get_binary_path())
        .args(["fleet", "--json"])
        .env("CLAWPULSE_DATA_ROOT", tmp.path())
        .env_remove("CLAWPULSE_REMOTE_URL")
        .env_remove("CLAWPULSE_REMOTE_KEY")
        .current_dir(tmp.path())
        .output()
        .expect("Failed to execute binary");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Stderr: {}", stderr);

    let fleet: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(fleet[0]["directory"], "main");
    assert_eq!(fleet[0]["displayName"], "Main");
    assert_eq!(fleet[0]["totalTokens"], 42);
    assert_eq!(fleet[0]["status"], "offline");
}

#[test]
fn test_fleet_missing_data_root_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let output = Command::new(get_binary_path())
        .arg("fleet")
        .env("CLAWPULSE_DATA_ROOT", tmp.path().join("nope"))
        .current_dir(tmp.path())
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read agent data root"), "Stderr: {}", stderr);
}

#[test]
fn test_malformed_local_config_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join(".clawpulse")).unwrap();
    std::fs::write(
        tmp.path().join(".clawpulse").join("config.json"),
        r#"{"remote_url":"https://x.supabase.co","remote_key":"k","port":"oops"}"#,
    )
    .unwrap();

    let output = Command::new(get_binary_path())
        .arg("fleet")
        .env("CLAWPULSE_DATA_ROOT", tmp.path())
        .current_dir(tmp.path())
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load local config"), "Stderr: {}", stderr);
    assert!(stderr.contains("Failed to parse"), "Stderr: {}", stderr);
}
