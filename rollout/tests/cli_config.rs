//! CLI tests for `rollout save-config`, `show` and `check`.
//!
//! Spawns the rollout binary against temp directories and checks the written
//! `config.json` and exit codes.

use std::fs;
use std::process::Command;

use rollout::io::config::{LoopConfig, load_config};
use rollout::io::config_store::CONFIG_FILE_NAME;

const EXPERIMENT: &str = r#"current_dir = "/tmp/exp"
start_index = 0
end_index = 500
save_format = ["raw"]

[agent]
T = 300
image_height = 480
recreate_env = [false, 1]
"#;

#[test]
fn save_config_writes_json_and_overwrites() {
    let temp = tempfile::tempdir().expect("tempdir");
    let conf = temp.path().join("conf.toml");
    fs::write(&conf, EXPERIMENT).expect("write conf");
    let out_dir = temp.path().join("runs").join("0314");

    for _ in 0..2 {
        let status = Command::new(env!("CARGO_BIN_EXE_rollout"))
            .arg("save-config")
            .arg(&conf)
            .arg(&out_dir)
            .status()
            .expect("rollout save-config");
        assert!(status.success());
    }

    let written = fs::read_to_string(out_dir.join(CONFIG_FILE_NAME)).expect("read config.json");
    let json: serde_json::Value = serde_json::from_str(&written).expect("parse config.json");
    assert_eq!(json["agent"]["T"], 300);
    assert_eq!(json["agent"]["recreate_env"], serde_json::json!([false, 1]));
    assert_eq!(json["save_format"], serde_json::json!(["raw"]));
    assert!(written.starts_with("{\n    \"current_dir\""));
}

#[test]
fn show_prints_same_document() {
    let temp = tempfile::tempdir().expect("tempdir");
    let conf = temp.path().join("conf.toml");
    fs::write(&conf, EXPERIMENT).expect("write conf");

    let output = Command::new(env!("CARGO_BIN_EXE_rollout"))
        .arg("show")
        .arg(&conf)
        .output()
        .expect("rollout show");
    assert!(output.status.success());

    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).expect("parse stdout");
    assert_eq!(shown["end_index"], 500);
}

#[test]
fn save_config_fails_on_invalid_toml() {
    let temp = tempfile::tempdir().expect("tempdir");
    let conf = temp.path().join("conf.toml");
    fs::write(&conf, "agent = [").expect("write conf");

    let status = Command::new(env!("CARGO_BIN_EXE_rollout"))
        .arg("save-config")
        .arg(&conf)
        .arg(temp.path().join("out"))
        .status()
        .expect("rollout save-config");

    assert_eq!(status.code(), Some(1));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn init_then_check_round_trips_default() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("loop.toml");

    let status = Command::new(env!("CARGO_BIN_EXE_rollout"))
        .arg("init")
        .arg(&path)
        .status()
        .expect("rollout init");
    assert!(status.success());
    assert_eq!(load_config(&path).expect("load"), LoopConfig::default());

    let output = Command::new(env!("CARGO_BIN_EXE_rollout"))
        .arg("check")
        .arg(&path)
        .output()
        .expect("rollout check");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "horizon=300 trials=0..500"
    );
}

#[test]
fn check_rejects_missing_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let status = Command::new(env!("CARGO_BIN_EXE_rollout"))
        .arg("check")
        .arg(temp.path().join("absent.toml"))
        .status()
        .expect("rollout check");
    assert_eq!(status.code(), Some(1));
}
