// Configuration file handling through the binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn stressgauge(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stressgauge"))
        .args(args)
        .current_dir(dir)
        .env("STRESSGAUGE_CONFIG", dir.join("no-such-config.toml"))
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute stressgauge")
}

fn total_analyzed(output: &Output) -> u64 {
    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    record["total_analyzed"].as_u64().unwrap()
}

fn write_posts(dir: &Path) {
    fs::write(
        dir.join("frank.json"),
        r#"[
            {"id": "1", "text": "deadline"},
            {"id": "2", "text": "busy"},
            {"id": "3", "text": "tired"},
            {"id": "4", "text": "calm"}
        ]"#,
    )
    .unwrap();
}

const CONFIG: &str = r#"
[base]
console-level = "error"

[analysis]
max-tweets = 3
lookback-days = 0

[strict]
max-tweets = 1
"#;

#[test]
fn test_limits_from_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    write_posts(dir.path());
    fs::write(dir.path().join("limits.toml"), CONFIG).unwrap();

    let output = stressgauge(&["--config-file", "limits.toml", "-f", "json", "frank.json"], dir.path());
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(total_analyzed(&output), 3);
}

#[test]
fn test_named_section_overrides_analysis() {
    let dir = TempDir::new().unwrap();
    write_posts(dir.path());
    fs::write(dir.path().join("limits.toml"), CONFIG).unwrap();

    let output = stressgauge(
        &["--config-file", "limits.toml", "--config-name", "strict", "-f", "json", "frank.json"],
        dir.path(),
    );
    assert!(output.status.success());
    assert_eq!(total_analyzed(&output), 1);
}

#[test]
fn test_cli_flag_beats_config() {
    let dir = TempDir::new().unwrap();
    write_posts(dir.path());
    fs::write(dir.path().join("limits.toml"), CONFIG).unwrap();

    let output = stressgauge(
        &["--config-file", "limits.toml", "--max-items", "2", "-f", "json", "frank.json"],
        dir.path(),
    );
    assert!(output.status.success());
    assert_eq!(total_analyzed(&output), 2);
}

#[test]
fn test_config_discovered_from_environment() {
    let dir = TempDir::new().unwrap();
    write_posts(dir.path());
    fs::write(dir.path().join("env.toml"), CONFIG).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_stressgauge"))
        .args(["-f", "json", "frank.json"])
        .current_dir(dir.path())
        .env("STRESSGAUGE_CONFIG", dir.path().join("env.toml"))
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .output()
        .expect("Failed to execute stressgauge");
    assert!(output.status.success());
    assert_eq!(total_analyzed(&output), 3);
}

#[test]
fn test_lookback_window_drops_old_items() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gina.json"),
        r#"[
            {"id": "old", "text": "panic", "created_at": "2001-01-01T00:00:00Z"},
            {"id": "undated", "text": "calm"}
        ]"#,
    )
    .unwrap();
    fs::write(dir.path().join("window.toml"), "[analysis]\nlookback-days = 30\n").unwrap();

    let output = stressgauge(&["-q", "--config-file", "window.toml", "-f", "json", "gina.json"], dir.path());
    assert!(output.status.success());
    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["total_analyzed"], 1);
    assert_eq!(record["stress_level"], 0.0);
}

#[test]
fn test_invalid_config_values_are_errors() {
    let dir = TempDir::new().unwrap();
    write_posts(dir.path());

    fs::write(dir.path().join("zero.toml"), "[analysis]\nmax-tweets = 0\n").unwrap();
    let output = stressgauge(&["-q", "--config-file", "zero.toml", "frank.json"], dir.path());
    assert_eq!(output.status.code(), Some(1));

    fs::write(dir.path().join("broken.toml"), "[analysis\n").unwrap();
    let output = stressgauge(&["-q", "--config-file", "broken.toml", "frank.json"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse config file"));
}

#[test]
fn test_export_config_writes_effective_values() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("limits.toml"), CONFIG).unwrap();

    let output = stressgauge(
        &["--config-file", "limits.toml", "--export-config", "exported.toml"],
        dir.path(),
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Configuration exported to: exported.toml"));

    let exported: toml::Table = toml::from_str(&fs::read_to_string(dir.path().join("exported.toml")).unwrap()).unwrap();
    assert_eq!(exported["analysis"]["max-tweets"].as_integer(), Some(3));
    assert_eq!(exported["analysis"]["lookback-days"].as_integer(), Some(0));
    assert_eq!(exported["analysis"]["max-reddit-posts"].as_integer(), Some(100));
    assert_eq!(exported["base"]["console-level"].as_str(), Some("error"));
}
