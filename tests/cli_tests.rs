//! Tests driving the compiled `tracker` binary

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn tracker(config: &Path, args: &[&str]) -> Output {
    Command::cargo_bin("tracker")
        .unwrap()
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .unwrap()
}

fn write_batch(dir: &TempDir, lines: &[&str]) -> String {
    let path = dir.path().join("records.txt");
    fs::write(&path, lines.join("\n")).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_batch_json_lines_and_success_status() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    let file = write_batch(&dir, &["678,0h50m00s", "3456,Бег,1h"]);

    let output = tracker(&config, &["batch", "--file", &file, "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let kinds: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["kind"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, vec!["day", "training"]);
}

#[test]
fn test_batch_with_failed_line_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    let file = write_batch(&dir, &["678,0h50m00s", "100,Swimming,1h", "3456,Ходьба,3h00m00s"]);

    let output = tracker(&config, &["batch", "--file", &file, "--json"]);
    assert!(!output.status.success());

    // The failed line does not hide the other records
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("line 2"));
    assert!(stderr.contains("1 of 3 records failed"));
}

#[test]
fn test_training_report_on_stdout() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");

    let output = tracker(
        &config,
        &["training", "3456,Ходьба,3h00m00s", "--weight", "75", "--height", "1.75"],
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Тип тренировки: Ходьба\nДлительность: 3.00 ч.\nДистанция: 2.72 км.\nСкорость: 0.91 км/ч\nСожгли калорий: 102.06\n"
    );
}

#[test]
fn test_invalid_config_does_not_lock_out_commands() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");

    assert!(tracker(&config, &["config", "--init"]).status.success());
    let content = fs::read_to_string(&config).unwrap();
    fs::write(&config, content.replace("weight_kg = 75.0", "weight_kg = 0.0")).unwrap();

    // Stored weight is unusable, an explicit one is fine
    assert!(!tracker(&config, &["day", "678,0h50m00s"]).status.success());
    assert!(tracker(&config, &["day", "678,0h50m00s", "--weight", "70"]).status.success());

    // The file can be repaired in place
    assert!(tracker(&config, &["config", "--set-weight", "80"]).status.success());
    assert!(tracker(&config, &["day", "678,0h50m00s"]).status.success());
}

#[test]
fn test_init_replaces_unparsable_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "biometrics = [not toml").unwrap();

    assert!(!tracker(&config, &["day", "678,0h50m00s"]).status.success());
    assert!(tracker(&config, &["config", "--init"]).status.success());
    assert!(tracker(&config, &["day", "678,0h50m00s"]).status.success());
}
