use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("paperverify").expect("binary built")
}

/// Writes a one-claim paper and a results directory holding `mae_value`.
fn workspace(mae_value: f64) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("paper.md"),
        "# Results\n\nOur model reaches an MAE of 2.44 on the benchmark.\n",
    )
    .expect("write paper");
    let results = dir.path().join("results");
    fs::create_dir(&results).expect("create results");
    fs::write(
        results.join("metrics.json"),
        format!("{{\"benchmark\": {{\"mae\": {mae_value}}}}}"),
    )
    .expect("write results");
    dir
}

fn check(dir: &Path) -> Command {
    let mut command = cmd();
    command
        .current_dir(dir)
        .args(["check", "paper.md", "--results", "results"]);
    command
}

#[test]
fn exact_value_passes() {
    let dir = workspace(2.44);
    check(dir.path())
        .assert()
        .code(0)
        .stdout(contains("MATCH"))
        .stdout(contains("-> pass"));
}

#[test]
fn deviating_value_fails_with_exit_one() {
    let dir = workspace(2.60);
    check(dir.path())
        .assert()
        .code(1)
        .stdout(contains("MISMATCH"))
        .stdout(contains("metrics.json:benchmark.mae"))
        .stdout(contains("-> fail"));
}

#[test]
fn wider_tolerance_turns_mismatch_into_warning() {
    let dir = workspace(2.60);
    check(dir.path())
        .args(["--tolerance", "10"])
        .assert()
        .code(0)
        .stdout(contains("TOLERABLE"))
        .stdout(contains("-> warn"));
}

#[test]
fn quiet_mode_prints_only_mismatches_and_summary() {
    let dir = workspace(2.44);
    check(dir.path())
        .arg("--quiet")
        .assert()
        .code(0)
        .stdout(contains("MATCH\t").not())
        .stdout(contains("checked 1 claims"));
}

#[test]
fn missing_results_directory_is_fatal() {
    let dir = workspace(2.44);
    cmd()
        .current_dir(dir.path())
        .args(["check", "paper.md", "--results", "nowhere"])
        .assert()
        .code(2)
        .stderr(contains("store.results_missing"));
}

#[test]
fn unreadable_paper_is_fatal() {
    let dir = workspace(2.44);
    cmd()
        .current_dir(dir.path())
        .args(["check", "missing.tex", "--results", "results"])
        .assert()
        .code(2)
        .stderr(contains("cli.read_document"));
}

#[test]
fn invalid_tolerance_is_a_config_error() {
    let dir = workspace(2.44);
    check(dir.path())
        .arg("--tolerance=-1")
        .assert()
        .code(2)
        .stderr(contains("config error"));
}

#[test]
fn corrupt_result_file_is_reported_but_not_fatal() {
    let dir = workspace(2.44);
    fs::write(dir.path().join("results").join("broken.json"), "{not json").expect("write broken");
    check(dir.path())
        .assert()
        .code(0)
        .stdout(contains("load failure\tbroken.json\tcorrupt-data"));
}

#[test]
fn markdown_report_is_written() {
    let dir = workspace(2.60);
    check(dir.path())
        .args(["--report", "report.md"])
        .assert()
        .code(1);
    let report = fs::read_to_string(dir.path().join("report.md")).expect("report written");
    assert!(report.starts_with("# Paper Verification Report"));
    assert!(report.contains("MISMATCH"));
}

#[test]
fn json_report_carries_outcome_and_hash() {
    let dir = workspace(2.44);
    check(dir.path())
        .args(["-o", "report.json"])
        .assert()
        .code(0);
    let raw = fs::read_to_string(dir.path().join("report.json")).expect("report written");
    let report: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(report["outcome"], "pass");
    assert_eq!(report["tally"]["matched"], 1);
    assert!(report["report_hash"].as_str().is_some_and(|hash| !hash.is_empty()));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = workspace(2.60);
    fs::write(
        dir.path().join("verify.yaml"),
        "matching:\n  tolerance_pct: 10.0\n",
    )
    .expect("write config");
    check(dir.path())
        .args(["--config", "verify.yaml"])
        .assert()
        .code(0)
        .stdout(contains("TOLERABLE"));
}

#[test]
fn blended_ranking_loads_from_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("paper.md"), "The chronos MAE is 2.10 here.\n").expect("write paper");
    let results = dir.path().join("results");
    fs::create_dir(&results).expect("create results");
    fs::write(
        results.join("scores.json"),
        r#"{"lstm": {"rmse": 2.11}, "chronos": {"mae": 2.16}}"#,
    )
    .expect("write results");

    check(dir.path())
        .assert()
        .code(0)
        .stdout(contains("scores.json:lstm.rmse"));

    fs::write(
        dir.path().join("blended.yaml"),
        "matching:\n  ranking:\n    mode: blended\n    label_weight: 5.0\n",
    )
    .expect("write config");
    check(dir.path())
        .args(["--config", "blended.yaml"])
        .assert()
        .code(1)
        .stdout(contains("scores.json:chronos.mae"));
}

#[test]
fn excluded_files_are_not_loaded() {
    let dir = workspace(2.60);
    check(dir.path())
        .args(["--exclude", "metrics.json"])
        .assert()
        .code(0)
        .stdout(contains("1 unmatched"));
}

#[test]
fn claims_command_prints_json_lines() {
    let dir = workspace(2.44);
    let output = cmd()
        .current_dir(dir.path())
        .args(["claims", "paper.md"])
        .output()
        .expect("run claims");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let claim: serde_json::Value = serde_json::from_str(lines[0]).expect("claim json");
    assert_eq!(claim["raw_text"], "2.44");
    assert_eq!(claim["line_number"], 3);
    assert_eq!(claim["metric_hint"], "mae");
}

#[test]
fn values_command_lists_reference_values() {
    let dir = workspace(2.44);
    cmd()
        .current_dir(dir.path())
        .args(["values", "results"])
        .assert()
        .success()
        .stdout(contains("\"key\":\"benchmark.mae\""));
}

#[test]
fn version_long_is_json() {
    let output = cmd().args(["version", "--long"]).output().expect("run version");
    assert!(output.status.success());
    let info: serde_json::Value = serde_json::from_slice(&output.stdout).expect("version json");
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    assert!(info["formats"]
        .as_array()
        .is_some_and(|formats| formats.iter().any(|ext| ext == "json")));
}

#[test]
fn version_short_prints_name() {
    cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(contains("paperverify"));
}
