mod common;

use std::fs;

use assert_cmd::Command;
use common::{TestWorkspace, fixture_path};
use encoding_rs::SHIFT_JIS;
use predicates::str::contains;

fn column_roles() -> Command {
    Command::cargo_bin("column-roles").expect("binary exists")
}

fn json_output(args: &[&str]) -> serde_json::Value {
    let output = column_roles()
        .args(args)
        .output()
        .expect("run column-roles");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

#[test]
fn classify_prints_role_table() {
    let survey = fixture_path("survey.csv");
    column_roles()
        .args(["classify", "-i", survey.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("role"))
        .stdout(contains("クラス"))
        .stdout(contains("90.18"))
        .stdout(contains("理由"));
}

#[test]
fn classify_json_reports_mapping_and_confidence() {
    let survey = fixture_path("survey.csv");
    let value = json_output(&[
        "classify",
        "-i",
        survey.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(value["mapping"]["class"], 2);
    assert_eq!(value["mapping"]["name"], 3);
    assert_eq!(value["mapping"]["answer"], 4);
    assert_eq!(value["mapping"]["reason"], 5);
    assert!(value["confidence"]["reason"].as_f64().unwrap() >= 75.0);
}

#[test]
fn config_file_and_strategy_flag_are_applied() {
    let survey = fixture_path("survey.csv");
    let config = fixture_path("thresholds.yml");
    let value = json_output(&[
        "classify",
        "-i",
        survey.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--strategy",
        "weighted-sum",
        "--format",
        "json",
    ]);
    assert_eq!(value["mapping"]["class"], 2);
    assert_eq!(value["mapping"]["answer"], 4);
}

#[test]
fn explain_yaml_lists_score_cards() {
    let survey = fixture_path("survey.csv");
    column_roles()
        .args(["explain", "-i", survey.to_str().unwrap(), "--format", "yaml"])
        .assert()
        .success()
        .stdout(contains("ensemble"))
        .stdout(contains("linguistic"))
        .stdout(contains("mapping"));
}

#[test]
fn explain_table_marks_assigned_pairs() {
    let survey = fixture_path("survey.csv");
    let output = column_roles()
        .args(["explain", "-i", survey.to_str().unwrap()])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    // header, separator, six columns with four roles each
    assert_eq!(stdout.lines().count(), 2 + 6 * 4);
    let marked = stdout.lines().filter(|line| line.ends_with('*')).count();
    assert_eq!(marked, 4);
}

#[test]
fn features_prints_vector_per_column() {
    let survey = fixture_path("survey.csv");
    let value = json_output(&["features", "-i", survey.to_str().unwrap(), "--format", "json"]);
    let columns = value.as_array().expect("array of columns");
    assert_eq!(columns.len(), 6);
    assert_eq!(columns[2]["header"], "クラス");
    assert_eq!(columns[2]["features"]["class_pattern_score"], 1.0);
    assert_eq!(columns[3]["sample_count"], 5);
}

#[test]
fn reads_stdin_when_input_is_dash() {
    let contents = fs::read_to_string(fixture_path("survey.csv")).expect("read fixture");
    column_roles()
        .args(["classify", "-i", "-", "--format", "json"])
        .write_stdin(contents)
        .assert()
        .success()
        .stdout(contains("\"answer\": 4"));
}

#[test]
fn shift_jis_input_with_tab_delimiter() {
    let workspace = TestWorkspace::new();
    let utf8 = fs::read_to_string(fixture_path("survey.csv"))
        .expect("read fixture")
        .replace(',', "\t");
    let (encoded, _, had_errors) = SHIFT_JIS.encode(&utf8);
    assert!(!had_errors);
    let path = workspace.write_bytes("survey.tsv", &encoded);
    let value = json_output(&[
        "classify",
        "-i",
        path.to_str().unwrap(),
        "--input-encoding",
        "shift_jis",
        "--format",
        "json",
    ]);
    assert_eq!(value["mapping"]["name"], 3);
}

#[test]
fn sample_rows_limit_is_forwarded() {
    let survey = fixture_path("survey.csv");
    let value = json_output(&[
        "features",
        "-i",
        survey.to_str().unwrap(),
        "--sample-rows",
        "2",
        "--format",
        "json",
    ]);
    assert_eq!(value[0]["sample_count"], 2);
}

#[test]
fn zero_sample_rows_is_rejected() {
    let survey = fixture_path("survey.csv");
    column_roles()
        .args(["classify", "-i", survey.to_str().unwrap(), "--sample-rows", "0"])
        .assert()
        .failure()
        .stderr(contains("Validating classifier config"));
}

#[test]
fn missing_input_fails_with_context() {
    let workspace = TestWorkspace::new();
    let missing = workspace.path().join("absent.csv");
    column_roles()
        .args(["classify", "-i", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("error:"))
        .stderr(contains("absent.csv"));
}

#[test]
fn header_only_file_classifies_nothing() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("empty.csv", "回答,理由\n");
    let value = json_output(&["classify", "-i", path.to_str().unwrap(), "--format", "json"]);
    assert_eq!(value["mapping"], serde_json::json!({}));
    assert_eq!(value["confidence"], serde_json::json!({}));
}

#[test]
fn zero_scores_render_without_sign() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("numbers.csv", "名前,回答\n田中太郎,1\n山田花子,2\n");
    let output = column_roles()
        .args(["explain", "-i", path.to_str().unwrap()])
        .output()
        .expect("run explain");
    assert!(output.status.success());
    let table = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(table.contains("0.00"));
    assert!(!table.contains("-0.00"), "{table}");

    let json = column_roles()
        .args(["explain", "-i", path.to_str().unwrap(), "--format", "json"])
        .output()
        .expect("run explain");
    let json = String::from_utf8(json.stdout).expect("utf-8 output");
    assert!(!json.contains("-0.0"), "{json}");
}
