use assert_cmd::Command;
use predicates::prelude::*;

const OPENAI_SECRET: &str = "sk-abcDEF1234567890abcdefGHIJ";

fn workflow_with_secret() -> String {
    format!(
        r#"{{
            "nodes": [{{
                "id": "1",
                "name": "HTTP Request",
                "type": "n8n-nodes-base.httpRequest",
                "typeVersion": 1,
                "position": [0, 0],
                "parameters": {{"apiKey": "{OPENAI_SECRET}"}}
            }}],
            "connections": {{}}
        }}"#
    )
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("flowdoc")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("flowdoc")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("flowdoc"));
}

#[test]
fn test_scan_reports_detected_secrets() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("wf.json");
    std::fs::write(&path, workflow_with_secret()).unwrap();

    Command::cargo_bin("flowdoc")
        .unwrap()
        .arg("scan")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Potential OpenAI Key"))
        .stdout(predicate::str::contains("1 potential secret(s) redacted."));
}

#[test]
fn test_scan_clean_file_reports_nothing_found() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("clean.json");
    std::fs::write(
        &path,
        r#"{"nodes": [{"id": "1", "name": "Set", "type": "n8n-nodes-base.set",
            "typeVersion": 1, "position": [0, 0], "parameters": {}}], "connections": {}}"#,
    )
    .unwrap();

    Command::cargo_bin("flowdoc")
        .unwrap()
        .arg("scan")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No secrets detected"));
}

#[test]
fn test_scan_output_writes_redacted_copy() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("wf.json");
    let output = dir.path().join("wf.redacted.json");
    std::fs::write(&input, workflow_with_secret()).unwrap();

    Command::cargo_bin("flowdoc")
        .unwrap()
        .arg("scan")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Redacted copy written to"));

    let redacted = std::fs::read_to_string(&output).unwrap();
    assert!(!redacted.contains(OPENAI_SECRET));
    assert!(redacted.contains("[REDACTED:OpenAI Key]"));
}

#[test]
fn test_scan_missing_file_fails() {
    Command::cargo_bin("flowdoc")
        .unwrap()
        .arg("scan")
        .arg("/nonexistent/wf.json")
        .assert()
        .failure();
}

#[test]
fn test_process_requires_source_and_dest() {
    Command::cargo_bin("flowdoc")
        .unwrap()
        .arg("process")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
