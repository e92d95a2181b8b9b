//! Integration tests for the CLI commands that run without OCR models.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const CARD_TOKENS: &str = r#"[
    {"text": "John", "left": 40, "top": 30, "width": 60, "height": 20},
    {"text": "Smith", "left": 110, "top": 30, "width": 80, "height": 20},
    {"text": " ", "left": 0, "top": 0, "width": 0, "height": 0},
    {"text": "john.smith@acme.com", "left": 40, "top": 110, "width": 220, "height": 14},
    {"text": "+1 (415) 555-1234", "left": 40, "top": 130, "width": 170, "height": 14}
]"#;

fn write_tokens(dir: &tempfile::TempDir, content: &str) -> String {
    let path = dir.path().join("tokens.json");
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_extract_json() {
    let dir = tempfile::tempdir().unwrap();
    let tokens = write_tokens(&dir, CARD_TOKENS);

    let output = cargo_bin_cmd!("cardscan")
        .args(["extract", &tokens])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["extracted_data"]["name"], "John Smith");
    assert_eq!(json["extracted_data"]["email"], "john.smith@acme.com");
    assert_eq!(json["extracted_data"]["phone"], "+1 (415) 555-1234");
    assert_eq!(json["boxes"]["name"]["x"], 40);
    assert_eq!(json["boxes"]["email"]["y"], 110);
    assert_eq!(
        json["raw_text"],
        "John\nSmith\n \njohn.smith@acme.com\n+1 (415) 555-1234"
    );
}

#[test]
fn test_extract_csv() {
    let dir = tempfile::tempdir().unwrap();
    let tokens = write_tokens(&dir, CARD_TOKENS);

    cargo_bin_cmd!("cardscan")
        .args(["extract", &tokens, "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,email,phone,company,file_url"))
        .stdout(predicate::str::contains("John Smith,john.smith@acme.com"));
}

#[test]
fn test_extract_empty_stream() {
    let dir = tempfile::tempdir().unwrap();
    let tokens = write_tokens(&dir, "[]");

    let output = cargo_bin_cmd!("cardscan")
        .args(["extract", &tokens])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for field in ["name", "email", "phone", "company"] {
        assert_eq!(json["extracted_data"][field], "");
        assert!(json["boxes"][field].is_null());
    }
    assert_eq!(json["raw_text"], "");
}

#[test]
fn test_extract_strict_rejects_empty_stream() {
    let dir = tempfile::tempdir().unwrap();
    let tokens = write_tokens(&dir, "[]");

    cargo_bin_cmd!("cardscan")
        .args(["extract", &tokens, "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text found"));
}

#[test]
fn test_extract_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let tokens = write_tokens(&dir, "{ not tokens");

    cargo_bin_cmd!("cardscan")
        .args(["extract", &tokens])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid token JSON"));
}

#[test]
fn test_extract_from_stdin() {
    cargo_bin_cmd!("cardscan")
        .args(["extract", "-", "--format", "text"])
        .write_stdin(CARD_TOKENS)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:    John Smith  [x=40 y=30 w=60 h=20]"));
}

#[test]
fn test_compose() {
    cargo_bin_cmd!("cardscan")
        .args(["compose", "--to", "jane@acme.com", "--name", "Jane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To: jane@acme.com"))
        .stdout(predicate::str::contains(
            "Subject: Hi Jane - quick note from Card-to-Connect",
        ))
        .stdout(predicate::str::contains("Looking forward to connecting!"));
}

#[test]
fn test_compose_requires_receiver() {
    cargo_bin_cmd!("cardscan")
        .args(["compose", "--to", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing receiver email"));
}

#[test]
fn test_config_init_set_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_str().unwrap();

    cargo_bin_cmd!("cardscan")
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    cargo_bin_cmd!("cardscan")
        .args(["--config", config, "config", "get", "storage.upload_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"uploads\""));

    cargo_bin_cmd!("cardscan")
        .args(["--config", config, "config", "set", "ocr.preprocess", "true"])
        .assert()
        .success();

    cargo_bin_cmd!("cardscan")
        .args(["--config", config, "config", "get", "ocr.preprocess"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));

    cargo_bin_cmd!("cardscan")
        .args(["--config", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_scan_without_models() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("card.png");
    fs::write(&image, b"not really a png").unwrap();
    let models = dir.path().join("models");
    fs::create_dir_all(&models).unwrap();

    cargo_bin_cmd!("cardscan")
        .args(["scan", image.to_str().unwrap(), "--model-dir", models.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OCR models not found"));
}

#[test]
fn test_scan_unsupported_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("card.pdf");
    fs::write(&input, b"%PDF").unwrap();

    cargo_bin_cmd!("cardscan")
        .args(["scan", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}
