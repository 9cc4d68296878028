//! Binary-level tests for the `presenter` command.

use std::io::Write;
use std::process::{Command, Stdio};

const CONFIG: &str = r#"
customAttributes:
  fullName: "{firstName} {lastName}"
strategies:
  public:
    blacklist: [ssn]
"#;

fn presenter() -> Command {
    Command::new(env!("CARGO_BIN_EXE_presenter"))
}

fn write_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("presenter.yaml");
    std::fs::write(&path, CONFIG).unwrap();
    path
}

#[test]
fn presents_model_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);

    let mut child = presenter()
        .arg("--config")
        .arg(&config)
        .args(["--strategy", "public"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"firstName": "John", "lastName": "Smith", "ssn": "111"}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"firstName": "John", "lastName": "Smith"})
    );
}

#[test]
fn default_presentation_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir);
    let model = dir.path().join("people.json");
    std::fs::write(&model, r#"[{"firstName": "Ada", "lastName": "Lovelace"}]"#).unwrap();

    let output = presenter()
        .arg("-c")
        .arg(&config)
        .arg(&model)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["fullName"], "Ada Lovelace");
}

#[test]
fn missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("model.json");
    std::fs::write(&model, "{}").unwrap();

    let output = presenter()
        .arg("--config")
        .arg(dir.path().join("nope.yaml"))
        .arg(&model)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
