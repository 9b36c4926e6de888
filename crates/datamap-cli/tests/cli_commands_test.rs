//! Runs the `datamap` binary against scratch projects.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn datamap(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_datamap"));
    command.arg("--dir").arg(dir).env("RUST_LOG", "warn");
    command
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    datamap(dir).args(args).output().expect("run datamap")
}

#[track_caller]
fn assert_exit_code(output: &Output, expected: i32) {
    assert_eq!(
        output.status.code(),
        Some(expected),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn project_with_schema(schema: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let schema_dir = dir.path().join("schema");
    fs::create_dir_all(&schema_dir).expect("schema dir");
    fs::write(schema_dir.join("schema.tws"), schema).expect("schema file");
    dir
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().expect("temp dir");

    let output = run_in(dir.path(), &["init"]);
    assert_exit_code(&output, 0);
    let config = fs::read_to_string(dir.path().join("tw-config.json")).expect("config written");
    assert!(config.contains("\"modulePath\": \"/app\""));

    let output = run_in(dir.path(), &["init"]);
    assert_exit_code(&output, 1);
    assert!(stderr(&output).contains("Config file already exists"));
}

#[test]
fn schema_init_then_generate_writes_files() {
    let dir = TempDir::new().expect("temp dir");

    assert_exit_code(&run_in(dir.path(), &["schema", "init"]), 0);
    assert!(dir.path().join("schema/schema.tws").exists());

    assert_exit_code(&run_in(dir.path(), &["schema", "generate"]), 0);
    let user_dir = dir.path().join("app/user");
    for file in ["user.model.ts", "user.entity.ts", "user.mapper.ts"] {
        assert!(user_dir.join(file).exists(), "{file} should be generated");
    }

    let mapper = fs::read_to_string(user_dir.join("user.mapper.ts")).expect("mapper");
    assert!(mapper.contains("companyAddress: 'company.address.street',"));
}

#[test]
fn generate_refuses_to_overwrite() {
    let dir = TempDir::new().expect("temp dir");
    assert_exit_code(&run_in(dir.path(), &["schema", "init"]), 0);
    assert_exit_code(&run_in(dir.path(), &["schema", "generate"]), 0);

    let model = dir.path().join("app/user/user.model.ts");
    fs::write(&model, "edited").expect("edit model");

    let output = run_in(dir.path(), &["schema", "generate"]);
    assert_exit_code(&output, 1);
    assert!(stderr(&output).contains("Output already exists"));
    assert_eq!(fs::read_to_string(&model).expect("model"), "edited");
}

#[test]
fn generate_without_schema_fails() {
    let dir = TempDir::new().expect("temp dir");

    let output = run_in(dir.path(), &["schema", "generate"]);
    assert_exit_code(&output, 1);
    assert!(stderr(&output).contains("Schema file does not exist"));
    assert!(!dir.path().join("app").exists());
}

#[test]
fn generate_uses_explicit_config_file() {
    let dir = project_with_schema("order:\n  id: number\n");
    let config = dir.path().join("custom.json");
    fs::write(&config, r#"{"modulePath": "src/generated", "modelSuffix": ".dto"}"#)
        .expect("config");

    let output = datamap(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["schema", "generate"])
        .output()
        .expect("run datamap");
    assert_exit_code(&output, 0);
    assert!(
        dir.path()
            .join("src/generated/order/order.dto.ts")
            .exists()
    );
}

#[test]
fn transform_entity_to_model() {
    let dir = project_with_schema("user:\n  id: number <=> id\n  companyName: string <=> company.name\n");
    let input = dir.path().join("entity.json");
    fs::write(&input, r#"{"id": 1, "company": {"name": "Acme"}}"#).expect("input");

    let output = run_in(
        dir.path(),
        &["transform", input.to_str().expect("utf-8 path"), "--group", "user"],
    );
    assert_exit_code(&output, 0);
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({"id": 1, "companyName": "Acme"})
    );
}

#[test]
fn transform_models_to_entities() {
    let dir = project_with_schema("user:\n  id: number <=> id\n  companyName: string <=> company.name\n");
    let input = dir.path().join("models.json");
    fs::write(&input, r#"[{"id": 1, "companyName": "Acme"}, {"id": 2}]"#).expect("input");

    let output = run_in(
        dir.path(),
        &[
            "transform",
            input.to_str().expect("utf-8 path"),
            "--group",
            "user",
            "--to",
            "entity",
        ],
    );
    assert_exit_code(&output, 0);
    assert_eq!(
        stdout_json(&output),
        serde_json::json!([
            {"id": 1, "company": {"name": "Acme"}},
            {"id": 2, "company": {"name": ""}}
        ])
    );
}

#[test]
fn transform_output_follows_schema_order() {
    let dir = project_with_schema(
        "user:\n  zip: string <=> address.zip\n  city: string <=> address.city\n  age: number\n",
    );
    let input = dir.path().join("entity.json");
    fs::write(&input, r#"{"age": 30, "address": {"city": "Oslo", "zip": "0150"}}"#).expect("input");

    let output = run_in(
        dir.path(),
        &["transform", input.to_str().expect("utf-8 path"), "--group", "user"],
    );
    assert_exit_code(&output, 0);
    let compact = serde_json::to_string(&stdout_json(&output)).expect("serialize");
    assert_eq!(compact, r#"{"zip":"0150","city":"Oslo","age":30}"#);
}

#[test]
fn transform_unknown_group_fails() {
    let dir = project_with_schema("user:\n  id: number\n");
    let input = dir.path().join("entity.json");
    fs::write(&input, "{}").expect("input");

    let output = run_in(
        dir.path(),
        &["transform", input.to_str().expect("utf-8 path"), "--group", "order"],
    );
    assert_exit_code(&output, 1);
    assert!(stderr(&output).contains("Unknown group 'order' (available: user)"));
}

#[test]
fn inspect_prints_yaml() {
    let dir = project_with_schema("user:\n  companyName: string <=> company.name\n");

    let output = run_in(dir.path(), &["schema", "inspect", "--format", "yaml"]);
    assert_exit_code(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: user"));
    assert!(stdout.contains("target_path: company.name"));
}

#[test]
fn strict_mode_rejects_duplicate_source_paths() {
    let dir = project_with_schema("user:\n  id: number\n  id: string\n");

    assert_exit_code(&run_in(dir.path(), &["schema", "inspect"]), 0);

    let output = run_in(dir.path(), &["--strict", "schema", "inspect"]);
    assert_exit_code(&output, 1);
    assert!(stderr(&output).contains("Duplicate source path 'id' in group 'user'"));
}
