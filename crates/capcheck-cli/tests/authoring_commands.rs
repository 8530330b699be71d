// capcheck-cli/tests/authoring_commands.rs
// ============================================================================
// Module: CLI Authoring Command Tests
// Description: Integration tests for contract-source validation and normalization.
// Purpose: Ensure authoring commands validate inputs and emit canonical JSON.
// Dependencies: capcheck binary, capcheck-registry, serde_json
// ============================================================================

//! CLI authoring command integration tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use capcheck_registry::SourceFormat;
use capcheck_registry::examples;
use capcheck_registry::load_contract_set;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn capcheck_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_capcheck"))
}

fn temp_root(label: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock drift").as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("capcheck-cli-{label}-{nanos}"));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_dir_all(path);
}

fn write_json(path: &Path, value: &impl serde::Serialize) {
    let bytes = serde_json::to_vec(value).expect("serialize");
    fs::write(path, bytes).expect("write json");
}

fn write_text(path: &Path, value: &str) {
    fs::write(path, value).expect("write text");
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies validate succeeds for canonical JSON input.
#[test]
fn cli_validate_json_succeeds() {
    let root = temp_root("validate-json");
    let input = root.join("contracts.json");
    write_json(&input, &examples::contract_set_example());

    let output = Command::new(capcheck_bin())
        .args(["validate", input.to_string_lossy().as_ref()])
        .output()
        .expect("validate");

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(output.status.success());
    assert!(stdout.contains("Contract set valid (set_id=point-inspection"));
    cleanup(&root);
}

/// Verifies validate accepts RON authoring input.
#[test]
fn cli_validate_ron_succeeds() {
    let root = temp_root("validate-ron");
    let input = root.join("contracts.ron");
    write_text(&input, &examples::contract_set_example_ron().expect("render ron"));

    let output = Command::new(capcheck_bin())
        .args(["validate", input.to_string_lossy().as_ref()])
        .output()
        .expect("validate");

    assert!(output.status.success());
    cleanup(&root);
}

/// Verifies validate rejects a malformed set with a nonzero exit.
#[test]
fn cli_validate_rejects_duplicate_names() {
    let root = temp_root("validate-dup");
    let input = root.join("contracts.json");
    write_text(
        &input,
        r#"{
            "set_id": "broken",
            "version": "1",
            "contracts": [
                { "name": "pick", "arities": [2] },
                { "name": "pick", "arities": [3] }
            ]
        }"#,
    );

    let output = Command::new(capcheck_bin())
        .args(["validate", input.to_string_lossy().as_ref()])
        .output()
        .expect("validate");

    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(!output.status.success());
    assert!(stderr.contains("duplicate contract name"));
    cleanup(&root);
}

/// Verifies an unknown extension requires an explicit format flag.
#[test]
fn cli_validate_requires_format_for_unknown_extension() {
    let root = temp_root("validate-format");
    let input = root.join("contracts.data");
    write_json(&input, &examples::contract_set_example());

    let without_flag = Command::new(capcheck_bin())
        .args(["validate", input.to_string_lossy().as_ref()])
        .output()
        .expect("validate");
    assert!(!without_flag.status.success());

    let with_flag = Command::new(capcheck_bin())
        .args(["validate", input.to_string_lossy().as_ref(), "--format", "json"])
        .output()
        .expect("validate");
    assert!(with_flag.status.success());
    cleanup(&root);
}

/// Verifies normalize emits canonical JSON that reloads to an equal set.
#[test]
fn cli_normalize_round_trips() {
    let root = temp_root("normalize");
    let input = root.join("contracts.ron");
    let output_path = root.join("contracts.json");
    write_text(&input, &examples::contract_set_example_ron().expect("render ron"));

    let output = Command::new(capcheck_bin())
        .args([
            "normalize",
            input.to_string_lossy().as_ref(),
            "--output",
            output_path.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("normalize");

    assert!(output.status.success());
    let canonical = fs::read_to_string(&output_path).expect("read normalized output");
    let reloaded = load_contract_set(&canonical, SourceFormat::Json).expect("reload");
    assert_eq!(reloaded.set, examples::contract_set_example());
    cleanup(&root);
}
