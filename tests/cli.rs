//! Integration tests for the offline CLI surface.
//!
//! These drive the built binary directly and only exercise commands that
//! never touch the network: `list`, `reset`, and the gating paths of
//! `create` and `open`. The base URL is pointed at an unroutable host so a
//! regression that starts making remote calls fails loudly instead of
//! hitting the sandbox.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn nbridge(ledger_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nbridge"))
        .args(args)
        .env("NOTARY_BRIDGE_LEDGER", ledger_path)
        .env("NOTARY_BRIDGE_BASE_URL", "https://127.0.0.1:1/api/v1")
        .output()
        .expect("run nbridge")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn list_shows_catalog_without_folders() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("associations.json");

    let output = nbridge(&ledger, &["list", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], "external_app_house_1");
    assert_eq!(rows[0]["address"]["city"], "Lyon");
    assert_eq!(rows[0]["price"], 185_000);
    assert!(rows[0]["operation_id"].is_null());
    assert!(rows[1]["operation_id"].is_null());
}

#[test]
fn list_reports_existing_folder_association() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("associations.json");
    fs::write(
        &ledger,
        r#"[{"type": "OPERATION", "externalId": "external_app_house_1", "remoteId": 77}]"#,
    )
    .unwrap();

    let output = nbridge(&ledger, &["list", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let rows: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(rows[0]["operation_id"], 77);
    assert!(rows[1]["operation_id"].is_null());
}

#[test]
fn create_refuses_listing_with_existing_folder() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("associations.json");
    fs::write(
        &ledger,
        r#"[{"type": "OPERATION", "externalId": "external_app_house_1", "remoteId": 77}]"#,
    )
    .unwrap();

    let output = nbridge(
        &ledger,
        &[
            "create",
            "--listing",
            "external_app_house_1",
            "--folder-type",
            "OPERATION__IMMOBILIER__VENTE_ANCIEN",
            "--contract-model",
            "IMMOBILIER_VENTE_ANCIEN_BON_VISITE",
        ],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("already has folder #77"));
}

#[test]
fn create_rejects_unknown_listing() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("associations.json");

    let output = nbridge(
        &ledger,
        &[
            "create",
            "--listing",
            "external_app_house_9",
            "--folder-type",
            "OPERATION__IMMOBILIER__VENTE_ANCIEN",
            "--contract-model",
            "IMMOBILIER_VENTE_ANCIEN_BON_VISITE",
        ],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown listing"));
}

#[test]
fn open_requires_a_folder_association() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("associations.json");

    let output = nbridge(&ledger, &["open", "--listing", "external_app_house_1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no folder associated"));
}

#[test]
fn reset_clears_the_ledger() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("associations.json");
    fs::write(
        &ledger,
        r#"[
            {"type": "RECORD", "externalId": "external_app_house_1", "remoteId": 11},
            {"type": "OPERATION", "externalId": "external_app_house_1", "remoteId": 77}
        ]"#,
    )
    .unwrap();

    let output = nbridge(&ledger, &["reset"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Cleared 2 association(s)"));

    let contents = fs::read_to_string(&ledger).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 0);

    let listed = nbridge(&ledger, &["list", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&stdout(&listed)).unwrap();
    assert!(rows[0]["operation_id"].is_null());
}
