//! CLI integration tests for the `vscterm` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content. Every test runs from the workspace root
//! so fixture paths resolve.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: the `vscterm` binary, rooted at the workspace, reading the
/// fixture contract configuration.
fn vscterm() -> Command {
    let mut cmd = cargo_bin_cmd!("vscterm");
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd.args(["--contracts", "fixtures/contracts.json"]);
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.output().expect("run vscterm");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).expect("stdout is JSON")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    vscterm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("VSC dApp terminal toolkit"));
}

#[test]
fn version_exits_0() {
    vscterm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vscterm"));
}

// ──────────────────────────────────────────────
// 2. functions
// ──────────────────────────────────────────────

#[test]
fn functions_lists_every_contract() {
    vscterm()
        .arg("functions")
        .assert()
        .success()
        .stdout(predicate::str::contains("dao (vsc1BdrQ6EtbQ64rq2PkPd21x4MaLnVRcJj)"))
        .stdout(predicate::str::contains("proposal_vote"))
        .stdout(predicate::str::contains("Create Project"))
        .stdout(predicate::str::contains("games"));
}

#[test]
fn functions_json_for_one_contract() {
    let listing = stdout_json(vscterm().args(["--output", "json", "functions", "lottery"]));
    let contracts = listing.as_array().unwrap();
    assert_eq!(contracts.len(), 1);
    assert_eq!(contracts[0]["name"], "lottery");
    let functions = contracts[0]["functions"].as_array().unwrap();
    assert_eq!(functions[1]["name"], "ticket_buy");
    assert_eq!(functions[1]["parse"], "raw");
    assert_eq!(functions[1]["parameters"][1]["type"], "vscIntent");
}

#[test]
fn functions_unknown_contract_exits_1() {
    vscterm()
        .args(["functions", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown contract: nope"));
}

#[test]
fn missing_contracts_file_exits_1() {
    let mut cmd = cargo_bin_cmd!("vscterm");
    cmd.current_dir(workspace_root())
        .args(["--contracts", "fixtures/none.json", "functions"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn invalid_contracts_file_exits_1_with_json_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("contracts.json");
    fs::write(
        &path,
        r#"{ "contracts": [{ "id": "x", "name": "x", "functions": [{ "name": "f", "parse": "xml" }] }] }"#,
    )
    .unwrap();
    let out = cargo_bin_cmd!("vscterm")
        .args(["--output", "json", "--contracts"])
        .arg(&path)
        .arg("functions")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    // the rejection is also logged as a warning before the error report
    let stderr = String::from_utf8_lossy(&out.stderr);
    let last = stderr.lines().last().unwrap();
    let err: serde_json::Value = serde_json::from_str(last).unwrap();
    assert!(err["error"].as_str().unwrap().contains("could not parse"));
}

// ──────────────────────────────────────────────
// 3. encode
// ──────────────────────────────────────────────

#[test]
fn encode_csv_call_from_set_values() {
    vscterm()
        .args([
            "encode",
            "dao",
            "proposal_vote",
            "--set",
            "Proposal Id=12",
            "--set",
            "Choice=0",
            "--set",
            "Support=yes",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("contract  vsc1BdrQ6EtbQ64rq2PkPd21x4MaLnVRcJj"))
        .stdout(predicate::str::contains("action    proposal_vote"))
        .stdout(predicate::str::contains("payload   12|0|yes"))
        .stdout(predicate::str::contains("rc_limit  1000"))
        .stdout(predicate::str::contains("key_type  active"));
}

#[test]
fn encode_json_call_with_autofill() {
    vscterm()
        .args([
            "encode",
            "dao",
            "project_create",
            "--values",
            "fixtures/values/project_create.json",
            "--autofill",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"payload   {"name":"Alpha","description":"First project","voting":{"system":"democratic","threshold":50},"public":false,"owner":"hive:alice","meta":{"quorum":"20","network":"mainnet"}}"#,
        ))
        .stdout(predicate::str::contains("intent    transfer.allow hive 2.500"));
}

#[test]
fn encode_without_autofill_keeps_values() {
    vscterm()
        .args([
            "encode",
            "dao",
            "project_create",
            "--values",
            "fixtures/values/project_create.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""owner":"Alice""#))
        .stdout(predicate::str::contains(r#""meta":{"quorum":"20"}"#));
}

#[test]
fn encode_json_output_is_a_broadcast_request() {
    let request = stdout_json(vscterm().args([
        "--output",
        "json",
        "encode",
        "vsc1Lottery9v7ZkqT3mS2fYwX8cP1hJd",
        "ticket_buy",
        "--values",
        "fixtures/values/ticket_buy.json",
    ]));
    assert_eq!(request["contract_id"], "vsc1Lottery9v7ZkqT3mS2fYwX8cP1hJd");
    assert_eq!(request["action"], "ticket_buy");
    assert_eq!(request["payload"], "lot-7");
    assert_eq!(request["rc_limit"], 1200);
    assert_eq!(request["key_type"], "active");
    assert_eq!(
        request["intents"],
        serde_json::json!([{ "type": "transfer.allow", "args": { "token": "hbd", "limit": "3.000" } }])
    );
}

#[test]
fn encode_uses_settings_file_and_flags_override_it() {
    vscterm()
        .args([
            "--config",
            "fixtures/vscterm.toml",
            "encode",
            "dao",
            "proposal_vote",
            "--set",
            "Proposal Id=1",
            "--set",
            "Choice=a",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("payload   1|a|no"))
        .stdout(predicate::str::contains("rc_limit  2000"))
        .stdout(predicate::str::contains("key_type  posting"));

    vscterm()
        .args([
            "--config",
            "fixtures/vscterm.toml",
            "encode",
            "dao",
            "proposal_vote",
            "--key-type",
            "active",
            "--set",
            "rcLimit=50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("rc_limit  50"))
        .stdout(predicate::str::contains("key_type  active"));
}

#[test]
fn encode_game_move() {
    vscterm()
        .args([
            "encode",
            "games",
            "game",
            "--set",
            "__gameAction=g_move",
            "--set",
            "__gameId=42",
            "--set",
            "__gameCell=1,3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("action    g_move"))
        .stdout(predicate::str::contains("payload   42|1|3"));
}

#[test]
fn encode_strict_refuses_incomplete_call() {
    vscterm()
        .args(["encode", "dao", "proposal_vote", "--strict", "--set", "Choice=a"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Proposal Id is required"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn encode_unknown_function_exits_1() {
    vscterm()
        .args(["encode", "dao", "proposal_burn"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("has no function 'proposal_burn'"));
}

#[test]
fn encode_bad_set_exits_1() {
    vscterm()
        .args(["encode", "dao", "proposal_vote", "--set", "Choice"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

// ──────────────────────────────────────────────
// 4. validate
// ──────────────────────────────────────────────

#[test]
fn validate_complete_call_with_balances() {
    vscterm()
        .args([
            "validate",
            "dao",
            "project_create",
            "--values",
            "fixtures/values/project_create.json",
            "--balances",
            "fixtures/balances.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn validate_reports_insufficient_balance_from_settings() {
    vscterm()
        .args([
            "--config",
            "fixtures/vscterm.toml",
            "validate",
            "dao",
            "project_create",
            "--values",
            "fixtures/values/project_create.json",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid"))
        .stderr(predicate::str::contains(
            "Stake: insufficient balance: need 2.500 HIVE have 1.000 HIVE",
        ));
}

#[test]
fn validate_json_lists_issues() {
    let out = vscterm()
        .args([
            "--output",
            "json",
            "validate",
            "dao",
            "project_create",
            "--set",
            "Threshold=150",
        ])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    let report: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(
        report["issues"],
        serde_json::json!([
            "Name is required",
            "Voting System is required",
            "Stake: amount is required",
            "Threshold must be at most 100"
        ])
    );
}

#[test]
fn validate_quiet_json_keeps_stderr_empty() {
    vscterm()
        .args([
            "--quiet",
            "--output",
            "json",
            "validate",
            "dao",
            "project_create",
            "--set",
            "Threshold=150",
        ])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn validate_game_rules() {
    vscterm()
        .args(["validate", "games", "game", "--set", "__gameAction=g_join"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("game id is required"));

    vscterm()
        .args([
            "validate",
            "games",
            "game",
            "--set",
            "__gameAction=g_swap",
            "--set",
            "__gameId=3",
            "--set",
            "__gameSwapOp=color",
            "--set",
            r#"__gameSwapArgs=["black"]"#,
        ])
        .assert()
        .success();
}

#[test]
fn validate_quiet_prints_nothing() {
    vscterm()
        .args([
            "--quiet",
            "validate",
            "lottery",
            "lottery_create",
            "--set",
            "Name=Spring",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ──────────────────────────────────────────────
// 5. codec
// ──────────────────────────────────────────────

#[test]
fn codec_parse_prints_structure() {
    let parsed = stdout_json(vscterm().args(["codec", "payouts", "parse", "hive:alice:1.000:HBD;hive:bob:2.500"]));
    assert_eq!(parsed[0]["receiver"], "hive:alice");
    assert_eq!(parsed[0]["asset"], "HBD");
    assert_eq!(parsed[1]["asset"], "HIVE");

    let parsed = stdout_json(vscterm().args(["codec", "icc", "parse", "vsc1abc|transfer|to=bob|hive=1.000"]));
    assert_eq!(parsed["payload"], "to=bob");
    assert_eq!(parsed["amounts"][0]["asset"], "hive");
}

#[test]
fn codec_serialize_prints_wire_string() {
    vscterm()
        .args([
            "codec",
            "shares",
            "serialize",
            r#"{ "assets": [
                { "asset": "hive", "amounts": ["60", "40"] },
                { "asset": "hbd", "amounts": ["5", ""], "fixed": true }
            ] }"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("(60#hive,5#hbd#fixed);(40#hive,0#hbd#fixed)"));

    let wire = stdout_json(vscterm().args([
        "--output",
        "json",
        "codec",
        "lottery",
        "serialize",
        r#"{ "post_url": "https://p", "donation_url": "", "description": "Big #1" }"#,
    ]));
    assert_eq!(wire["wire"], "https://p######Big 1");
}

#[test]
fn codec_serialize_rejects_invalid_entries() {
    vscterm()
        .args([
            "codec",
            "payouts",
            "serialize",
            r#"[{ "receiver": "", "amount": "1.000", "asset": "HIVE" }]"#,
        ])
        .assert()
        .failure()
        .code(1);

    vscterm()
        .args([
            "codec",
            "shares",
            "serialize",
            r#"{ "assets": [{ "asset": "hive", "amounts": ["60", "30"] }] }"#,
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must add up to 100"));
}

#[test]
fn codec_unknown_field_is_a_usage_error() {
    vscterm()
        .args(["codec", "recipe", "parse", "x"])
        .assert()
        .failure()
        .code(2);
}

// ──────────────────────────────────────────────
// 6. Settings file
// ──────────────────────────────────────────────

#[test]
fn bad_settings_file_exits_1() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("vscterm.toml");
    fs::write(&path, "[terminal]\nkey_type = \"owner\"\n").unwrap();
    vscterm()
        .arg("--config")
        .arg(&path)
        .arg("functions")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not parse"));
}

#[test]
fn settings_file_supplies_contracts_path() {
    let mut cmd = cargo_bin_cmd!("vscterm");
    cmd.current_dir(workspace_root())
        .args(["--config", "fixtures/vscterm.toml", "functions", "games"])
        .assert()
        .success()
        .stdout(predicate::str::contains("game"));
}

#[test]
fn json_log_format_keeps_stdout_clean() {
    let request = stdout_json(
        vscterm()
            .env("RUST_LOG", "debug")
            .args([
                "--log-format",
                "json",
                "--output",
                "json",
                "encode",
                "lottery",
                "ticket_buy",
                "--set",
                "Lottery Id=lot-1",
            ]),
    );
    assert_eq!(request["payload"], "lot-1");
}
