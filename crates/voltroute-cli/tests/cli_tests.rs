//! Integration tests for the CLI subcommands.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/line_network.json")
        .canonicalize()
        .expect("fixture network present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("voltroute-cli");
    cmd.env("RUST_LOG", "error");
    cmd
}

fn with_fixture() -> Command {
    let mut cmd = cli();
    cmd.arg("--network").arg(fixture_path());
    cmd
}

#[test]
fn route_uses_battery_from_network_settings() {
    with_fixture()
        .args(["route", "--from", "0", "--to", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path: 0→1→2→3→4"))
        .stdout(predicate::str::contains("Total cost: 40"))
        .stdout(predicate::str::contains("Recharge stops: 2"));
}

#[test]
fn route_json_output_is_parseable() {
    let output = with_fixture()
        .args(["--format", "json", "route", "--from", "0", "--to", "4"])
        .args(["--strategy", "all-pairs"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(value["path"], serde_json::json!([0, 1, 2, 3, 4]));
    assert_eq!(value["strategy"], "all-pairs");
}

#[test]
fn route_without_enough_battery_fails() {
    with_fixture()
        .args(["route", "--from", "0", "--to", "4", "--battery", "15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no route from 0 to 4"));
}

#[test]
fn unknown_strategy_suggests_alternatives() {
    with_fixture()
        .args(["route", "--from", "0", "--to", "4", "--strategy", "dijkstar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dijkstra"));
}

#[test]
fn unknown_site_is_reported() {
    with_fixture()
        .args(["route", "--from", "0", "--to", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown site: 42"));
}

#[test]
fn suggest_prefers_seen_route() {
    with_fixture()
        .args(["suggest", "--from", "0", "--to", "2"])
        .args(["--seen", "0,1,2", "0,1,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("source: history"))
        .stdout(predicate::str::contains("Path: 0→1→2"));
}

#[test]
fn suggest_without_history_searches() {
    with_fixture()
        .args(["suggest", "--from", "0", "--to", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("source: search"));
}

#[test]
fn seen_route_must_exist_in_network() {
    with_fixture()
        .args(["report", "--seen", "0,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing from the network"));
}

#[test]
fn report_lists_busiest_segments() {
    with_fixture()
        .args(["report", "--seen", "0,1,2", "0,1,2", "1,2,3", "--top", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0→1→2 (2 uses)"))
        .stdout(predicate::str::contains("1 -> 2: 3 uses"))
        .stdout(predicate::str::contains("Site visits:"));
}

#[test]
fn mst_of_line_network() {
    with_fixture()
        .arg("mst")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Minimum spanning tree (4 connections, total cost 40)",
        ));
}

#[test]
fn missing_network_flag_fails() {
    cli()
        .arg("mst")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--network <NETWORK>"));
}

#[test]
fn help_shows_network_as_required() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--network <NETWORK> <COMMAND>"));
}

#[test]
fn invalid_network_file_fails_with_context() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("network.json");
    fs::write(
        &path,
        r#"{"sites":[{},{}],"connections":[{"a":0,"b":0,"cost":1}]}"#,
    )
    .expect("write network");

    cli()
        .arg("--network")
        .arg(&path)
        .arg("mst")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid network"));
}

#[test]
fn negative_cost_per_hop_in_network_is_rejected() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("network.json");
    fs::write(
        &path,
        r#"{"sites":[{},{}],"connections":[{"a":0,"b":1,"cost":1}],"optimizer":{"cost_per_hop":-10}}"#,
    )
    .expect("write network");

    cli()
        .arg("--network")
        .arg(&path)
        .arg("mst")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid optimizer settings"))
        .stderr(predicate::str::contains("cost per hop must be non-negative"));
}
