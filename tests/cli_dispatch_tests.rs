mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_geodash")
}

fn run(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env("GEODASH_DATA_DIR", data_dir)
        .env_remove("GEODASH_CONFIG")
        .env("RUST_LOG", "off")
        .output()
        .expect("geodash should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("command should emit json")
}

#[test]
fn missing_command_prints_usage() {
    let output = Command::new(bin()).output().expect("geodash should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: geodash"));
}

#[test]
fn check_command_reports_load_diagnostics() {
    let dir = common::fixture_data_dir("cli-check");
    let output = run(&dir, &["check"]);
    assert_eq!(output.status.code(), Some(0));

    let payload = stdout_json(&output);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["trends"]["countries"], 4);
    assert_eq!(payload["trends"]["features_resolved"], 3);
    assert_eq!(payload["trends"]["gdp"]["rows_total"], 5);
    assert_eq!(payload["trends"]["gdp"]["rows_unresolved"], 1);
    assert_eq!(payload["plants"]["plants"]["rows_kept"], 6);
    assert_eq!(payload["plants"]["countries_unlocated"], serde_json::json!(["XXK"]));
    assert_eq!(payload["plants"]["countries_located"], 2);
}

#[test]
fn trends_command_prints_the_year_view() {
    let dir = common::fixture_data_dir("cli-trends");
    let output = run(&dir, &["trends", "2001"]);
    assert_eq!(output.status.code(), Some(0));

    let payload = stdout_json(&output);
    assert_eq!(payload["year"], 2001);
    assert_eq!(payload["kpis"]["life_expectancy_label"], "77.0");
    assert_eq!(payload["kpis"]["gdp_label"], "$15,600");
}

#[test]
fn trends_command_requires_a_numeric_year() {
    let dir = common::fixture_data_dir("cli-trends-usage");
    assert_eq!(run(&dir, &["trends"]).status.code(), Some(2));
    assert_eq!(run(&dir, &["trends", "next"]).status.code(), Some(2));
}

#[test]
fn trends_command_rejects_years_outside_the_bounds() {
    let dir = common::fixture_data_dir("cli-trends-bounds");
    let output = run(&dir, &["trends", "3000"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("outside 1800..=2100"));
}

#[test]
fn plants_command_filters_by_fuel_and_years() {
    let dir = common::fixture_data_dir("cli-plants");
    let output = run(&dir, &["plants", "Hydro"]);
    assert_eq!(output.status.code(), Some(0));
    let payload = stdout_json(&output);
    assert_eq!(payload["kpis"]["plant_count"], 2);
    assert_eq!(payload["filter"]["fuel"], "Hydro");

    let output = run(&dir, &["plants", "ALL", "1980", "1990"]);
    let payload = stdout_json(&output);
    assert_eq!(payload["kpis"]["plant_count"], 3);
    assert_eq!(payload["filter"]["fuel"], serde_json::Value::Null);
}

#[test]
fn missing_input_file_fails_the_load() {
    let dir = common::fixture_data_dir("cli-missing");
    fs::remove_file(dir.join("lex.csv")).expect("fixture file should exist");
    let output = run(&dir, &["check"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lex.csv"));
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = common::fixture_data_dir("cli-config");
    let config = dir.join("geodash.yaml");
    fs::write(&config, "years:\n  min: 2000\n  max: 1990\n").expect("config should be writable");
    let output = Command::new(bin())
        .arg("check")
        .env("GEODASH_CONFIG", &config)
        .env("GEODASH_DATA_DIR", &dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("geodash should run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"));
}
