//! Tests for CLI argument parsing and the binary

use assert_cmd::Command;
use chrono::NaiveDate;
use clap::Parser;
use flightdelay::cli::Cli;
use flightdelay::pipeline::DateRange;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn date(d: u32, m: u32, y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["flightdelay", "-i", "data.csv"]);

    assert_eq!(cli.anomaly_preview, 10, "Default anomaly preview should be 10");
    assert_eq!(cli.top_routes, 10);
    assert!(cli.airlines.is_empty());
    assert!(!cli.no_confirm, "Default no_confirm should be false");
    assert!(!cli.anomalies_in_view);
    assert!(cli.filter_spec(None).is_empty(), "No filter arguments means no predicate");
}

#[test]
fn test_cli_output_path_derivation() {
    let cli = Cli::parse_from(["flightdelay", "-i", "/path/to/data.csv"]);

    let output = cli.output_path(Path::new("/path/to/data.csv")).unwrap();
    assert_eq!(output, PathBuf::from("/path/to/data_filtered.csv"));
}

#[test]
fn test_cli_explicit_output_and_no_export() {
    let cli = Cli::parse_from(["flightdelay", "-i", "data.csv", "-o", "out.csv"]);
    assert_eq!(
        cli.output_path(Path::new("data.csv")),
        Some(PathBuf::from("out.csv"))
    );

    let cli = Cli::parse_from(["flightdelay", "-i", "data.csv", "-o", "out.csv", "--no-export"]);
    assert_eq!(cli.output_path(Path::new("data.csv")), None);
}

#[test]
fn test_cli_set_filters_comma_and_repeated() {
    let cli = Cli::parse_from([
        "flightdelay",
        "-i",
        "data.csv",
        "--airline",
        "AA,UA",
        "-a",
        "DL",
        "--origin",
        "JFK",
        "--dest",
        "LAX, SFO",
    ]);

    let spec = cli.filter_spec(None);

    assert_eq!(spec.airlines.iter().collect::<Vec<_>>(), vec!["AA", "DL", "UA"]);
    assert_eq!(spec.origins.iter().collect::<Vec<_>>(), vec!["JFK"]);
    assert_eq!(spec.dests.iter().collect::<Vec<_>>(), vec!["LAX", "SFO"]);
    assert_eq!(spec.date_range, None);
}

#[test]
fn test_cli_single_date_bound_completed_from_data() {
    let bounds = Some(DateRange::new(date(1, 1, 2019), date(31, 12, 2019)));

    let cli = Cli::parse_from(["flightdelay", "-i", "data.csv", "--start-date", "01-06-2019"]);
    let range = cli.filter_spec(bounds).date_range.unwrap();
    assert_eq!(range.start, date(1, 6, 2019));
    assert_eq!(range.end, date(31, 12, 2019));

    let cli = Cli::parse_from(["flightdelay", "-i", "data.csv", "--end-date", "2019-03-31"]);
    let range = cli.filter_spec(bounds).date_range.unwrap();
    assert_eq!(range.start, date(1, 1, 2019));
    assert_eq!(range.end, date(31, 3, 2019));
}

#[test]
fn test_cli_rejects_bad_date() {
    let result = Cli::try_parse_from(["flightdelay", "-i", "data.csv", "--start-date", "March"]);
    assert!(result.is_err());
}

#[test]
fn test_binary_runs_dashboard_and_exports() {
    let (temp_dir, csv_path) = create_temp_csv(&csv_text(&sample_rows()));
    let json_path = temp_dir.path().join("dashboard.json");

    Command::cargo_bin("flightdelay")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .args(["--airline", "UA", "--no-confirm", "--report-json"])
        .arg(&json_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("MEAN DELAY PER AIRLINE"))
        .stdout(predicate::str::contains("Anomalies found"));

    let exported = temp_dir.path().join("flights_filtered.csv");
    let text = std::fs::read_to_string(&exported).unwrap();
    assert_eq!(text.lines().count(), 3, "Header plus the two UA flights");
    assert!(json_path.exists());
}

#[test]
fn test_binary_reports_schema_error() {
    let (_temp_dir, csv_path) = create_temp_csv("Date,Airline\n01-01-2019,AA\n");

    Command::cargo_bin("flightdelay")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .arg("--no-confirm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column"));
}

#[test]
fn test_binary_without_input_prompts_and_exits() {
    Command::cargo_bin("flightdelay")
        .unwrap()
        .arg("--no-confirm")
        .assert()
        .success()
        .stdout(predicate::str::contains("No flight delay CSV provided"));
}

#[test]
fn test_binary_list_options() {
    let (temp_dir, csv_path) = create_temp_csv(&csv_text(&sample_rows()));

    Command::cargo_bin("flightdelay")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .args(["--list-options", "--no-confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILTER OPTIONS"))
        .stdout(predicate::str::contains("AA, DL, UA"));

    assert!(!temp_dir.path().join("flights_filtered.csv").exists());
}

#[test]
fn test_binary_reanalysing_an_export_keeps_the_source() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("filtered_flight_delay.csv");
    let original = csv_text(&sample_rows());
    std::fs::write(&csv_path, &original).unwrap();

    Command::cargo_bin("flightdelay")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .args(["--no-confirm", "-a", "AA"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), original);
    let exported = temp_dir.path().join("filtered_flight_delay_filtered.csv");
    let text = std::fs::read_to_string(&exported).unwrap();
    assert_eq!(text.lines().count(), 3, "Header plus the two AA flights");
}

#[test]
fn test_binary_refuses_output_equal_to_input() {
    let (_temp_dir, csv_path) = create_temp_csv(&csv_text(&sample_rows()));
    let original = std::fs::read_to_string(&csv_path).unwrap();

    Command::cargo_bin("flightdelay")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .arg("-o")
        .arg(&csv_path)
        .args(["--no-confirm", "-a", "AA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Refusing to overwrite the input file"));

    assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), original);
}
