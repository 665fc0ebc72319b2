//! Tests for IQR anomaly detection

use flightdelay::pipeline::{find_anomalies, AnomalyReport, AnomalyThreshold, Dataset, FilterSpec};

#[path = "common/mod.rs"]
mod common;

use common::*;

fn rows_with_delays(delays: &[&str]) -> Vec<Row> {
    delays
        .iter()
        .enumerate()
        .map(|(i, d)| Row::new(&format!("{:02}-01-2019", i + 1), "AA", "JFK", "LAX", d))
        .collect()
}

#[test]
fn test_iqr_threshold_example() {
    let dataset = dataset_from_rows(&rows_with_delays(&["5", "10", "12", "15", "90"]));

    let threshold = AnomalyThreshold::compute(&dataset).unwrap();

    assert_close(threshold.q1, 10.0);
    assert_close(threshold.q3, 15.0);
    assert_close(threshold.iqr, 5.0);
    assert_close(threshold.upper_limit, 22.5);

    let anomalies = find_anomalies(&dataset, Some(&threshold));
    assert_eq!(anomalies.len(), 1, "Exactly one anomaly expected");
    assert_eq!(anomalies[0].record.arr_delay, 90.0);
}

#[test]
fn test_value_at_limit_is_not_anomalous() {
    // q1 = 0, q3 = 10, upper = 25
    let dataset = dataset_from_rows(&rows_with_delays(&["0", "0", "10", "10", "25"]));

    let threshold = AnomalyThreshold::compute(&dataset).unwrap();

    assert_close(threshold.upper_limit, 25.0);
    assert!(find_anomalies(&dataset, Some(&threshold)).is_empty());
}

#[test]
fn test_anomalies_keep_original_order_and_preview_limit() {
    let mut delays = vec!["1"; 12];
    delays.extend(["500", "300", "400"]);
    let dataset = dataset_from_rows(&rows_with_delays(&delays));
    let threshold = AnomalyThreshold::compute(&dataset).unwrap();

    let report = AnomalyReport::build(&dataset, Some(&threshold), 2);

    assert_eq!(report.count, 3);
    assert_eq!(report.preview.len(), 2);
    assert_eq!(report.preview[0].arr_delay, 500.0);
    assert_eq!(report.preview[1].arr_delay, 300.0);
    assert_eq!(report.preview[0].airline, "AA");
    assert_eq!(report.threshold, Some(threshold));
}

#[test]
fn test_empty_dataset_has_no_threshold() {
    let dataset = Dataset::default();

    assert_eq!(AnomalyThreshold::compute(&dataset), None);

    let report = AnomalyReport::build(&dataset, None, 10);
    assert_eq!(report.count, 0);
    assert!(report.preview.is_empty());
}

#[test]
fn test_missing_arr_delay_counts_as_zero_for_quartiles() {
    // ArrDelay defaults to 0 before the threshold is computed
    let dataset = dataset_from_rows(&rows_with_delays(&["", "", "4", "8"]));

    let threshold = AnomalyThreshold::compute(&dataset).unwrap();

    assert_close(threshold.q1, 0.0);
    assert_close(threshold.q3, 5.0);
}

#[test]
fn test_threshold_invariant_under_filtering() {
    let mut rows = sample_rows();
    rows.push(Row::new("21-02-2019", "DL", "ATL", "ORD", "400"));
    let analysis = analysis_from_rows(&rows);
    let before = *analysis.threshold().unwrap();

    let aa_only = FilterSpec::new().with_airlines(["AA"]);
    let view = analysis.view(&aa_only);
    let _ = analysis.view(&FilterSpec::new().with_origins(["ORD"]));

    assert_eq!(*analysis.threshold().unwrap(), before, "Threshold must not change with filters");

    // Restricting anomalies to the view keeps the full-data threshold
    let full = analysis.anomalies(10);
    let in_view = analysis.anomalies_in(&view, 10);
    assert_eq!(in_view.threshold, full.threshold);
    assert!(full.count >= 1);
    assert_eq!(in_view.count, 0, "No AA flight exceeds the limit");
}
