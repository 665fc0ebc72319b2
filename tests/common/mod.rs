//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::PathBuf;

use flightdelay::pipeline::{load_from_bytes, Analysis, Dataset};
use tempfile::TempDir;

/// Header row with every required column, in source order.
pub const HEADER: &str = "Date,Airline,Origin,Dest,DepTime,ArrTime,CRSArrTime,ActualElapsedTime,CRSElapsedTime,AirTime,ArrDelay,Distance,TaxiIn,TaxiOut,CarrierDelay,WeatherDelay,NASDelay,SecurityDelay,LateAircraftDelay";

/// One CSV row; every field is kept as raw text so tests can inject bad cells.
#[derive(Debug, Clone)]
pub struct Row {
    pub date: String,
    pub airline: String,
    pub origin: String,
    pub dest: String,
    pub dep_time: String,
    pub arr_time: String,
    pub crs_arr_time: String,
    pub actual_elapsed_time: String,
    pub crs_elapsed_time: String,
    pub air_time: String,
    pub arr_delay: String,
    pub distance: String,
    pub taxi_in: String,
    pub taxi_out: String,
    pub delays: [String; 5],
}

impl Default for Row {
    fn default() -> Self {
        Self {
            date: "03-01-2019".to_string(),
            airline: "AA".to_string(),
            origin: "JFK".to_string(),
            dest: "LAX".to_string(),
            dep_time: "1829".to_string(),
            arr_time: "1959".to_string(),
            crs_arr_time: "1925".to_string(),
            actual_elapsed_time: "128".to_string(),
            crs_elapsed_time: "150".to_string(),
            air_time: "116".to_string(),
            arr_delay: "34".to_string(),
            distance: "810".to_string(),
            taxi_in: "4".to_string(),
            taxi_out: "8".to_string(),
            delays: [
                "2".to_string(),
                "0".to_string(),
                "0".to_string(),
                "0".to_string(),
                "32".to_string(),
            ],
        }
    }
}

impl Row {
    pub fn new(date: &str, airline: &str, origin: &str, dest: &str, arr_delay: &str) -> Self {
        Self {
            date: date.to_string(),
            airline: airline.to_string(),
            origin: origin.to_string(),
            dest: dest.to_string(),
            arr_delay: arr_delay.to_string(),
            ..Default::default()
        }
    }

    pub fn distance(mut self, distance: &str) -> Self {
        self.distance = distance.to_string();
        self
    }

    /// Carrier, weather, NAS, security, late aircraft.
    pub fn delays(mut self, delays: [&str; 5]) -> Self {
        self.delays = delays.map(|d| d.to_string());
        self
    }

    pub fn to_csv_line(&self) -> String {
        let mut fields = vec![
            self.date.clone(),
            self.airline.clone(),
            self.origin.clone(),
            self.dest.clone(),
            self.dep_time.clone(),
            self.arr_time.clone(),
            self.crs_arr_time.clone(),
            self.actual_elapsed_time.clone(),
            self.crs_elapsed_time.clone(),
            self.air_time.clone(),
            self.arr_delay.clone(),
            self.distance.clone(),
            self.taxi_in.clone(),
            self.taxi_out.clone(),
        ];
        fields.extend(self.delays.iter().cloned());
        fields.join(",")
    }
}

/// CSV text with the standard header followed by `rows`.
pub fn csv_text(rows: &[Row]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(&row.to_csv_line());
        text.push('\n');
    }
    text
}

/// Load rows through the full loader/cleaner/enricher.
pub fn dataset_from_rows(rows: &[Row]) -> Dataset {
    load_from_bytes(csv_text(rows).as_bytes()).unwrap().dataset
}

pub fn analysis_from_rows(rows: &[Row]) -> Analysis {
    Analysis::from_bytes(csv_text(rows).as_bytes()).unwrap()
}

/// A small mixed dataset: three airlines, two months, a few routes.
pub fn sample_rows() -> Vec<Row> {
    vec![
        Row::new("03-01-2019", "AA", "JFK", "LAX", "5").delays(["0", "0", "0", "0", "0"]),
        Row::new("04-01-2019", "UA", "ORD", "SFO", "10").delays(["0", "0", "0", "0", "0"]),
        Row::new("15-01-2019", "AA", "JFK", "LAX", "12").delays(["0", "0", "0", "0", "0"]),
        Row::new("02-02-2019", "DL", "ATL", "JFK", "15").delays(["5", "0", "10", "0", "0"]),
        Row::new("20-02-2019", "UA", "ORD", "LAX", "90").delays(["30", "20", "10", "0", "30"]),
    ]
}

/// Create a temporary directory with a CSV file containing `contents`
pub fn create_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("flights.csv");
    std::fs::write(&csv_path, contents).unwrap();
    (temp_dir, csv_path)
}

/// Assert two floats are equal within 1e-9
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected {}, got {}",
        expected,
        actual
    );
}
