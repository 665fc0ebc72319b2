//! CSV export of a dataset
//!
//! Dates are written back as `DD-MM-YYYY` and absent values as empty cells,
//! so an exported file loads again through the loader unchanged.

use std::io::Write;
use std::path::Path;

use polars::prelude::*;

use super::error::{PipelineError, Result};
use super::model::{Dataset, FlightRecord};
use super::schema::{self, DATE_FORMAT};

/// Appended to the input file stem to name the filtered export.
pub const EXPORT_SUFFIX: &str = "_filtered";

/// Export name used when the input path has no file stem.
pub const DEFAULT_EXPORT_FILE: &str = "filtered_flight_delay.csv";

/// Name of the filtered export for `input`, e.g. `flights.csv` -> `flights_filtered.csv`.
pub fn export_file_name(input: &Path) -> String {
    match input.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => format!("{}{}.csv", stem, EXPORT_SUFFIX),
        None => DEFAULT_EXPORT_FILE.to_string(),
    }
}

/// True when writing `output` would replace `input`.
///
/// Paths are compared after canonicalization when both exist, so `./a.csv`
/// and `a.csv` are the same file.
pub fn overwrites_input(input: &Path, output: &Path) -> bool {
    match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    }
}

fn optional_column(
    dataset: &Dataset,
    name: &str,
    value: impl Fn(&FlightRecord) -> Option<f64>,
) -> Column {
    let values: Vec<Option<f64>> = dataset.iter().map(|f| value(&f.record)).collect();
    Column::new(name.into(), values)
}

fn filled_column(dataset: &Dataset, name: &str, value: impl Fn(&FlightRecord) -> f64) -> Column {
    let values: Vec<f64> = dataset.iter().map(|f| value(&f.record)).collect();
    Column::new(name.into(), values)
}

fn text_column(dataset: &Dataset, name: &str, value: impl Fn(&FlightRecord) -> &str) -> Column {
    let values: Vec<&str> = dataset.iter().map(|f| value(&f.record)).collect();
    Column::new(name.into(), values)
}

/// Build a DataFrame with the source columns followed by the derived ones.
pub fn to_dataframe(dataset: &Dataset) -> Result<DataFrame> {
    let dates: Vec<Option<String>> = dataset
        .iter()
        .map(|f| f.record.date.map(|d| d.format(DATE_FORMAT).to_string()))
        .collect();
    let on_time: Vec<i32> = dataset.iter().map(|f| i32::from(f.on_time)).collect();
    let per_100: Vec<Option<f64>> = dataset.iter().map(|f| f.delay_per_100_miles).collect();
    let months: Vec<Option<u32>> = dataset.iter().map(|f| f.month).collect();
    let totals: Vec<f64> = dataset.iter().map(|f| f.total_delay_minutes).collect();

    let columns = vec![
        Column::new(schema::DATE.into(), dates),
        text_column(dataset, schema::AIRLINE, |r| r.airline.as_str()),
        text_column(dataset, schema::ORIGIN, |r| r.origin.as_str()),
        text_column(dataset, schema::DEST, |r| r.dest.as_str()),
        optional_column(dataset, schema::DEP_TIME, |r| r.dep_time),
        optional_column(dataset, schema::ARR_TIME, |r| r.arr_time),
        optional_column(dataset, schema::CRS_ARR_TIME, |r| r.crs_arr_time),
        optional_column(dataset, schema::ACTUAL_ELAPSED_TIME, |r| r.actual_elapsed_time),
        optional_column(dataset, schema::CRS_ELAPSED_TIME, |r| r.crs_elapsed_time),
        optional_column(dataset, schema::AIR_TIME, |r| r.air_time),
        filled_column(dataset, schema::ARR_DELAY, |r| r.arr_delay),
        optional_column(dataset, schema::DISTANCE, |r| r.distance),
        optional_column(dataset, schema::TAXI_IN, |r| r.taxi_in),
        optional_column(dataset, schema::TAXI_OUT, |r| r.taxi_out),
        filled_column(dataset, schema::CARRIER_DELAY, |r| r.carrier_delay),
        filled_column(dataset, schema::WEATHER_DELAY, |r| r.weather_delay),
        filled_column(dataset, schema::NAS_DELAY, |r| r.nas_delay),
        filled_column(dataset, schema::SECURITY_DELAY, |r| r.security_delay),
        filled_column(dataset, schema::LATE_AIRCRAFT_DELAY, |r| r.late_aircraft_delay),
        Column::new(schema::TOTAL_DELAY_MINUTES.into(), totals),
        Column::new(schema::ON_TIME.into(), on_time),
        Column::new(schema::DELAY_PER_100_MILES.into(), per_100),
        Column::new(schema::MONTH.into(), months),
    ];

    Ok(DataFrame::new(columns)?)
}

/// Write a dataset as UTF-8 CSV with a header row.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut df = to_dataframe(dataset)?;
    CsvWriter::new(writer).include_header(true).finish(&mut df)?;
    Ok(())
}

/// Encode a dataset as CSV bytes, as offered for download.
pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(dataset, &mut buffer)?;
    Ok(buffer)
}

/// Write a dataset to a CSV file
pub fn export_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| PipelineError::io(path, e))?;
    write_csv(dataset, file)?;
    log::info!("Exported {} flight(s) to {}", dataset.len(), path.display());
    Ok(())
}
