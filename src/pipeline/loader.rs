//! Dataset loader for flight delay CSV files

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use super::cleaner::{clean_frame, CleaningStats};
use super::enrich::enrich_all;
use super::error::{PipelineError, Result};
use super::model::Dataset;
use super::schema::required_columns;
use crate::utils::{create_spinner, finish_with_success};

/// A cleaned and enriched dataset together with what the cleaner observed.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Dataset,
    pub stats: CleaningStats,
}

/// Parse a CSV byte stream into a DataFrame with every column kept as text.
///
/// Type coercion is left to the cleaner so that a bad cell only affects
/// itself instead of failing schema inference for the whole column.
pub fn read_csv_frame(bytes: &[u8]) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    check_schema(&df)?;
    Ok(df)
}

/// Verify that every required column is present in the header row.
///
/// Extra columns are allowed and ignored.
pub fn check_schema(df: &DataFrame) -> Result<()> {
    let present = df.get_column_names();
    let missing: Vec<String> = required_columns()
        .filter(|required| !present.iter().any(|name| name.as_str() == *required))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Schema { missing })
    }
}

/// Run loader, cleaner and enricher over an in-memory upload.
pub fn load_from_bytes(bytes: &[u8]) -> Result<Loaded> {
    let df = read_csv_frame(bytes)?;
    let (records, stats) = clean_frame(&df)?;
    let dataset = enrich_all(records);

    log::info!(
        "Loaded {} flight(s), {} column(s) in source",
        dataset.len(),
        df.width()
    );

    Ok(Loaded { dataset, stats })
}

/// Load a dataset from a CSV file on disk
pub fn load_dataset(path: &Path) -> Result<Loaded> {
    let bytes = std::fs::read(path).map_err(|e| PipelineError::io(path, e))?;
    load_from_bytes(&bytes)
}

/// Load a dataset while showing a spinner.
pub fn load_dataset_with_progress(path: &Path) -> Result<Loaded> {
    let spinner = create_spinner(&format!("Loading {}...", path.display()));
    let loaded = load_dataset(path);
    match &loaded {
        Ok(l) => finish_with_success(&spinner, &format!("Loaded {} flights", l.dataset.len())),
        Err(_) => spinner.finish_and_clear(),
    }
    loaded
}
