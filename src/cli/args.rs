//! Command-line argument definitions using clap

use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::pipeline::{export_file_name, DateRange, FilterSpec, DEFAULT_PREVIEW_LEN};

/// Flightdelay - Summarize arrival delays, delay causes and outliers from a flight CSV
#[derive(Parser, Debug)]
#[command(name = "flightdelay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV with a header row (Date in DD-MM-YYYY).
    /// If not provided, it is asked for interactively.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output path for the filtered CSV.
    /// Defaults to '<input stem>_filtered.csv' next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First date to include (DD-MM-YYYY or YYYY-MM-DD).
    /// Without --end-date the range runs to the last date in the data.
    #[arg(long, value_parser = parse_date_arg)]
    pub start_date: Option<NaiveDate>,

    /// Last date to include (DD-MM-YYYY or YYYY-MM-DD).
    /// Without --start-date the range starts at the first date in the data.
    #[arg(long, value_parser = parse_date_arg)]
    pub end_date: Option<NaiveDate>,

    /// Airlines to keep (comma-separated or repeated). Default: all
    #[arg(short = 'a', long = "airline", value_delimiter = ',')]
    pub airlines: Vec<String>,

    /// Origin airports to keep (comma-separated or repeated). Default: all
    #[arg(long = "origin", value_delimiter = ',')]
    pub origins: Vec<String>,

    /// Destination airports to keep (comma-separated or repeated). Default: all
    #[arg(long = "dest", value_delimiter = ',')]
    pub dests: Vec<String>,

    /// Number of anomalous flights listed
    #[arg(long, default_value_t = DEFAULT_PREVIEW_LEN)]
    pub anomaly_preview: usize,

    /// Number of worst routes listed
    #[arg(long, default_value = "10")]
    pub top_routes: usize,

    /// List only anomalies inside the filtered view.
    /// The threshold is always computed from the full dataset.
    #[arg(long, default_value = "false")]
    pub anomalies_in_view: bool,

    /// Write the dashboard (KPIs, tables, anomalies) as JSON to this path
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Do not write the filtered CSV
    #[arg(long, default_value = "false")]
    pub no_export: bool,

    /// Print the values available for each filter and exit
    #[arg(long, default_value = "false")]
    pub list_options: bool,

    /// Skip interactive prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

impl Cli {
    /// Get the export path, deriving it from the input if not explicitly provided.
    /// The derived path is in the same directory as the input with a '_filtered' suffix.
    /// `None` when export is disabled.
    pub fn output_path(&self, input: &Path) -> Option<PathBuf> {
        if self.no_export {
            return None;
        }
        Some(self.output.clone().unwrap_or_else(|| {
            let parent = input.parent().unwrap_or_else(|| Path::new("."));
            parent.join(export_file_name(input))
        }))
    }

    /// Build the filter from the arguments.
    ///
    /// A single date bound is completed from `data_bounds`; with no valid
    /// dates in the data the open side is unbounded.
    pub fn filter_spec(&self, data_bounds: Option<DateRange>) -> FilterSpec {
        let mut spec = FilterSpec::new()
            .with_airlines(non_blank(&self.airlines))
            .with_origins(non_blank(&self.origins))
            .with_dests(non_blank(&self.dests));

        if self.start_date.is_some() || self.end_date.is_some() {
            let start = self
                .start_date
                .or(data_bounds.map(|b| b.start))
                .unwrap_or(NaiveDate::MIN);
            let end = self
                .end_date
                .or(data_bounds.map(|b| b.end))
                .unwrap_or(NaiveDate::MAX);
            spec = spec.with_date_range(start, end);
        }

        spec
    }
}

fn non_blank(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validator for date arguments
fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| format!("'{}' is not a date (expected DD-MM-YYYY or YYYY-MM-DD)", s))
}
