//! JSON export of a dashboard view

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{AnomalyReport, FilterOptions, FilterSpec, Insights, Summary};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    pub version: String,
    pub input_file: String,
    /// Rows in the full, unfiltered dataset
    pub total_flights: usize,
    /// Filter the view was computed with
    pub filter: FilterSpec,
}

/// Complete dashboard view with metadata
#[derive(Serialize)]
pub struct DashboardExport<'a> {
    pub metadata: ReportMetadata,
    pub options: &'a FilterOptions,
    #[serde(flatten)]
    pub summary: &'a Summary,
    pub insights: &'a Insights,
    pub anomalies: &'a AnomalyReport,
}

/// Parameters describing where a view came from
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub total_flights: usize,
    pub filter: &'a FilterSpec,
    pub options: &'a FilterOptions,
}

/// Serialize a dashboard view to pretty-printed JSON.
pub fn dashboard_json(
    summary: &Summary,
    insights: &Insights,
    anomalies: &AnomalyReport,
    params: &ExportParams,
) -> Result<String> {
    let export = DashboardExport {
        metadata: ReportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            total_flights: params.total_flights,
            filter: params.filter.clone(),
        },
        options: params.options,
        summary,
        insights,
        anomalies,
    };

    serde_json::to_string_pretty(&export).context("Failed to serialize dashboard to JSON")
}

/// Write a dashboard view to a JSON file
pub fn export_dashboard_json(
    summary: &Summary,
    insights: &Insights,
    anomalies: &AnomalyReport,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let json = dashboard_json(summary, insights, anomalies, params)?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write dashboard to {}", output_path.display()))?;

    Ok(())
}
