//! One loaded upload and the views computed from it
//!
//! An `Analysis` owns its dataset exclusively. The anomaly threshold and the
//! filter options are computed once at construction and never change when
//! different filters are applied.

use std::path::Path;

use super::aggregate::{summarize, Insights, Summary};
use super::anomaly::{AnomalyReport, AnomalyThreshold};
use super::cleaner::CleaningStats;
use super::error::Result;
use super::filter::{apply_filter, FilterOptions, FilterSpec};
use super::loader::{load_dataset, load_from_bytes, Loaded};
use super::model::Dataset;

#[derive(Debug, Clone)]
pub struct Analysis {
    dataset: Dataset,
    stats: CleaningStats,
    threshold: Option<AnomalyThreshold>,
    options: FilterOptions,
}

/// A filtered dataset and its aggregates.
#[derive(Debug, Clone)]
pub struct View {
    pub filter: FilterSpec,
    pub dataset: Dataset,
    pub summary: Summary,
    pub insights: Insights,
}

impl Analysis {
    pub fn new(loaded: Loaded) -> Self {
        let threshold = AnomalyThreshold::compute(&loaded.dataset);
        let options = FilterOptions::from_dataset(&loaded.dataset);
        Self {
            dataset: loaded.dataset,
            stats: loaded.stats,
            threshold,
            options,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(load_from_bytes(bytes)?))
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(load_dataset(path)?))
    }

    /// The full, unfiltered dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn stats(&self) -> &CleaningStats {
        &self.stats
    }

    /// Threshold over the full dataset; `None` if it has no rows.
    pub fn threshold(&self) -> Option<&AnomalyThreshold> {
        self.threshold.as_ref()
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Filter and aggregate in one pass.
    pub fn view(&self, filter: &FilterSpec) -> View {
        let dataset = apply_filter(&self.dataset, filter);
        let summary = summarize(&dataset);
        let insights = Insights::from_summary(&summary);
        View {
            filter: filter.clone(),
            dataset,
            summary,
            insights,
        }
    }

    /// Anomalies of the full dataset.
    pub fn anomalies(&self, preview_len: usize) -> AnomalyReport {
        AnomalyReport::build(&self.dataset, self.threshold(), preview_len)
    }

    /// Anomalies restricted to a view, still judged by the full-dataset threshold.
    pub fn anomalies_in(&self, view: &View, preview_len: usize) -> AnomalyReport {
        AnomalyReport::build(&view.dataset, self.threshold(), preview_len)
    }
}
