//! Arrival delay outliers using the interquartile range rule

use chrono::NaiveDate;
use serde::Serialize;

use super::model::{Dataset, Flight};

/// Multiplier applied to the IQR above Q3.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Default number of anomalies listed in previews.
pub const DEFAULT_PREVIEW_LEN: usize = 10;

/// Quantile `q` in `[0, 1]` with linear interpolation between closest ranks.
///
/// Returns `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Upper outlier limit for `ArrDelay`, computed once from a full dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyThreshold {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub upper_limit: f64,
}

impl AnomalyThreshold {
    /// `None` when the dataset has no rows.
    pub fn compute(dataset: &Dataset) -> Option<Self> {
        let delays: Vec<f64> = dataset.iter().map(|f| f.record.arr_delay).collect();
        let q1 = quantile(&delays, 0.25)?;
        let q3 = quantile(&delays, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            iqr,
            upper_limit: q3 + IQR_MULTIPLIER * iqr,
        })
    }

    pub fn is_anomalous(&self, flight: &Flight) -> bool {
        flight.record.arr_delay > self.upper_limit
    }
}

/// Display columns of one anomalous flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyRow {
    pub date: Option<NaiveDate>,
    pub airline: String,
    pub origin: String,
    pub dest: String,
    pub arr_delay: f64,
}

impl From<&Flight> for AnomalyRow {
    fn from(flight: &Flight) -> Self {
        let r = &flight.record;
        Self {
            date: r.date,
            airline: r.airline.clone(),
            origin: r.origin.clone(),
            dest: r.dest.clone(),
            arr_delay: r.arr_delay,
        }
    }
}

/// Anomalies of a dataset judged against a fixed threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub threshold: Option<AnomalyThreshold>,
    /// Total anomalous flights
    pub count: usize,
    /// First anomalies in original row order
    pub preview: Vec<AnomalyRow>,
}

impl AnomalyReport {
    /// Judge `dataset` against `threshold`.
    ///
    /// The threshold is passed in rather than recomputed so the same limit
    /// applies whether `dataset` is the full upload or a filtered view.
    pub fn build(
        dataset: &Dataset,
        threshold: Option<&AnomalyThreshold>,
        preview_len: usize,
    ) -> Self {
        let anomalies = find_anomalies(dataset, threshold);
        Self {
            threshold: threshold.copied(),
            count: anomalies.len(),
            preview: anomalies
                .into_iter()
                .take(preview_len)
                .map(AnomalyRow::from)
                .collect(),
        }
    }
}

/// All flights above the limit, in original order.
pub fn find_anomalies<'a>(dataset: &'a Dataset, threshold: Option<&AnomalyThreshold>) -> Vec<&'a Flight> {
    match threshold {
        Some(t) => dataset.iter().filter(|f| t.is_anomalous(f)).collect(),
        None => Vec::new(),
    }
}
