//! Filter engine: date range, airline, origin and destination predicates
//!
//! An empty dimension imposes no constraint. Dimensions combine with AND,
//! values within one dimension with OR.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::model::{Dataset, Flight};

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// Inclusive calendar interval. A range with `start > end` contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// ---------------------------------------------------------------------------
// FilterSpec – conjunction of optional predicates
// ---------------------------------------------------------------------------

/// User-selected restrictions applied before aggregation.
///
/// Dimensions are ANDed together; values inside one set are ORed. An empty
/// set places no restriction on its dimension, so `FilterSpec::default()`
/// lets every flight through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub date_range: Option<DateRange>,
    pub airlines: BTreeSet<String>,
    pub origins: BTreeSet<String>,
    pub dests: BTreeSet<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    pub fn with_airlines<I, S>(mut self, airlines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.airlines = airlines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dests<I, S>(mut self, dests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dests = dests.into_iter().map(Into::into).collect();
        self
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none()
            && self.airlines.is_empty()
            && self.origins.is_empty()
            && self.dests.is_empty()
    }

    /// Whether a flight passes every active predicate.
    ///
    /// A flight without a date fails whenever a date range is active.
    pub fn matches(&self, flight: &Flight) -> bool {
        let r = &flight.record;

        if let Some(range) = &self.date_range {
            match r.date {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        allows(&self.airlines, &r.airline)
            && allows(&self.origins, &r.origin)
            && allows(&self.dests, &r.dest)
    }
}

fn allows(selected: &BTreeSet<String>, value: &str) -> bool {
    selected.is_empty() || selected.contains(value)
}

/// Flights of `dataset` passing `spec`, in original relative order.
pub fn apply_filter(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    if spec.is_empty() {
        return dataset.clone();
    }

    let filtered: Dataset = dataset.iter().filter(|f| spec.matches(f)).cloned().collect();

    log::info!("Filter kept {} of {} flight(s)", filtered.len(), dataset.len());
    if filtered.is_empty() {
        log::warn!("Filter combination matched no flights");
    }
    filtered
}

// ---------------------------------------------------------------------------
// FilterOptions – the choices offered to the user
// ---------------------------------------------------------------------------

/// Values a user can pick from for each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Earliest and latest valid date; `None` if no date parsed.
    pub date_bounds: Option<DateRange>,
    pub airlines: Vec<String>,
    pub origins: Vec<String>,
    pub dests: Vec<String>,
}

impl FilterOptions {
    /// Sorted unique values of each dimension.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut airlines = BTreeSet::new();
        let mut origins = BTreeSet::new();
        let mut dests = BTreeSet::new();
        let mut bounds: Option<DateRange> = None;

        for flight in dataset {
            let r = &flight.record;
            airlines.insert(r.airline.clone());
            origins.insert(r.origin.clone());
            dests.insert(r.dest.clone());

            if let Some(date) = r.date {
                bounds = Some(match bounds {
                    Some(b) => DateRange::new(b.start.min(date), b.end.max(date)),
                    None => DateRange::new(date, date),
                });
            }
        }

        Self {
            date_bounds: bounds,
            airlines: airlines.into_iter().collect(),
            origins: origins.into_iter().collect(),
            dests: dests.into_iter().collect(),
        }
    }
}
