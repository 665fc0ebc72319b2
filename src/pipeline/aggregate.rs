//! KPIs and group-by summaries over a (filtered) dataset
//!
//! Every mean is `Option<f64>`: `None` means there was nothing to average
//! and is shown as "no data" rather than 0.

use std::collections::BTreeMap;

use serde::Serialize;

use super::model::Dataset;
use super::schema::DelayKind;

/// Mean of an iterator, `None` when it yields nothing.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Running sum/count for one group.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
    total_delay_minutes: f64,
}

impl Accumulator {
    fn push(&mut self, arr_delay: f64, total_delay_minutes: f64) {
        self.sum += arr_delay;
        self.count += 1;
        self.total_delay_minutes += total_delay_minutes;
    }

    // Groups only exist once a row was pushed, so count > 0
    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    pub flight_count: usize,
    pub mean_arr_delay: Option<f64>,
    /// Share of on-time flights, 0-100
    pub on_time_pct: Option<f64>,
    /// Over flights with a known distance
    pub mean_distance: Option<f64>,
    /// Over flights where the ratio is defined
    pub mean_delay_per_100_miles: Option<f64>,
}

pub fn compute_kpis(dataset: &Dataset) -> Kpis {
    Kpis {
        flight_count: dataset.len(),
        mean_arr_delay: mean(dataset.iter().map(|f| f.record.arr_delay)),
        on_time_pct: mean(dataset.iter().map(|f| if f.on_time { 100.0 } else { 0.0 })),
        mean_distance: mean(dataset.iter().filter_map(|f| f.record.distance)),
        mean_delay_per_100_miles: mean(dataset.iter().filter_map(|f| f.delay_per_100_miles)),
    }
}

// ---------------------------------------------------------------------------
// Group-by tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirlineDelay {
    pub airline: String,
    pub mean_arr_delay: f64,
    pub flights: usize,
    /// Sum of the five delay components over this airline's flights
    pub total_delay_minutes: f64,
}

/// Mean arrival delay per airline, highest first; ties by airline name.
pub fn delay_by_airline(dataset: &Dataset) -> Vec<AirlineDelay> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for flight in dataset {
        groups
            .entry(flight.record.airline.as_str())
            .or_default()
            .push(flight.record.arr_delay, flight.total_delay_minutes);
    }

    let mut rows: Vec<AirlineDelay> = groups
        .into_iter()
        .map(|(airline, acc)| AirlineDelay {
            airline: airline.to_string(),
            mean_arr_delay: acc.mean(),
            flights: acc.count,
            total_delay_minutes: acc.total_delay_minutes,
        })
        .collect();

    // Stable sort over name-ordered groups breaks ties by name
    rows.sort_by(|a, b| b.mean_arr_delay.total_cmp(&a.mean_arr_delay));
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthDelay {
    /// 1-12
    pub month: u32,
    pub mean_arr_delay: f64,
    pub flights: usize,
}

/// Mean arrival delay per calendar month, ascending; undated flights are skipped.
pub fn delay_by_month(dataset: &Dataset) -> Vec<MonthDelay> {
    let mut groups: BTreeMap<u32, Accumulator> = BTreeMap::new();
    for flight in dataset {
        if let Some(month) = flight.month {
            groups
                .entry(month)
                .or_default()
                .push(flight.record.arr_delay, flight.total_delay_minutes);
        }
    }

    groups
        .into_iter()
        .map(|(month, acc)| MonthDelay {
            month,
            mean_arr_delay: acc.mean(),
            flights: acc.count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayTypeTotal {
    pub kind: DelayKind,
    pub label: String,
    pub total_minutes: f64,
    /// Percentage of all delay minutes; `None` when there are none
    pub share_pct: Option<f64>,
}

/// Total minutes per delay component, in `DelayKind::ALL` order.
pub fn delay_by_type(dataset: &Dataset) -> Vec<DelayTypeTotal> {
    let totals: Vec<(DelayKind, f64)> = DelayKind::ALL
        .iter()
        .map(|kind| (*kind, dataset.iter().map(|f| f.record.delay(*kind)).sum()))
        .collect();
    let grand_total: f64 = totals.iter().map(|(_, total)| total).sum();

    totals
        .into_iter()
        .map(|(kind, total_minutes)| DelayTypeTotal {
            kind,
            label: kind.to_string(),
            total_minutes,
            share_pct: (grand_total != 0.0).then(|| total_minutes / grand_total * 100.0),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDelay {
    pub origin: String,
    pub dest: String,
    pub mean_arr_delay: f64,
    pub flights: usize,
}

/// Mean arrival delay per (origin, dest) pair, ordered by origin then dest.
pub fn delay_by_route(dataset: &Dataset) -> Vec<RouteDelay> {
    let mut groups: BTreeMap<(&str, &str), Accumulator> = BTreeMap::new();
    for flight in dataset {
        let r = &flight.record;
        groups
            .entry((r.origin.as_str(), r.dest.as_str()))
            .or_default()
            .push(r.arr_delay, flight.total_delay_minutes);
    }

    groups
        .into_iter()
        .map(|((origin, dest), acc)| RouteDelay {
            origin: origin.to_string(),
            dest: dest.to_string(),
            mean_arr_delay: acc.mean(),
            flights: acc.count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Summary and insights
// ---------------------------------------------------------------------------

/// Everything the dashboard shows for one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub kpis: Kpis,
    pub by_airline: Vec<AirlineDelay>,
    pub by_month: Vec<MonthDelay>,
    pub by_delay_type: Vec<DelayTypeTotal>,
    pub by_route: Vec<RouteDelay>,
}

impl Summary {
    /// The view holds no flights; every table is empty or "no data".
    pub fn is_empty(&self) -> bool {
        self.kpis.flight_count == 0
    }

    /// Routes with the highest mean delay, at most `n`, ties by route.
    pub fn worst_routes(&self, n: usize) -> Vec<&RouteDelay> {
        let mut routes: Vec<&RouteDelay> = self.by_route.iter().collect();
        routes.sort_by(|a, b| b.mean_arr_delay.total_cmp(&a.mean_arr_delay));
        routes.truncate(n);
        routes
    }
}

pub fn summarize(dataset: &Dataset) -> Summary {
    Summary {
        kpis: compute_kpis(dataset),
        by_airline: delay_by_airline(dataset),
        by_month: delay_by_month(dataset),
        by_delay_type: delay_by_type(dataset),
        by_route: delay_by_route(dataset),
    }
}

/// Headline findings derived from a summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    /// Airline with the highest mean arrival delay
    pub worst_airline: Option<String>,
    /// Month with the highest mean arrival delay
    pub peak_month: Option<u32>,
    /// Delay component contributing the most minutes
    pub dominant_delay_type: Option<DelayKind>,
}

impl Insights {
    pub fn from_summary(summary: &Summary) -> Self {
        let peak_month = summary
            .by_month
            .iter()
            .fold(None::<&MonthDelay>, |best, m| match best {
                Some(b) if b.mean_arr_delay >= m.mean_arr_delay => Some(b),
                _ => Some(m),
            })
            .map(|m| m.month);

        let dominant_delay_type = summary
            .by_delay_type
            .iter()
            .filter(|t| t.total_minutes > 0.0)
            .fold(None::<&DelayTypeTotal>, |best, t| match best {
                Some(b) if b.total_minutes >= t.total_minutes => Some(b),
                _ => Some(t),
            })
            .map(|t| t.kind);

        Self {
            worst_airline: summary.by_airline.first().map(|a| a.airline.clone()),
            peak_month,
            dominant_delay_type,
        }
    }
}
