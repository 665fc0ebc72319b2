//! Derived columns computed from a cleaned record

use chrono::Datelike;

use super::model::{Dataset, Flight, FlightRecord};
use super::schema::DelayKind;

/// Arrival delays up to and including this many minutes count as on time.
pub const ON_TIME_THRESHOLD_MINUTES: f64 = 15.0;

/// Sum of the five delay components.
pub fn total_delay_minutes(record: &FlightRecord) -> f64 {
    DelayKind::ALL.iter().map(|kind| record.delay(*kind)).sum()
}

pub fn is_on_time(arr_delay: f64) -> bool {
    arr_delay <= ON_TIME_THRESHOLD_MINUTES
}

/// Arrival delay normalized per 100 miles flown.
///
/// Absent when distance is absent, or when the ratio is not finite
/// (distance 0), so it can never leak into a mean.
pub fn delay_per_100_miles(arr_delay: f64, distance: Option<f64>) -> Option<f64> {
    distance
        .map(|d| arr_delay / d * 100.0)
        .filter(|v| v.is_finite())
}

pub fn enrich(record: FlightRecord) -> Flight {
    Flight {
        total_delay_minutes: total_delay_minutes(&record),
        on_time: is_on_time(record.arr_delay),
        delay_per_100_miles: delay_per_100_miles(record.arr_delay, record.distance),
        month: record.date.map(|d| d.month()),
        record,
    }
}

/// Enrich every record, preserving order.
pub fn enrich_all(records: Vec<FlightRecord>) -> Dataset {
    records.into_iter().map(enrich).collect()
}
