//! Row and dataset types shared by every pipeline stage

use chrono::NaiveDate;
use serde::Serialize;

use super::schema::DelayKind;

// ---------------------------------------------------------------------------
// FlightRecord – one cleaned row
// ---------------------------------------------------------------------------

/// A single flight after type coercion and zero-filling.
///
/// Optional fields are absent when the source cell was empty or unparseable.
/// `arr_delay` and the five delay components are never absent: the cleaner
/// substitutes 0 for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightRecord {
    pub date: Option<NaiveDate>,
    pub airline: String,
    pub origin: String,
    pub dest: String,
    pub dep_time: Option<f64>,
    pub arr_time: Option<f64>,
    pub crs_arr_time: Option<f64>,
    pub actual_elapsed_time: Option<f64>,
    pub crs_elapsed_time: Option<f64>,
    pub air_time: Option<f64>,
    pub arr_delay: f64,
    pub distance: Option<f64>,
    pub taxi_in: Option<f64>,
    pub taxi_out: Option<f64>,
    pub carrier_delay: f64,
    pub weather_delay: f64,
    pub nas_delay: f64,
    pub security_delay: f64,
    pub late_aircraft_delay: f64,
}

impl FlightRecord {
    /// Minutes attributed to one delay component.
    pub fn delay(&self, kind: DelayKind) -> f64 {
        match kind {
            DelayKind::Carrier => self.carrier_delay,
            DelayKind::Weather => self.weather_delay,
            DelayKind::Nas => self.nas_delay,
            DelayKind::Security => self.security_delay,
            DelayKind::LateAircraft => self.late_aircraft_delay,
        }
    }
}

// ---------------------------------------------------------------------------
// Flight – a cleaned row plus its derived columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flight {
    #[serde(flatten)]
    pub record: FlightRecord,
    pub total_delay_minutes: f64,
    pub on_time: bool,
    /// Absent when distance is 0 or absent.
    pub delay_per_100_miles: Option<f64>,
    /// 1-12, absent when the date is absent.
    pub month: Option<u32>,
}

// ---------------------------------------------------------------------------
// Dataset – ordered collection of flights
// ---------------------------------------------------------------------------

/// Flights in source row order.
///
/// A dataset is built once per input file and never mutated; filtering
/// produces a new dataset holding a subsequence of the rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    flights: Vec<Flight>,
}

impl Dataset {
    pub fn new(flights: Vec<Flight>) -> Self {
        Self { flights }
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flight> {
        self.flights.iter()
    }

    /// Number of flights (rows).
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// The first `n` flights, for previews.
    pub fn head(&self, n: usize) -> &[Flight] {
        &self.flights[..n.min(self.flights.len())]
    }
}

impl FromIterator<Flight> for Dataset {
    fn from_iter<I: IntoIterator<Item = Flight>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Flight;
    type IntoIter = std::slice::Iter<'a, Flight>;

    fn into_iter(self) -> Self::IntoIter {
        self.flights.iter()
    }
}
