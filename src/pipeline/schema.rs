//! Fixed column contract of the flight delay dataset

use std::fmt;

use serde::Serialize;

pub const DATE: &str = "Date";
pub const AIRLINE: &str = "Airline";
pub const ORIGIN: &str = "Origin";
pub const DEST: &str = "Dest";

pub const DEP_TIME: &str = "DepTime";
pub const ARR_TIME: &str = "ArrTime";
pub const CRS_ARR_TIME: &str = "CRSArrTime";
pub const ACTUAL_ELAPSED_TIME: &str = "ActualElapsedTime";
pub const CRS_ELAPSED_TIME: &str = "CRSElapsedTime";
pub const AIR_TIME: &str = "AirTime";
pub const ARR_DELAY: &str = "ArrDelay";
pub const DISTANCE: &str = "Distance";
pub const TAXI_IN: &str = "TaxiIn";
pub const TAXI_OUT: &str = "TaxiOut";
pub const CARRIER_DELAY: &str = "CarrierDelay";
pub const WEATHER_DELAY: &str = "WeatherDelay";
pub const NAS_DELAY: &str = "NASDelay";
pub const SECURITY_DELAY: &str = "SecurityDelay";
pub const LATE_AIRCRAFT_DELAY: &str = "LateAircraftDelay";

pub const TOTAL_DELAY_MINUTES: &str = "TotalDelayMinutes";
pub const ON_TIME: &str = "OnTime";
pub const DELAY_PER_100_MILES: &str = "Delay_per_100_miles";
pub const MONTH: &str = "Month";

/// Day-month-year, e.g. `03-01-2019`
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Categorical columns kept as text.
pub const TEXT_COLUMNS: [&str; 3] = [AIRLINE, ORIGIN, DEST];

/// Columns coerced to numbers by the cleaner, in source order.
pub const NUMERIC_COLUMNS: [&str; 15] = [
    DEP_TIME,
    ARR_TIME,
    CRS_ARR_TIME,
    ACTUAL_ELAPSED_TIME,
    CRS_ELAPSED_TIME,
    AIR_TIME,
    ARR_DELAY,
    DISTANCE,
    TAXI_IN,
    TAXI_OUT,
    CARRIER_DELAY,
    WEATHER_DELAY,
    NAS_DELAY,
    SECURITY_DELAY,
    LATE_AIRCRAFT_DELAY,
];

/// The only columns where an absent value is replaced with 0.
pub const ZERO_FILLED_COLUMNS: [&str; 6] = [
    CARRIER_DELAY,
    WEATHER_DELAY,
    NAS_DELAY,
    SECURITY_DELAY,
    LATE_AIRCRAFT_DELAY,
    ARR_DELAY,
];

pub const DERIVED_COLUMNS: [&str; 4] = [TOTAL_DELAY_MINUTES, ON_TIME, DELAY_PER_100_MILES, MONTH];

/// Every column the loader requires in the header row, in export order.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    std::iter::once(DATE)
        .chain(TEXT_COLUMNS)
        .chain(NUMERIC_COLUMNS)
}

/// Number of columns a cleaned and enriched flight exposes.
pub const EXPORT_COLUMN_COUNT: usize =
    1 + TEXT_COLUMNS.len() + NUMERIC_COLUMNS.len() + DERIVED_COLUMNS.len();

/// Columns written by the CSV export: the source columns followed by the derived ones.
pub fn export_columns() -> impl Iterator<Item = &'static str> {
    required_columns().chain(DERIVED_COLUMNS)
}

/// The five delay components that make up `TotalDelayMinutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DelayKind {
    Carrier,
    Weather,
    Nas,
    Security,
    LateAircraft,
}

impl DelayKind {
    pub const ALL: [DelayKind; 5] = [
        DelayKind::Carrier,
        DelayKind::Weather,
        DelayKind::Nas,
        DelayKind::Security,
        DelayKind::LateAircraft,
    ];

    /// Source column holding this component; also used as its display label.
    pub fn column(&self) -> &'static str {
        match self {
            DelayKind::Carrier => CARRIER_DELAY,
            DelayKind::Weather => WEATHER_DELAY,
            DelayKind::Nas => NAS_DELAY,
            DelayKind::Security => SECURITY_DELAY,
            DelayKind::LateAircraft => LATE_AIRCRAFT_DELAY,
        }
    }
}

impl fmt::Display for DelayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}
