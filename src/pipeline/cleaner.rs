//! Type coercion and missing value handling
//!
//! Every cell is parsed on its own: an unparseable date or number becomes
//! absent for that record only. The five delay components and `ArrDelay`
//! are then zero-filled; no other column receives a default.

use chrono::NaiveDate;
use polars::prelude::*;

use super::error::Result;
use super::model::FlightRecord;
use super::schema::{self, DATE_FORMAT, NUMERIC_COLUMNS, TEXT_COLUMNS, ZERO_FILLED_COLUMNS};

/// Counts of absent cells observed while cleaning, before zero-filling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningStats {
    pub rows: usize,
    /// Empty or unparseable `Date` cells
    pub absent_dates: usize,
    /// Per numeric column, in schema order
    pub absent_numeric: Vec<(String, usize)>,
}

impl CleaningStats {
    /// Absent count for one numeric column (0 for unknown names).
    pub fn absent(&self, column: &str) -> usize {
        self.absent_numeric
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Number of cells replaced with 0, summed over the zero-filled columns.
    pub fn zero_filled(&self) -> usize {
        ZERO_FILLED_COLUMNS.iter().map(|c| self.absent(c)).sum()
    }

    /// Missing ratio per column (including `Date`), sorted descending.
    pub fn missing_ratios(&self) -> Vec<(String, f64)> {
        if self.rows == 0 {
            return Vec::new();
        }
        let total = self.rows as f64;

        let mut ratios: Vec<(String, f64)> = std::iter::once((schema::DATE.to_string(), self.absent_dates))
            .chain(self.absent_numeric.iter().cloned())
            .map(|(name, count)| (name, count as f64 / total))
            .collect();

        // Stable sort keeps schema order among equal ratios
        ratios.sort_by(|a, b| b.1.total_cmp(&a.1));
        ratios
    }
}

/// Parse a `DD-MM-YYYY` date; empty or malformed input is absent.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let text = raw.map(str::trim).filter(|s| !s.is_empty())?;
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Parse a finite number; empty, malformed, `NaN` and infinite input is absent.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let text = raw.map(str::trim).filter(|s| !s.is_empty())?;
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Position of `Date` in `required_columns()` order.
const DATE_INDEX: usize = 0;
/// Position of the first text column.
const TEXT_OFFSET: usize = 1;
/// Position of the first numeric column.
const NUMERIC_OFFSET: usize = TEXT_OFFSET + TEXT_COLUMNS.len();

/// Required columns of a frame cast to text, in `required_columns()` order.
struct TextColumns {
    columns: Vec<StringChunked>,
}

impl TextColumns {
    fn from_frame(df: &DataFrame) -> Result<Self> {
        let columns = schema::required_columns()
            .map(|name| -> Result<StringChunked> {
                let column = df.column(name)?.cast(&DataType::String)?;
                Ok(column.str()?.clone())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns })
    }

    fn cell(&self, index: usize, row: usize) -> Option<&str> {
        self.columns[index].get(row)
    }

    fn text(&self, index: usize, row: usize) -> String {
        self.cell(index, row).map(|s| s.trim().to_string()).unwrap_or_default()
    }
}

/// Convert a text frame into cleaned records, in row order.
///
/// The frame must already have passed the loader's schema check.
pub fn clean_frame(df: &DataFrame) -> Result<(Vec<FlightRecord>, CleaningStats)> {
    let cells = TextColumns::from_frame(df)?;
    let rows = df.height();

    let mut absent = [0usize; NUMERIC_COLUMNS.len()];
    let mut absent_dates = 0;
    let mut records = Vec::with_capacity(rows);

    for row in 0..rows {
        let date = parse_date(cells.cell(DATE_INDEX, row));
        if date.is_none() {
            absent_dates += 1;
        }

        let mut numbers = [None; NUMERIC_COLUMNS.len()];
        for (i, value) in numbers.iter_mut().enumerate() {
            *value = parse_number(cells.cell(NUMERIC_OFFSET + i, row));
            if value.is_none() {
                absent[i] += 1;
            }
        }
        // NUMERIC_COLUMNS order
        let [
            dep_time,
            arr_time,
            crs_arr_time,
            actual_elapsed_time,
            crs_elapsed_time,
            air_time,
            arr_delay,
            distance,
            taxi_in,
            taxi_out,
            carrier_delay,
            weather_delay,
            nas_delay,
            security_delay,
            late_aircraft_delay,
        ] = numbers;

        records.push(FlightRecord {
            date,
            airline: cells.text(TEXT_OFFSET, row),
            origin: cells.text(TEXT_OFFSET + 1, row),
            dest: cells.text(TEXT_OFFSET + 2, row),
            dep_time,
            arr_time,
            crs_arr_time,
            actual_elapsed_time,
            crs_elapsed_time,
            air_time,
            arr_delay: arr_delay.unwrap_or(0.0),
            distance,
            taxi_in,
            taxi_out,
            carrier_delay: carrier_delay.unwrap_or(0.0),
            weather_delay: weather_delay.unwrap_or(0.0),
            nas_delay: nas_delay.unwrap_or(0.0),
            security_delay: security_delay.unwrap_or(0.0),
            late_aircraft_delay: late_aircraft_delay.unwrap_or(0.0),
        });
    }

    let stats = CleaningStats {
        rows,
        absent_dates,
        absent_numeric: NUMERIC_COLUMNS
            .iter()
            .zip(absent)
            .map(|(name, count)| (name.to_string(), count))
            .collect(),
    };

    log::debug!(
        "Cleaned {} row(s): {} absent date(s), {} delay cell(s) zero-filled",
        rows,
        stats.absent_dates,
        stats.zero_filled()
    );

    Ok((records, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_day_month_year() {
        assert_eq!(
            parse_date(Some("03-01-2019")),
            NaiveDate::from_ymd_opt(2019, 1, 3)
        );
        assert_eq!(
            parse_date(Some(" 31-12-2019 ")),
            NaiveDate::from_ymd_opt(2019, 12, 31)
        );
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert_eq!(parse_date(Some("2019-01-03")), None);
        assert_eq!(parse_date(Some("31-02-2019")), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some("42")), Some(42.0));
        assert_eq!(parse_number(Some("-7.5")), Some(-7.5));
        assert_eq!(parse_number(Some(" 12 ")), Some(12.0));
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(Some("inf")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn test_missing_ratios_sorted_descending() {
        let stats = CleaningStats {
            rows: 4,
            absent_dates: 1,
            absent_numeric: vec![
                ("DepTime".to_string(), 0),
                ("ArrDelay".to_string(), 2),
                ("Distance".to_string(), 4),
            ],
        };

        let ratios = stats.missing_ratios();
        assert_eq!(ratios[0], ("Distance".to_string(), 1.0));
        assert_eq!(ratios[1], ("ArrDelay".to_string(), 0.5));
        assert_eq!(ratios[2], ("Date".to_string(), 0.25));
        assert_eq!(ratios[3], ("DepTime".to_string(), 0.0));
        assert_eq!(stats.zero_filled(), 2);
    }

    #[test]
    fn test_column_offsets_follow_required_order() {
        let names: Vec<&str> = schema::required_columns().collect();

        assert_eq!(names[DATE_INDEX], schema::DATE);
        assert_eq!(&names[TEXT_OFFSET..NUMERIC_OFFSET], &TEXT_COLUMNS[..]);
        assert_eq!(&names[NUMERIC_OFFSET..], &NUMERIC_COLUMNS[..]);
    }

    #[test]
    fn test_missing_ratios_empty() {
        assert!(CleaningStats::default().missing_ratios().is_empty());
    }
}
