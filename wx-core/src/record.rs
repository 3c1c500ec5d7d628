use crate::error::{Result, WeatherError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};
use wx_utils::{dates::parse_calendar_date, numbers::parse_leading_int};

/// Column holding the observation date.
pub const DATE_COLUMN: &str = "date";
pub const ACTUAL_MAX_TEMP_COLUMN: &str = "actual_max_temp";
pub const ACTUAL_MEAN_TEMP_COLUMN: &str = "actual_mean_temp";
pub const ACTUAL_MIN_TEMP_COLUMN: &str = "actual_min_temp";
pub const AVERAGE_MAX_TEMP_COLUMN: &str = "average_max_temp";
pub const AVERAGE_MIN_TEMP_COLUMN: &str = "average_min_temp";

/// A temperature reading in whole degrees Fahrenheit.
/// - `Degrees(i32)`: the leading integer of the source field
/// - `NotANumber`: the source field had no leading integer
///
/// Arithmetic goes through [`Temperature::as_f64`], so a `NotANumber`
/// field turns every value derived from it into NaN.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Degrees(i32),
    NotANumber,
}

impl Temperature {
    /// Parse a raw field like a permissive integer parser ("72.5" reads as 72).
    pub fn parse(raw: &str) -> Temperature {
        match parse_leading_int(raw) {
            Some(degrees) => Temperature::Degrees(degrees),
            None => Temperature::NotANumber,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Temperature::Degrees(degrees) => f64::from(*degrees),
            Temperature::NotANumber => f64::NAN,
        }
    }

    pub fn degrees(&self) -> Option<i32> {
        match self {
            Temperature::Degrees(degrees) => Some(*degrees),
            Temperature::NotANumber => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Temperature::NotANumber)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Degrees(degrees) => write!(f, "{}", degrees),
            Temperature::NotANumber => write!(f, "NaN"),
        }
    }
}

/// How unparseable temperature fields are handled at ingest.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum IngestPolicy {
    /// Keep the row, mark the field `NotANumber` and let NaN propagate.
    #[default]
    Permissive,
    /// Reject the row with `WeatherError::InvalidTemperature`.
    Strict,
}

/// One day of weather for one city.
///
/// Deserializing reads only the date and the five readings and rebuilds the
/// derived fields with [`DailyWeatherRecord::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordReadings")]
pub struct DailyWeatherRecord {
    pub date: NaiveDate,
    pub actual_max_temp: Temperature,
    pub actual_mean_temp: Temperature,
    pub actual_min_temp: Temperature,
    /// Historical average high for this calendar day
    pub average_max_temp: Temperature,
    /// Historical average low for this calendar day
    pub average_min_temp: Temperature,
    /// `(average_max_temp + average_min_temp) / 2`, not rounded
    pub average_mean_temp: f64,
    /// `actual_mean_temp - average_mean_temp`; positive is warmer than average
    pub average_temp_anomaly: f64,
}

impl DailyWeatherRecord {
    /// Build a record from typed fields, deriving the average mean and anomaly.
    pub fn new(
        date: NaiveDate,
        actual_max_temp: Temperature,
        actual_mean_temp: Temperature,
        actual_min_temp: Temperature,
        average_max_temp: Temperature,
        average_min_temp: Temperature,
    ) -> DailyWeatherRecord {
        let average_mean_temp = average_mean(average_max_temp, average_min_temp);
        let average_temp_anomaly = actual_mean_temp.as_f64() - average_mean_temp;
        DailyWeatherRecord {
            date,
            actual_max_temp,
            actual_mean_temp,
            actual_min_temp,
            average_max_temp,
            average_min_temp,
            average_mean_temp,
            average_temp_anomaly,
        }
    }

    /// True if any temperature field failed to parse.
    pub fn has_nan(&self) -> bool {
        [
            self.actual_max_temp,
            self.actual_mean_temp,
            self.actual_min_temp,
            self.average_max_temp,
            self.average_min_temp,
        ]
        .iter()
        .any(Temperature::is_nan)
    }
}

/// The stored fields of a serialized record; derived fields are ignored.
#[derive(Deserialize)]
struct RecordReadings {
    date: NaiveDate,
    actual_max_temp: Temperature,
    actual_mean_temp: Temperature,
    actual_min_temp: Temperature,
    average_max_temp: Temperature,
    average_min_temp: Temperature,
}

impl From<RecordReadings> for DailyWeatherRecord {
    fn from(readings: RecordReadings) -> Self {
        DailyWeatherRecord::new(
            readings.date,
            readings.actual_max_temp,
            readings.actual_mean_temp,
            readings.actual_min_temp,
            readings.average_max_temp,
            readings.average_min_temp,
        )
    }
}

fn average_mean(average_max_temp: Temperature, average_min_temp: Temperature) -> f64 {
    (average_max_temp.as_f64() + average_min_temp.as_f64()) / 2.0
}

/// Normalize a raw CSV row, propagating unparseable temperatures as NaN.
///
/// Columns other than the date and the five temperature columns are ignored.
pub fn normalize(raw_row: &HashMap<String, String>) -> Result<DailyWeatherRecord> {
    normalize_with(raw_row, IngestPolicy::Permissive)
}

/// Normalize a raw CSV row under the given ingest policy.
pub fn normalize_with(
    raw_row: &HashMap<String, String>,
    policy: IngestPolicy,
) -> Result<DailyWeatherRecord> {
    let date_text = raw_row.get(DATE_COLUMN).map(String::as_str).unwrap_or("");
    let date = parse_calendar_date(date_text)
        .ok_or_else(|| WeatherError::InvalidDateFormat(date_text.to_string()))?;

    let temperature = |column: &str| -> Result<Temperature> {
        let raw = raw_row.get(column).map(String::as_str).unwrap_or("");
        let parsed = Temperature::parse(raw);
        if policy == IngestPolicy::Strict && parsed.is_nan() {
            return Err(WeatherError::InvalidTemperature {
                column: column.to_string(),
                value: raw.to_string(),
            });
        }
        Ok(parsed)
    };

    Ok(DailyWeatherRecord::new(
        date,
        temperature(ACTUAL_MAX_TEMP_COLUMN)?,
        temperature(ACTUAL_MEAN_TEMP_COLUMN)?,
        temperature(ACTUAL_MIN_TEMP_COLUMN)?,
        temperature(AVERAGE_MAX_TEMP_COLUMN)?,
        temperature(AVERAGE_MIN_TEMP_COLUMN)?,
    ))
}
