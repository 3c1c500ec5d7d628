use crate::{
    error::{Result, WeatherError},
    interval::DateInterval,
    record::DailyWeatherRecord,
};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use wx_utils::numbers::round_to_hundredths;

/// Summary of the temperature anomaly over a selected date range.
///
/// Computed fresh for every selection; there is no incremental state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Mean anomaly over the range, rounded to two decimals
    pub average_anomaly: f64,
    /// Record with the largest anomaly; the earliest wins ties
    pub warmest_record: DailyWeatherRecord,
    /// Record with the smallest anomaly; the earliest wins ties
    pub coldest_record: DailyWeatherRecord,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    /// Number of records inside the range
    pub day_count: usize,
}

/// Summarize the records whose date falls inside `interval` (both ends inclusive).
///
/// `records` must be in ascending date order for the tie-break to pick the
/// earliest record. Fails with `EmptyRange` when nothing is selected, which
/// includes every inverted interval.
pub fn summarize(records: &[DailyWeatherRecord], interval: &DateInterval) -> Result<SummaryStats> {
    let mut selected = records.iter().filter(|record| interval.contains(&record.date));

    let first = selected.next().ok_or(WeatherError::EmptyRange {
        start: interval.start,
        end: interval.end,
    })?;

    let mut sum = first.average_temp_anomaly;
    let mut count = 1usize;
    let mut warmest = first;
    let mut coldest = first;
    for record in selected {
        sum += record.average_temp_anomaly;
        count += 1;
        if record.average_temp_anomaly > warmest.average_temp_anomaly {
            warmest = record;
        }
        if record.average_temp_anomaly < coldest.average_temp_anomaly {
            coldest = record;
        }
    }

    let average_anomaly = round_to_hundredths(sum / count as f64);
    debug!(
        "summarized {} records in {}: average {}, warmest {}, coldest {}",
        count, interval, average_anomaly, warmest.date, coldest.date
    );

    Ok(SummaryStats {
        average_anomaly,
        warmest_record: warmest.clone(),
        coldest_record: coldest.clone(),
        range_start: interval.start,
        range_end: interval.end,
        day_count: count,
    })
}
