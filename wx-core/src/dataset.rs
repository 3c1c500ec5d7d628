use crate::{
    error::Result,
    interval::DateInterval,
    record::{normalize_with, DailyWeatherRecord, IngestPolicy},
    summary::{summarize, SummaryStats},
};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;

/// One city's daily weather records in ascending date order.
///
/// Immutable once built; every chart view and summary borrows from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    city: String,
    records: Vec<DailyWeatherRecord>,
}

impl Dataset {
    /// Build a dataset, sorting the records by date if they arrive out of order.
    pub fn from_records(city: &str, mut records: Vec<DailyWeatherRecord>) -> Dataset {
        if !records.is_sorted_by_key(|record| record.date) {
            warn!("{}: records out of date order, sorting", city);
            records.sort_by_key(|record| record.date);
        }
        Dataset {
            city: city.to_string(),
            records,
        }
    }

    /// Parse a city CSV (with a header row) and normalize every row.
    ///
    /// # Example CSV
    /// ```text
    /// date,actual_mean_temp,actual_min_temp,actual_max_temp,average_min_temp,average_max_temp
    /// 2014-7-1,81,72,89,68,89
    /// ```
    pub fn from_csv_str(city: &str, csv_data: &str, policy: IngestPolicy) -> Result<Dataset> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());
        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let raw_row: HashMap<String, String> = headers
                .iter()
                .cloned()
                .zip(row.iter().map(str::to_string))
                .collect();
            records.push(normalize_with(&raw_row, policy)?);
        }

        let nan_rows = records.iter().filter(|record| record.has_nan()).count();
        if nan_rows > 0 {
            warn!("{}: {} rows contain unparseable temperatures", city, nan_rows);
        }
        info!("{}: loaded {} daily records", city, records.len());
        Ok(Dataset::from_records(city, records))
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn records(&self) -> &[DailyWeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|record| record.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|record| record.date)
    }

    /// Interval from the first to the last record, or `None` for an empty dataset.
    pub fn full_span(&self) -> Option<DateInterval> {
        Some(DateInterval::new(self.first_date()?, self.last_date()?))
    }

    /// Records warmer than average.
    pub fn positives(&self) -> impl Iterator<Item = &DailyWeatherRecord> {
        self.records
            .iter()
            .filter(|record| record.average_temp_anomaly > 0.0)
    }

    /// Records colder than average.
    pub fn negatives(&self) -> impl Iterator<Item = &DailyWeatherRecord> {
        self.records
            .iter()
            .filter(|record| record.average_temp_anomaly < 0.0)
    }

    pub fn summarize(&self, interval: &DateInterval) -> Result<SummaryStats> {
        summarize(&self.records, interval)
    }

    /// Summary over the whole dataset, the view shown before any brushing.
    pub fn summarize_full_span(&self) -> Result<SummaryStats> {
        match self.full_span() {
            Some(span) => self.summarize(&span),
            None => {
                // an empty dataset has no span; an inverted interval selects nothing
                let never = DateInterval::new(NaiveDate::MAX, NaiveDate::MIN);
                self.summarize(&never)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Dataset;
    use crate::error::WeatherError;
    use crate::interval::DateInterval;
    use crate::record::{IngestPolicy, Temperature};
    use chrono::NaiveDate;

    const KSEA_WEEK: &str = "\
date,actual_mean_temp,actual_min_temp,actual_max_temp,average_min_temp,average_max_temp,average_precipitation
2014-7-1,62,52,72,54,74,0.03
2014-7-2,66,56,76,54,74,0.03
2014-7-3,65,54,76,55,75,0.03
2014-7-4,63,56,70,55,75,0.03
2014-7-5,71,58,84,55,75,0.03
2014-7-6,68,59,77,55,75,0.02
2014-7-7,65,M,72,55,75,0.02
";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_csv_str() {
        let dataset = Dataset::from_csv_str("KSEA", KSEA_WEEK, IngestPolicy::Permissive).unwrap();
        assert_eq!(dataset.city(), "KSEA");
        assert_eq!(dataset.len(), 7);
        assert_eq!(dataset.first_date(), Some(ymd(2014, 7, 1)));
        assert_eq!(dataset.last_date(), Some(ymd(2014, 7, 7)));
        // (74 + 54) / 2 = 64, 62 - 64 = -2
        assert_eq!(dataset.records()[0].average_temp_anomaly, -2.0);
        assert_eq!(dataset.records()[6].actual_min_temp, Temperature::NotANumber);
    }

    #[test]
    fn test_from_csv_str_strict_rejects_missing_reading() {
        let result = Dataset::from_csv_str("KSEA", KSEA_WEEK, IngestPolicy::Strict);
        assert!(matches!(
            result,
            Err(WeatherError::InvalidTemperature { ref column, .. }) if column == "actual_min_temp"
        ));
    }

    #[test]
    fn test_from_csv_str_bad_date() {
        let csv = "date,actual_mean_temp,actual_min_temp,actual_max_temp,average_min_temp,average_max_temp\n\
                   yesterday,62,52,72,54,74\n";
        assert!(matches!(
            Dataset::from_csv_str("KSEA", csv, IngestPolicy::Permissive),
            Err(WeatherError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_from_records_sorts_by_date() {
        let dataset = Dataset::from_csv_str("KSEA", KSEA_WEEK, IngestPolicy::Permissive).unwrap();
        let mut shuffled = dataset.records().to_vec();
        shuffled.reverse();
        let resorted = Dataset::from_records("KSEA", shuffled);
        assert_eq!(resorted, dataset);
    }

    #[test]
    fn test_positives_and_negatives() {
        let dataset = Dataset::from_csv_str("KSEA", KSEA_WEEK, IngestPolicy::Permissive).unwrap();
        let warm: Vec<NaiveDate> = dataset.positives().map(|r| r.date).collect();
        let cold: Vec<NaiveDate> = dataset.negatives().map(|r| r.date).collect();
        // anomalies: -2, 2, 0, -2, 6, 3, 0
        assert_eq!(warm, vec![ymd(2014, 7, 2), ymd(2014, 7, 5), ymd(2014, 7, 6)]);
        assert_eq!(cold, vec![ymd(2014, 7, 1), ymd(2014, 7, 4)]);
    }

    #[test]
    fn test_summarize_full_span() {
        let dataset = Dataset::from_csv_str("KSEA", KSEA_WEEK, IngestPolicy::Permissive).unwrap();
        let stats = dataset.summarize_full_span().unwrap();
        // (-2 + 2 + 0 - 2 + 6 + 3 + 0) / 7 = 1
        assert_eq!(stats.average_anomaly, 1.0);
        assert_eq!(stats.warmest_record.date, ymd(2014, 7, 5));
        assert_eq!(stats.coldest_record.date, ymd(2014, 7, 1));
        assert_eq!(stats.range_start, ymd(2014, 7, 1));
        assert_eq!(stats.range_end, ymd(2014, 7, 7));
        assert_eq!(
            stats,
            dataset
                .summarize(&DateInterval::new(ymd(2014, 7, 1), ymd(2014, 7, 7)))
                .unwrap()
        );
    }

    #[test]
    fn test_summarize_full_span_of_empty_dataset() {
        let dataset = Dataset::from_records("KSEA", Vec::new());
        assert!(dataset.full_span().is_none());
        assert!(matches!(
            dataset.summarize_full_span(),
            Err(WeatherError::EmptyRange { .. })
        ));
    }
}
