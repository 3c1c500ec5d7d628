//! Scales mapping data values onto chart pixels.

use crate::layout::ChartLayout;
use chrono::{NaiveDateTime, TimeDelta};
use wx_core::dataset::Dataset;
use wx_utils::dates::midnight;

/// Linear map from a date-time domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub domain: (NaiveDateTime, NaiveDateTime),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> TimeScale {
        TimeScale { domain, range }
    }

    /// The x scale of a city chart: midnight of the first day up to midnight
    /// after the last day, across the plotting cell.
    ///
    /// For a July-to-June year this is Jul 1 to the following Jul 1.
    pub fn for_dataset(dataset: &Dataset, layout: &ChartLayout) -> Option<TimeScale> {
        let first = dataset.first_date()?;
        let after_last = dataset.last_date()?.succ_opt()?;
        Some(TimeScale::new(
            (midnight(&first), midnight(&after_last)),
            (0.0, layout.cell_width()),
        ))
    }

    fn span_millis(&self) -> f64 {
        (self.domain.1 - self.domain.0).num_milliseconds() as f64
    }

    pub fn scale(&self, value: NaiveDateTime) -> f64 {
        let span = self.span_millis();
        if span == 0.0 {
            return self.range.0;
        }
        let elapsed = (value - self.domain.0).num_milliseconds() as f64;
        self.range.0 + elapsed * (self.range.1 - self.range.0) / span
    }

    /// Pixel back to date-time, to the millisecond.
    pub fn invert(&self, pixel: f64) -> NaiveDateTime {
        let width = self.range.1 - self.range.0;
        if width == 0.0 {
            return self.domain.0;
        }
        let offset = ((pixel - self.range.0) * self.span_millis() / width).round() as i64;
        self.domain.0 + TimeDelta::milliseconds(offset)
    }
}

/// Linear map from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> LinearScale {
        LinearScale { domain, range }
    }

    /// The y scale of a city chart: the temperature domain, bottom to top.
    pub fn for_temperature(layout: &ChartLayout) -> LinearScale {
        LinearScale::new(layout.temperature_domain, (layout.cell_height(), 0.0))
    }

    pub fn scale(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        self.range.0 + (value - self.domain.0) * (self.range.1 - self.range.0) / span
    }
}

/// Width of one of `count` equal bands laid across the cell, inset by the
/// left and right padding.
pub fn band_width(count: usize, layout: &ChartLayout) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let start = layout.padding.left;
    let end = layout.cell_width() - layout.padding.right;
    ((end - start) / count as f64).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at_midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        midnight(&NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_time_scale_round_trip() {
        let scale = TimeScale::new(
            (at_midnight(2015, 1, 1), at_midnight(2015, 1, 11)),
            (0.0, 720.0),
        );
        assert_eq!(scale.scale(at_midnight(2015, 1, 1)), 0.0);
        assert_eq!(scale.scale(at_midnight(2015, 1, 6)), 360.0);
        assert_eq!(scale.scale(at_midnight(2015, 1, 11)), 720.0);
        assert_eq!(scale.invert(144.0), at_midnight(2015, 1, 3));
        assert_eq!(scale.invert(720.0), at_midnight(2015, 1, 11));
    }

    #[test]
    fn test_time_scale_invert_mid_day() {
        let scale = TimeScale::new(
            (at_midnight(2015, 1, 1), at_midnight(2015, 1, 11)),
            (0.0, 720.0),
        );
        let noon = NaiveDate::from_ymd_opt(2015, 1, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(scale.invert(180.0), noon);
    }

    #[test]
    fn test_temperature_scale() {
        let layout = ChartLayout::default();
        let scale = LinearScale::for_temperature(&layout);
        assert_eq!(scale.scale(-35.0), 420.0);
        assert_eq!(scale.scale(0.0), 210.0);
        assert_eq!(scale.scale(35.0), 0.0);
    }

    #[test]
    fn test_band_width() {
        let layout = ChartLayout::default();
        assert_eq!(band_width(320, &layout), 2.0);
        assert_eq!(band_width(0, &layout), 0.0);
    }
}
