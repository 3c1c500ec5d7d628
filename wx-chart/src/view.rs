//! The chart view-model: everything an external renderer needs to draw one
//! city chart, with no further computation.
//!
//! All structs derive `Serialize` so the view can be handed to a D3.js (or any
//! other) renderer as JSON.

use crate::{
    brush::BrushSelection,
    layout::ChartLayout,
    scale::{band_width, LinearScale, TimeScale},
};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use wx_core::{
    city::City,
    dataset::Dataset,
    interval::DateInterval,
    record::DailyWeatherRecord,
    summary::SummaryStats,
    Result, WeatherError,
};
use wx_utils::dates::{midnight, to_date_string};

pub const X_AXIS_LABEL: &str = "Date";
pub const Y_AXIS_LABEL: &str = "Temperature Anomaly (°F)";

/// Bar and text color: red for warmer than average, blue otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    Red,
    Blue,
}

impl Fill {
    pub fn for_anomaly(anomaly: f64) -> Fill {
        if anomaly > 0.0 {
            Fill::Red
        } else {
            Fill::Blue
        }
    }
}

/// A label/value pair of hover or panel text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub label: String,
    pub value: String,
}

impl TextLine {
    fn new(label: &str, value: String) -> TextLine {
        TextLine {
            label: label.to_string(),
            value,
        }
    }
}

/// One day's anomaly bar, in plotting-cell coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub anomaly: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Fill,
    pub tooltip: Vec<TextLine>,
}

/// The horizontal zero-anomaly line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Baseline {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

/// A colored line of the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelLine {
    pub label: String,
    pub value: String,
    pub fill: Fill,
}

/// The summary box beside the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryPanel {
    pub origin: (f64, f64),
    pub width: f64,
    pub height: f64,
    pub heading: String,
    pub range_text: String,
    pub lines: Vec<PanelLine>,
    pub stats: SummaryStats,
}

impl SummaryPanel {
    pub fn from_stats(stats: SummaryStats, layout: &ChartLayout) -> SummaryPanel {
        let line = |label: &str, anomaly: f64| PanelLine {
            label: label.to_string(),
            value: format!("{}°F", anomaly),
            fill: Fill::for_anomaly(anomaly),
        };
        let lines = vec![
            line("Average Temperature Anomaly in Range:", stats.average_anomaly),
            line(
                "Warmest Temperature Anomaly in Range:",
                stats.warmest_record.average_temp_anomaly,
            ),
            line(
                "Coldest Temperature Anomaly in Range:",
                stats.coldest_record.average_temp_anomaly,
            ),
        ];
        SummaryPanel {
            origin: layout.panel_origin(),
            width: layout.panel_width,
            height: layout.panel_height,
            heading: "Summary:".to_string(),
            range_text: format!(
                "Showing Dates: {} to {}",
                to_date_string(&stats.range_start),
                to_date_string(&stats.range_end)
            ),
            lines,
            stats,
        }
    }

    /// The panel as plain text, one entry per line.
    pub fn text_lines(&self) -> Vec<String> {
        let mut text = vec![self.heading.clone(), self.range_text.clone()];
        text.extend(
            self.lines
                .iter()
                .map(|line| format!("{} {}", line.label, line.value)),
        );
        text
    }
}

/// A complete city chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub city_code: String,
    pub title: String,
    pub layout: ChartLayout,
    pub x_axis_label: String,
    pub y_axis_label: String,
    /// First day and the day after the last, the extent of the x axis
    pub x_domain: (NaiveDate, NaiveDate),
    pub y_domain: (f64, f64),
    pub bars: Vec<Bar>,
    pub baseline: Baseline,
    pub summary: SummaryPanel,
}

impl ChartView {
    /// Project a dataset and a selected interval onto a chart.
    ///
    /// Every record with a non-zero anomaly becomes a bar; the summary panel
    /// covers only `interval`. Fails with `EmptyRange` when the interval
    /// selects nothing, in which case a caller keeps showing its previous view.
    pub fn project(
        city: &City,
        dataset: &Dataset,
        interval: &DateInterval,
        layout: &ChartLayout,
    ) -> Result<ChartView> {
        let stats = dataset.summarize(interval)?;
        let (Some(first), Some(last), Some(x_scale)) = (
            dataset.first_date(),
            dataset.last_date(),
            TimeScale::for_dataset(dataset, layout),
        ) else {
            return Err(WeatherError::EmptyRange {
                start: interval.start,
                end: interval.end,
            });
        };
        let y_scale = LinearScale::for_temperature(layout);
        let width = band_width(dataset.len(), layout);

        let bars: Vec<Bar> = dataset
            .records()
            .iter()
            .filter_map(|record| anomaly_bar(record, &x_scale, &y_scale, width))
            .collect();
        debug!(
            "{}: projected {} bars, summary over {}",
            city.code,
            bars.len(),
            interval
        );

        Ok(ChartView {
            city_code: city.code.clone(),
            title: city.name.clone(),
            layout: layout.clone(),
            x_axis_label: X_AXIS_LABEL.to_string(),
            y_axis_label: Y_AXIS_LABEL.to_string(),
            x_domain: (first, last.succ_opt().unwrap_or(last)),
            y_domain: layout.temperature_domain,
            bars,
            baseline: Baseline {
                x1: 0.0,
                x2: layout.cell_width(),
                y: y_scale.scale(0.0),
            },
            summary: SummaryPanel::from_stats(stats, layout),
        })
    }

    /// Project with the interval selected by the current brush.
    pub fn project_brush(
        city: &City,
        dataset: &Dataset,
        brush: &BrushSelection,
        layout: &ChartLayout,
    ) -> Result<ChartView> {
        // only an empty dataset has no interval, and it summarizes to EmptyRange either way
        let interval = brush
            .to_interval(dataset, layout)
            .unwrap_or(DateInterval::new(NaiveDate::MAX, NaiveDate::MIN));
        ChartView::project(city, dataset, &interval, layout)
    }
}

fn anomaly_bar(
    record: &DailyWeatherRecord,
    x_scale: &TimeScale,
    y_scale: &LinearScale,
    width: f64,
) -> Option<Bar> {
    let anomaly = record.average_temp_anomaly;
    let zero = y_scale.scale(0.0);
    let (y, height) = if anomaly > 0.0 {
        (y_scale.scale(anomaly), zero - y_scale.scale(anomaly))
    } else if anomaly < 0.0 {
        (zero, zero - y_scale.scale(-anomaly))
    } else {
        // zero and NaN anomalies draw nothing
        return None;
    };
    Some(Bar {
        date: record.date,
        anomaly,
        x: x_scale.scale(midnight(&record.date)),
        y,
        width,
        height,
        fill: Fill::for_anomaly(anomaly),
        tooltip: vec![
            TextLine::new("Date", to_date_string(&record.date)),
            TextLine::new("Temperature Anomaly", format!("{} °F", anomaly)),
            TextLine::new(
                "Average Mean Temperature",
                format!("{} °F", record.average_mean_temp),
            ),
            TextLine::new(
                "Actual Mean Temperature",
                format!("{} °F", record.actual_mean_temp),
            ),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wx_core::record::IngestPolicy;

    const KSEA_WEEK: &str = "\
date,actual_mean_temp,actual_min_temp,actual_max_temp,average_min_temp,average_max_temp
2014-7-1,62,52,72,54,74
2014-7-2,66,56,76,54,74
2014-7-3,65,54,76,55,75
2014-7-4,63,56,70,55,75
2014-7-5,71,58,84,55,75
2014-7-6,68,59,77,55,75
2014-7-7,M,59,72,55,75
";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seattle() -> (City, Dataset) {
        let city = City::lookup("KSEA").unwrap();
        let dataset = Dataset::from_csv_str("KSEA", KSEA_WEEK, IngestPolicy::Permissive).unwrap();
        (city, dataset)
    }

    #[test]
    fn test_project_full_span() {
        let (city, dataset) = seattle();
        let layout = ChartLayout::default();
        let span = dataset.full_span().unwrap();
        let view = ChartView::project(&city, &dataset, &span, &layout).unwrap();

        assert_eq!(view.title, "Seattle, Washington");
        assert_eq!(view.x_domain, (ymd(2014, 7, 1), ymd(2014, 7, 8)));
        // anomalies: -2, 2, 0, -2, 6, 3, NaN; zero and NaN draw nothing
        let dates: Vec<NaiveDate> = view.bars.iter().map(|bar| bar.date).collect();
        assert_eq!(
            dates,
            vec![
                ymd(2014, 7, 1),
                ymd(2014, 7, 2),
                ymd(2014, 7, 4),
                ymd(2014, 7, 5),
                ymd(2014, 7, 6)
            ]
        );
        assert_eq!(view.baseline.y, 210.0);
        assert_eq!(view.summary.stats.day_count, 7);
        assert!(view.summary.stats.average_anomaly.is_nan());
    }

    #[test]
    fn test_bar_geometry_and_fill() {
        let (city, dataset) = seattle();
        let layout = ChartLayout::default();
        let span = dataset.full_span().unwrap();
        let view = ChartView::project(&city, &dataset, &span, &layout).unwrap();

        // 420px for 70 degrees: 6px per degree
        let cold = &view.bars[0];
        assert_eq!(cold.fill, Fill::Blue);
        assert_eq!(cold.x, 0.0);
        assert_eq!(cold.y, 210.0);
        assert_eq!(cold.height, 12.0);

        let warm = &view.bars[3];
        assert_eq!(warm.date, ymd(2014, 7, 5));
        assert_eq!(warm.fill, Fill::Red);
        assert_eq!(warm.y, 174.0);
        assert_eq!(warm.height, 36.0);
        // 720px over 7 days, Jul 5 is 4 days in
        assert!((warm.x - 720.0 * 4.0 / 7.0).abs() < 1e-9);

        let expected_width = (720.0 - 80.0) / 7.0;
        assert!(view.bars.iter().all(|bar| bar.width == expected_width));
    }

    #[test]
    fn test_tooltip_text() {
        let (city, dataset) = seattle();
        let span = dataset.full_span().unwrap();
        let view = ChartView::project(&city, &dataset, &span, &ChartLayout::default()).unwrap();
        let tooltip: Vec<(String, String)> = view.bars[0]
            .tooltip
            .iter()
            .map(|line| (line.label.clone(), line.value.clone()))
            .collect();
        assert_eq!(
            tooltip,
            vec![
                ("Date".to_string(), "Tue Jul 01 2014".to_string()),
                ("Temperature Anomaly".to_string(), "-2 °F".to_string()),
                ("Average Mean Temperature".to_string(), "64 °F".to_string()),
                ("Actual Mean Temperature".to_string(), "62 °F".to_string()),
            ]
        );
    }

    #[test]
    fn test_summary_panel_for_sub_range() {
        let (city, dataset) = seattle();
        let interval = DateInterval::new(ymd(2014, 7, 1), ymd(2014, 7, 3));
        let view = ChartView::project(&city, &dataset, &interval, &ChartLayout::default()).unwrap();
        assert_eq!(
            view.summary.text_lines(),
            vec![
                "Summary:".to_string(),
                "Showing Dates: Tue Jul 01 2014 to Thu Jul 03 2014".to_string(),
                "Average Temperature Anomaly in Range: 0°F".to_string(),
                "Warmest Temperature Anomaly in Range: 2°F".to_string(),
                "Coldest Temperature Anomaly in Range: -2°F".to_string(),
            ]
        );
        let fills: Vec<Fill> = view.summary.lines.iter().map(|line| line.fill).collect();
        assert_eq!(fills, vec![Fill::Blue, Fill::Red, Fill::Blue]);
        assert_eq!(view.summary.origin, (810.0, 40.0));
        // bars still cover the whole dataset
        assert_eq!(view.bars.len(), 5);
    }

    #[test]
    fn test_project_is_idempotent() {
        let (city, dataset) = seattle();
        let layout = ChartLayout::default();
        let interval = DateInterval::new(ymd(2014, 7, 2), ymd(2014, 7, 6));
        let a = ChartView::project(&city, &dataset, &interval, &layout).unwrap();
        let b = ChartView::project(&city, &dataset, &interval, &layout).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_project_empty_range() {
        let (city, dataset) = seattle();
        let interval = DateInterval::new(ymd(2015, 1, 1), ymd(2015, 1, 31));
        assert!(matches!(
            ChartView::project(&city, &dataset, &interval, &ChartLayout::default()),
            Err(WeatherError::EmptyRange { .. })
        ));
    }

    #[test]
    fn test_project_brush() {
        let (city, dataset) = seattle();
        let layout = ChartLayout::default();
        let cleared =
            ChartView::project_brush(&city, &dataset, &BrushSelection::cleared(), &layout).unwrap();
        assert_eq!(cleared.summary.stats.range_start, ymd(2014, 7, 1));
        assert_eq!(cleared.summary.stats.range_end, ymd(2014, 7, 7));

        // a brush over the first 3 of 7 days
        let brushed = ChartView::project_brush(
            &city,
            &dataset,
            &BrushSelection::extent(0.0, 720.0 * 2.0 / 7.0),
            &layout,
        )
        .unwrap();
        assert_eq!(brushed.summary.stats.range_start, ymd(2014, 7, 1));
        assert_eq!(brushed.summary.stats.range_end, ymd(2014, 7, 3));
        assert_eq!(brushed.summary.stats.day_count, 3);

        let empty = Dataset::from_records("KSEA", Vec::new());
        assert!(matches!(
            ChartView::project_brush(&city, &empty, &BrushSelection::cleared(), &layout),
            Err(WeatherError::EmptyRange { .. })
        ));
    }

    #[test]
    fn test_view_serializes_for_renderer() {
        let (city, dataset) = seattle();
        let span = dataset.full_span().unwrap();
        let view = ChartView::project(&city, &dataset, &span, &ChartLayout::default()).unwrap();
        let json: serde_json::Value = serde_json::to_value(&view).unwrap();
        assert_eq!(json["city_code"], "KSEA");
        assert_eq!(json["bars"][0]["fill"], "blue");
        assert_eq!(json["bars"][0]["date"], "2014-07-01");
        assert_eq!(json["summary"]["lines"][1]["fill"], "red");
    }
}
