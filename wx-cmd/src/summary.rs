//! Summary command: average, warmest and coldest anomaly over a date range.

use crate::{loader, DataArgs};
use anyhow::Context;
use chrono::NaiveDate;
use log::warn;
use serde::Serialize;
use wx_chart::{layout::ChartLayout, view::SummaryPanel};
use wx_core::{
    city::{City, CitySelection},
    dataset::Dataset,
    interval::DateInterval,
    summary::SummaryStats,
    WeatherError,
};

/// One city's summary, as printed with `--json`.
#[derive(Debug, Serialize)]
pub struct CitySummary {
    pub city: City,
    pub stats: SummaryStats,
}

/// The interval to summarize: omitted bounds fall back to the dataset's edges.
pub fn resolve_interval(
    dataset: &Dataset,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> DateInterval {
    // with no data and no bound the interval is inverted and selects nothing
    DateInterval::new(
        start.or(dataset.first_date()).unwrap_or(NaiveDate::MAX),
        end.or(dataset.last_date()).unwrap_or(NaiveDate::MIN),
    )
}

/// Summarize every loaded city over the requested range.
///
/// With `skip_empty`, cities whose range selects no records are left out
/// with a warning; otherwise the first `EmptyRange` is returned.
pub fn summarize_cities(
    loaded: &[(City, Dataset)],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    skip_empty: bool,
) -> anyhow::Result<Vec<CitySummary>> {
    let mut summaries = Vec::new();
    for (city, dataset) in loaded {
        let interval = resolve_interval(dataset, start, end);
        match dataset.summarize(&interval) {
            Ok(stats) => summaries.push(CitySummary {
                city: city.clone(),
                stats,
            }),
            Err(e @ WeatherError::EmptyRange { .. }) if skip_empty => {
                warn!("{}: {}", city.code, e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to summarize {}", city.code));
            }
        }
    }
    Ok(summaries)
}

/// Text rendering: the city name followed by its indented summary panel.
pub fn format_summaries(summaries: &[CitySummary]) -> String {
    let layout = ChartLayout::default();
    let mut out = String::new();
    for summary in summaries {
        out.push_str(&summary.city.name);
        out.push('\n');
        let panel = SummaryPanel::from_stats(summary.stats.clone(), &layout);
        for line in panel.text_lines() {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

pub async fn run_summary(
    data: &DataArgs,
    city: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let selection = CitySelection::parse(city)?;
    let loaded = loader::load_selection(&data.data_dir, &selection, data.policy()).await?;
    let summaries = summarize_cities(&loaded, start, end, selection == CitySelection::All)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", format_summaries(&summaries));
    }
    Ok(())
}
