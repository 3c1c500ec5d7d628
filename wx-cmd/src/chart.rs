//! Chart command: project each selected city onto a `ChartView` and write
//! the views as JSON for a renderer.

use crate::{loader, DataArgs};
use anyhow::Context;
use log::{info, warn};
use std::path::Path;
use wx_chart::{brush::BrushSelection, layout::ChartLayout, view::ChartView};
use wx_core::{
    city::{City, CitySelection},
    dataset::Dataset,
    WeatherError,
};

/// The default layout, or the one read from a JSON file.
pub async fn load_layout(path: Option<&Path>) -> anyhow::Result<ChartLayout> {
    let Some(path) = path else {
        return Ok(ChartLayout::default());
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read layout {}", path.display()))?;
    ChartLayout::from_json_str(&json)
        .with_context(|| format!("Failed to parse layout {}", path.display()))
}

/// One view per loaded city, all sharing the same brush and layout.
///
/// With `skip_empty`, a city whose brushed range holds no records is left
/// out with a warning.
pub fn build_views(
    loaded: &[(City, Dataset)],
    brush: &BrushSelection,
    layout: &ChartLayout,
    skip_empty: bool,
) -> anyhow::Result<Vec<ChartView>> {
    let mut views = Vec::new();
    for (city, dataset) in loaded {
        match ChartView::project_brush(city, dataset, brush, layout) {
            Ok(view) => views.push(view),
            Err(e @ WeatherError::EmptyRange { .. }) if skip_empty => {
                warn!("{}: {}", city.code, e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to chart {}", city.code));
            }
        }
    }
    Ok(views)
}

pub async fn run_chart(
    data: &DataArgs,
    city: &str,
    brush: BrushSelection,
    layout: Option<&Path>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let selection = CitySelection::parse(city)?;
    let layout = load_layout(layout).await?;
    let loaded = loader::load_selection(&data.data_dir, &selection, data.policy()).await?;
    let views = build_views(&loaded, &brush, &layout, selection == CitySelection::All)?;

    let json = serde_json::to_string_pretty(&views)?;
    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} chart(s) to {}", views.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
