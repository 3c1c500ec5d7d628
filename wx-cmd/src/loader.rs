//! Loading city datasets from `<data_dir>/<CODE>.csv`.

use anyhow::Context;
use log::{info, warn};
use std::path::Path;
use wx_core::{
    city::{City, CitySelection},
    dataset::Dataset,
    record::IngestPolicy,
};

/// Read and normalize one city's CSV file.
pub async fn load_dataset(
    data_dir: &Path,
    city: &City,
    policy: IngestPolicy,
) -> anyhow::Result<Dataset> {
    let path = data_dir.join(city.file_name());
    info!("Loading {} from {}", city.code, path.display());
    let csv_data = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Dataset::from_csv_str(&city.code, &csv_data, policy)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load every selected city, one after another.
///
/// A single requested city must load. With `ALL`, cities whose file is
/// missing or malformed are skipped with a warning, as long as at least one loads.
pub async fn load_selection(
    data_dir: &Path,
    selection: &CitySelection,
    policy: IngestPolicy,
) -> anyhow::Result<Vec<(City, Dataset)>> {
    let mut loaded = Vec::new();
    for city in selection.cities()? {
        match load_dataset(data_dir, &city, policy).await {
            Ok(dataset) => loaded.push((city, dataset)),
            Err(e) if *selection == CitySelection::All => {
                warn!("Skipping {}: {:#}", city.code, e);
            }
            Err(e) => return Err(e),
        }
    }
    if loaded.is_empty() {
        anyhow::bail!("No city data could be loaded from {}", data_dir.display());
    }
    Ok(loaded)
}
