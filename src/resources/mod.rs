/**
 * This module contains all logic for loading the wall's models from external files.
 *
 * Loading is a strictly sequential chain: the request for asset `i + 1` is
 * only issued once asset `i` has either registered or failed. A failure is
 * logged and skipped; it never stops the chain.
 */
pub mod fetch;
pub mod mesh;

use std::future::Future;

use log::{error, info};

use crate::{
    config::WallConfig,
    data_structures::{model::Model, panel::PanelIndex},
    error::AssetLoadError,
};

/// One named resource and the model slot it fills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRequest {
    pub slot: PanelIndex,
    pub name: String,
}

/// The eight requests in load order, slot `i` paired with the `i`-th name.
pub fn asset_plan(config: &WallConfig) -> Vec<AssetRequest> {
    PanelIndex::all()
        .zip(config.asset_names())
        .map(|(slot, name)| AssetRequest { slot, name })
        .collect()
}

/// Where models come from.
pub trait AssetSource {
    fn load(&self, name: &str) -> impl Future<Output = Result<Model, AssetLoadError>>;
}

/// Reads glb files from a directory (or, on the web, from the matching path
/// below the page origin).
#[derive(Clone, Debug)]
pub struct FileAssetSource {
    dir: String,
}

impl FileAssetSource {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }
}

impl AssetSource for FileAssetSource {
    async fn load(&self, name: &str) -> Result<Model, AssetLoadError> {
        let bytes = fetch::load_binary(&self.dir, name).await?;
        mesh::load_model_gltf(&self.dir, name, &bytes).await
    }
}

/// What happened to one request.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { slot: PanelIndex, model: Model },
    Failed { slot: PanelIndex, error: AssetLoadError },
}

impl LoadOutcome {
    pub fn slot(&self) -> PanelIndex {
        match self {
            LoadOutcome::Loaded { slot, .. } | LoadOutcome::Failed { slot, .. } => *slot,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: Vec<PanelIndex>,
    pub failed: Vec<String>,
}

/// Loads every request in order, awaiting each before starting the next.
///
/// `on_outcome` sees every outcome in request order, successes and failures
/// alike. Failures are logged at error level and then skipped.
pub async fn load_all<S, F>(source: &S, requests: &[AssetRequest], mut on_outcome: F) -> LoadSummary
where
    S: AssetSource,
    F: FnMut(LoadOutcome),
{
    let mut summary = LoadSummary::default();
    for request in requests {
        let started = instant::Instant::now();
        match source.load(&request.name).await {
            Ok(model) => {
                info!(
                    "Loaded {} into slot {} in {:?}",
                    request.name,
                    request.slot,
                    started.elapsed()
                );
                summary.loaded.push(request.slot);
                on_outcome(LoadOutcome::Loaded {
                    slot: request.slot,
                    model,
                });
            }
            Err(e) => {
                error!("Error loading model {}: {}", request.name, e);
                summary.failed.push(request.name.clone());
                on_outcome(LoadOutcome::Failed {
                    slot: request.slot,
                    error: e,
                });
            }
        }
    }
    info!(
        "Asset chain finished: {} loaded, {} failed",
        summary.loaded.len(),
        summary.failed.len()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_pairs_slots_with_numbered_names() {
        let plan = asset_plan(&WallConfig::default());
        assert_eq!(plan.len(), 8);
        assert_eq!(plan[0].slot.get(), 0);
        assert_eq!(plan[0].name, "number1.glb");
        assert_eq!(plan[7].slot.get(), 7);
        assert_eq!(plan[7].name, "number8.glb");
    }
}
