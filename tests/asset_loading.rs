use ethos_wall::{
    config::WallConfig,
    data_structures::{panel::PanelIndex, scene_graph::SceneRegistry},
    error::AssetLoadErrorKind,
    flow::WallEvent,
    resources::{AssetSource, FileAssetSource, LoadOutcome, asset_plan, load_all},
};

use crate::common::test_utils::{RecordingSource, test_wall};

mod common;

fn slots(indices: &[usize]) -> Vec<PanelIndex> {
    indices.iter().map(|&i| PanelIndex::new(i).unwrap()).collect()
}

#[tokio::test]
async fn a_failed_asset_is_skipped_and_the_chain_continues() {
    let source = RecordingSource::failing(&["number3.glb"]);
    let plan = asset_plan(&WallConfig::default());
    let mut registry = SceneRegistry::principles();
    let mut failed = Vec::new();

    let summary = load_all(&source, &plan, |outcome| match outcome {
        LoadOutcome::Loaded { slot, model } => registry.register_model(slot, model),
        LoadOutcome::Failed { slot, error } => failed.push((slot, error.name)),
    })
    .await;

    assert_eq!(summary.loaded, slots(&[0, 1, 3, 4, 5, 6, 7]));
    assert_eq!(summary.failed, vec!["number3.glb".to_string()]);
    assert_eq!(failed, vec![(PanelIndex::new(2).unwrap(), "number3.glb".to_string())]);

    let registered: Vec<_> = registry.models().map(|(slot, model)| (slot, model.name.clone())).collect();
    let expected: Vec<_> = [0, 1, 3, 4, 5, 6, 7]
        .into_iter()
        .map(|i| (PanelIndex::new(i).unwrap(), format!("number{}.glb", i + 1)))
        .collect();
    assert_eq!(registered, expected);
    assert!(registry.model(PanelIndex::new(2).unwrap()).is_none());
}

#[tokio::test]
async fn loads_never_overlap() {
    let source = RecordingSource::default();
    let plan = asset_plan(&WallConfig::default());

    load_all(&source, &plan, |_| {}).await;

    assert_eq!(source.max_in_flight(), 1);
    let expected_log: Vec<String> = (1..=8)
        .flat_map(|n| [format!("start:number{}.glb", n), format!("end:number{}.glb", n)])
        .collect();
    assert_eq!(source.log(), expected_log);
}

#[tokio::test]
async fn outcomes_arrive_in_request_order() {
    let source = RecordingSource::failing(&["number1.glb", "number8.glb"]);
    let plan = asset_plan(&WallConfig::default());
    let mut order = Vec::new();

    load_all(&source, &plan, |outcome| order.push(outcome.slot().get())).await;

    assert_eq!(order, (0..8).collect::<Vec<_>>());
    assert_eq!(source.requested().len(), 8);
}

#[tokio::test]
async fn every_asset_failing_leaves_the_wall_clickable() {
    let names: Vec<String> = WallConfig::default().asset_names();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let source = RecordingSource::failing(&refs);
    let plan = asset_plan(&WallConfig::default());
    let mut wall = test_wall();
    let mut events = Vec::new();

    let summary = load_all(&source, &plan, |outcome| {
        events.push(match outcome {
            LoadOutcome::Loaded { slot, model } => WallEvent::ModelLoaded {
                slot,
                model: Box::new(model),
            },
            LoadOutcome::Failed { error, .. } => WallEvent::ModelFailed { name: error.name },
        })
    })
    .await;
    events.into_iter().for_each(|event| wall.dispatch(event));

    assert!(summary.loaded.is_empty());
    assert_eq!(wall.registry().loaded_count(), 0);
    assert_eq!(wall.registry().panels().len(), 8);
}

#[tokio::test]
async fn loaded_events_register_at_the_slot_position() {
    let source = RecordingSource::default();
    let plan = asset_plan(&WallConfig::default());
    let mut wall = test_wall();
    let mut events = Vec::new();

    load_all(&source, &plan, |outcome| {
        if let LoadOutcome::Loaded { slot, model } = outcome {
            events.push(WallEvent::ModelLoaded {
                slot,
                model: Box::new(model),
            });
        }
    })
    .await;
    events.into_iter().for_each(|event| wall.dispatch(event));

    assert_eq!(wall.registry().loaded_count(), 8);
    for panel in wall.registry().panels() {
        let model = wall.registry().model(panel.index).unwrap();
        assert_eq!(model.position(), panel.position);
    }
}

#[tokio::test]
async fn a_real_glb_file_becomes_a_model() {
    let source = FileAssetSource::new("tests/fixtures");

    let model = source.load("triangle.glb").await.unwrap();

    assert_eq!(model.name, "triangle.glb");
    assert_eq!(model.triangle_count(), 1);
    assert_eq!(model.meshes[0].positions.len(), 3);
    assert_eq!(model.meshes[0].normals.len(), 3);
    assert_eq!(model.bounds.min, cgmath::Point3::new(0.0, 0.0, 0.0));
    assert_eq!(model.bounds.max, cgmath::Point3::new(1.0, 1.0, 0.0));
}

#[tokio::test]
async fn a_missing_file_is_an_io_error_naming_the_asset() {
    let source = FileAssetSource::new("tests/fixtures");

    let err = source.load("number42.glb").await.unwrap_err();

    assert_eq!(err.name, "number42.glb");
    assert!(matches!(err.kind, AssetLoadErrorKind::Io(_)));
}

#[tokio::test]
async fn the_file_source_feeds_the_chain() {
    let source = FileAssetSource::new("tests/fixtures");
    let mut config = WallConfig::default();
    config.asset_pattern = "triangle.glb".to_string();
    let plan = asset_plan(&config);
    let mut registry = SceneRegistry::principles();

    let summary = load_all(&source, &plan, |outcome| {
        if let LoadOutcome::Loaded { slot, model } = outcome {
            registry.register_model(slot, model);
        }
    })
    .await;

    assert_eq!(summary.loaded.len(), 8);
    assert_eq!(registry.loaded_count(), 8);
}
