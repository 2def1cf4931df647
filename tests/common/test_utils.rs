#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    io,
};

use cgmath::Vector3;
use ethos_wall::{
    animation::Renderer,
    camera::{Camera, PointerPosition},
    config::WallConfig,
    data_structures::{
        content::ContentPayload,
        model::{Mesh, Model},
        panel::PanelIndex,
        scene_graph::SceneRegistry,
    },
    error::{AssetLoadError, AssetLoadErrorKind},
    flow::Wall,
    overlay::{DisplaySurface, OverlayRect, OverlayState},
    resources::AssetSource,
};

pub fn cube(name: &str) -> Model {
    Model::new(name, vec![Mesh::cuboid(name, Vector3::new(1.0, 1.0, 1.0))]).unwrap()
}

/// An asset source that serves cubes, fails on demand and records the order
/// in which loads start and finish.
#[derive(Default)]
pub struct RecordingSource {
    failing: HashSet<String>,
    log: RefCell<Vec<String>>,
    in_flight: Cell<usize>,
    max_in_flight: Cell<usize>,
}

impl RecordingSource {
    pub fn failing(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Names in the order their loads were started.
    pub fn requested(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|entry| entry.strip_prefix("start:").map(str::to_string))
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.get()
    }
}

impl AssetSource for RecordingSource {
    async fn load(&self, name: &str) -> Result<Model, AssetLoadError> {
        self.log.borrow_mut().push(format!("start:{}", name));
        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight
            .set(self.max_in_flight.get().max(self.in_flight.get()));

        // give a concurrent caller every chance to start the next load
        tokio::task::yield_now().await;

        self.in_flight.set(self.in_flight.get() - 1);
        self.log.borrow_mut().push(format!("end:{}", name));
        if self.failing.contains(name) {
            let kind = AssetLoadErrorKind::Io(io::Error::new(io::ErrorKind::NotFound, "404"));
            Err(AssetLoadError::new(name, kind))
        } else {
            Ok(cube(name))
        }
    }
}

/// Tracks the overlay rectangle and remembers every page it was asked to show.
pub struct RecordingSurface {
    rect: OverlayRect,
    pub shown: Vec<&'static str>,
    pub hides: usize,
    pub scene_pointer_events: bool,
}

impl RecordingSurface {
    pub fn new(config: &WallConfig) -> Self {
        Self {
            rect: OverlayRect::new(config.viewport, config.overlay_width, config.overlay_height),
            shown: Vec::new(),
            hides: 0,
            scene_pointer_events: true,
        }
    }

    pub fn current(&self) -> Option<&ContentPayload> {
        self.rect.shown()
    }
}

impl DisplaySurface for RecordingSurface {
    fn show(&mut self, payload: &ContentPayload) {
        self.rect.show(payload);
        self.shown.push(payload.title);
    }

    fn hide(&mut self) {
        self.rect.hide();
        self.hides += 1;
    }

    fn contains(&self, pointer: PointerPosition) -> bool {
        self.rect.contains(pointer)
    }

    fn set_scene_pointer_events(&mut self, enabled: bool) {
        self.scene_pointer_events = enabled;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.rect.resize(width, height);
    }
}

#[derive(Default)]
pub struct CountingRenderer {
    pub frames: u32,
    pub resizes: Vec<(u32, u32)>,
    pub last_overlay: Option<OverlayState>,
    pub models_drawn: usize,
}

impl Renderer for CountingRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }

    fn render(&mut self, registry: &SceneRegistry, _camera: &Camera, overlay: OverlayState) {
        self.frames += 1;
        self.last_overlay = Some(overlay);
        self.models_drawn = registry.models().count();
    }
}

pub type TestWall = Wall<CountingRenderer, RecordingSurface>;

pub fn test_wall() -> TestWall {
    let config = WallConfig::default();
    let surface = RecordingSurface::new(&config);
    Wall::new(config, SceneRegistry::principles(), CountingRenderer::default(), surface)
}

/// Screen position of a panel's centre as the wall's camera sees it.
pub fn panel_centre(wall: &TestWall, index: usize) -> PointerPosition {
    let idx = PanelIndex::new(index).unwrap();
    wall.camera()
        .world_to_screen(wall.registry().panel(idx).position)
        .unwrap()
}

/// A point in the top-left corner: outside the overlay and off every target.
pub fn corner() -> PointerPosition {
    PointerPosition::new(5.0, 5.0)
}
