//! Event dispatch.
//!
//! [`Wall`] owns everything the page needs at runtime and handles one
//! [`WallEvent`] at a time, to completion, before the host delivers the next.
//! Hosts (the windowed viewer, a test, a web page) translate their native
//! input into `WallEvent`s and feed them in; the asset chain does the same
//! with its outcomes, so every registry mutation happens here.

use cgmath::Rad;
use log::{debug, warn};

use crate::{
    animation::{AnimationLoop, NoopRenderer, Renderer},
    camera::{Camera, PointerPosition},
    config::WallConfig,
    data_structures::{model::Model, panel::PanelIndex, scene_graph::SceneRegistry},
    overlay::{DisplaySurface, OverlayController, OverlayRect, OverlayState, Page},
    pick::{HitTarget, PointerResolver},
};

#[derive(Debug)]
pub enum WallEvent {
    Click(PointerPosition),
    Resize { width: u32, height: u32 },
    /// Time to advance the animation and draw.
    Frame,
    ModelLoaded { slot: PanelIndex, model: Box<Model> },
    ModelFailed { name: String },
}

pub struct Wall<R, D> {
    config: WallConfig,
    camera: Camera,
    registry: SceneRegistry,
    overlay: OverlayController<D>,
    animation: AnimationLoop,
    renderer: R,
}

impl<R: Renderer, D: DisplaySurface> Wall<R, D> {
    pub fn new(config: WallConfig, registry: SceneRegistry, renderer: R, surface: D) -> Self {
        let camera = Camera::new(&config);
        let animation = AnimationLoop::new(Rad(config.spin_per_frame));
        Self {
            config,
            camera,
            registry,
            overlay: OverlayController::new(surface),
            animation,
            renderer,
        }
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn overlay(&self) -> &OverlayController<D> {
        &self.overlay
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.state()
    }

    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn dispatch(&mut self, event: WallEvent) {
        match event {
            WallEvent::Click(pointer) => self.click(pointer),
            WallEvent::Resize { width, height } => self.resize(width, height),
            WallEvent::Frame => self.frame(),
            WallEvent::ModelLoaded { slot, model } => self.registry.register_model(slot, *model),
            WallEvent::ModelFailed { name } => {
                warn!("Slot for {} stays empty", name);
            }
        }
    }

    /// While a page is open the click only decides whether it closes; the
    /// scene never sees it. Otherwise the nearest target under the pointer
    /// opens its page.
    pub fn click(&mut self, pointer: PointerPosition) {
        if self.overlay.is_visible() {
            let target = self.overlay.click_target(pointer);
            self.overlay.handle_click(target);
            return;
        }
        let target = PointerResolver::new(&self.registry, &self.camera).resolve_target(pointer);
        match target {
            Some(HitTarget::Panel(index)) => {
                self.overlay.open(Page::Principle(index), &self.registry);
            }
            Some(HitTarget::Banner) => {
                self.overlay.open(Page::Preamble, &self.registry);
            }
            None => debug!("Click at ({}, {}) hit nothing", pointer.x, pointer.y),
        }
    }

    /// Zero-sized viewports (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.resize(width, height);
        self.overlay.surface_mut().resize(width, height);
        self.renderer.resize(width, height);
    }

    pub fn frame(&mut self) {
        self.animation.tick(
            &mut self.registry,
            &self.camera,
            self.overlay.state(),
            &mut self.renderer,
        );
    }
}

impl Wall<NoopRenderer, OverlayRect> {
    /// The eight principles wall with nothing drawn and the overlay tracked
    /// as a rectangle over the viewport.
    pub fn headless(config: WallConfig) -> Self {
        let surface = OverlayRect::new(config.viewport, config.overlay_width, config.overlay_height);
        Self::new(config, SceneRegistry::principles(), NoopRenderer, surface)
    }
}

/// Installs the platform logger. Safe to call more than once.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {}", e).into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centre_of(wall: &Wall<NoopRenderer, OverlayRect>, index: usize) -> PointerPosition {
        let idx = PanelIndex::new(index).unwrap();
        wall.camera()
            .world_to_screen(wall.registry().panel(idx).position)
            .unwrap()
    }

    #[test]
    fn clicking_a_panel_opens_its_page() {
        let mut wall = Wall::headless(WallConfig::default());
        let pointer = centre_of(&wall, 0);
        wall.dispatch(WallEvent::Click(pointer));
        assert_eq!(
            wall.overlay_state(),
            OverlayState::Visible(Page::Principle(PanelIndex::new(0).unwrap()))
        );
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut wall = Wall::headless(WallConfig::default());
        wall.dispatch(WallEvent::Resize { width: 0, height: 0 });
        assert_eq!(wall.camera().viewport(), (1280, 720));
        wall.dispatch(WallEvent::Resize {
            width: 800,
            height: 600,
        });
        assert_eq!(wall.camera().viewport(), (800, 600));
    }
}
