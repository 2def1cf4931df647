//! The per-frame loop: spin every loaded model, then draw.

use cgmath::Rad;

use crate::{camera::Camera, data_structures::scene_graph::SceneRegistry, overlay::OverlayState};

/// Anything that can draw the wall. The windowed viewer implements this with
/// wgpu; tests use a renderer that only counts frames.
pub trait Renderer {
    fn resize(&mut self, width: u32, height: u32);

    fn render(&mut self, registry: &SceneRegistry, camera: &Camera, overlay: OverlayState);
}

/// Draws nothing. Useful for hosts that only need picking and the overlay.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn resize(&mut self, _width: u32, _height: u32) {}

    fn render(&mut self, _registry: &SceneRegistry, _camera: &Camera, _overlay: OverlayState) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationLoop {
    step: Rad<f32>,
    ticks: u64,
}

impl AnimationLoop {
    pub fn new(step: Rad<f32>) -> Self {
        Self { step, ticks: 0 }
    }

    pub fn step(&self) -> Rad<f32> {
        self.step
    }

    /// Frames run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One frame. Models that have not loaded yet are simply not there to
    /// spin; the overlay does not pause the loop.
    pub fn tick<R: Renderer>(
        &mut self,
        registry: &mut SceneRegistry,
        camera: &Camera,
        overlay: OverlayState,
        renderer: &mut R,
    ) {
        registry.spin_models(self.step);
        self.ticks += 1;
        renderer.render(registry, camera, overlay);
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::{
        config::WallConfig,
        data_structures::{
            model::{Mesh, Model},
            panel::PanelIndex,
        },
    };

    #[test]
    fn ticking_spins_loaded_models_only() {
        let mut registry = SceneRegistry::principles();
        let slot = PanelIndex::new(0).unwrap();
        let cube = Mesh::cuboid("cube", Vector3::new(1.0, 1.0, 1.0));
        registry.register_model(slot, Model::new("cube", vec![cube]).unwrap());
        let camera = Camera::new(&WallConfig::default());
        let mut animation = AnimationLoop::new(Rad(0.005));

        for _ in 0..10 {
            animation.tick(&mut registry, &camera, OverlayState::Hidden, &mut NoopRenderer);
        }

        assert_eq!(animation.ticks(), 10);
        assert!((registry.model(slot).unwrap().yaw().0 - 0.05).abs() < 1e-5);
    }
}
