//! Pointer picking.
//!
//! This module maps a click on the screen to the panel (or the banner) under
//! the pointer. It is a pure query over the scene registry and the camera:
//! nothing is mutated and it can be called as often as the host likes.
//!
//! The picking works as follows:
//! 1. Convert the pointer position to normalised device coordinates, flipping y so it points up
//! 2. Cast a ray from the camera eye through that point
//! 3. Slab-test the ray against every panel hit-volume and the banner
//! 4. Keep the nearest hit so that a closer target always occludes a farther one
//!
//! Hit-volumes exist from the moment the registry is built, so picking works
//! before (or without) any model having loaded.

use log::debug;

use crate::{
    camera::{Camera, PointerPosition},
    data_structures::{panel::PanelIndex, scene_graph::SceneRegistry},
};

/// Something a click can land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Banner,
    Panel(PanelIndex),
}

#[derive(Clone, Copy, Debug)]
pub struct PointerResolver<'a> {
    registry: &'a SceneRegistry,
    camera: &'a Camera,
}

impl<'a> PointerResolver<'a> {
    pub fn new(registry: &'a SceneRegistry, camera: &'a Camera) -> Self {
        Self { registry, camera }
    }

    /// The panel under the pointer, if any. Clicks on the banner or on empty
    /// space yield `None`.
    pub fn resolve(&self, pointer: PointerPosition) -> Option<PanelIndex> {
        match self.resolve_target(pointer)? {
            HitTarget::Panel(index) => Some(index),
            HitTarget::Banner => None,
        }
    }

    /// The nearest target under the pointer together with its distance from
    /// the camera.
    pub fn resolve_target_with_distance(
        &self,
        pointer: PointerPosition,
    ) -> Option<(HitTarget, f32)> {
        let (width, height) = self.camera.viewport();
        if width == 0 || height == 0 {
            return None;
        }
        let ray = self.camera.cast_ray_from_pointer(pointer);

        let panels = self.registry.panels().iter().filter_map(|panel| {
            panel
                .hit_volume
                .intersect(&ray)
                .map(|t| (HitTarget::Panel(panel.index), t))
        });
        let banner = self
            .registry
            .banner()
            .hit_volume
            .intersect(&ray)
            .map(|t| (HitTarget::Banner, t));

        let hit = panels
            .chain(banner)
            .min_by(|(_, a), (_, b)| a.total_cmp(b));
        if let Some((target, t)) = hit {
            debug!("Pointer ({}, {}) hit {:?} at distance {}", pointer.x, pointer.y, target, t);
        }
        hit
    }

    pub fn resolve_target(&self, pointer: PointerPosition) -> Option<HitTarget> {
        self.resolve_target_with_distance(pointer)
            .map(|(target, _)| target)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::{
        config::WallConfig,
        data_structures::{
            aabb::Aabb,
            content::PRINCIPLES,
            panel::{PANEL_SIZE, panel_grid, panel_position},
            scene_graph::Banner,
        },
    };

    fn setup() -> (SceneRegistry, Camera) {
        (
            SceneRegistry::principles(),
            Camera::new(&WallConfig::default()),
        )
    }

    #[test]
    fn every_panel_centre_resolves_to_its_index() {
        let (registry, camera) = setup();
        let resolver = PointerResolver::new(&registry, &camera);
        for panel in registry.panels() {
            let screen = camera.world_to_screen(panel.position).unwrap();
            assert_eq!(resolver.resolve(screen), Some(panel.index));
        }
    }

    #[test]
    fn gap_between_panels_resolves_to_nothing() {
        let (registry, camera) = setup();
        let resolver = PointerResolver::new(&registry, &camera);
        // halfway between column 0 and column 1 of the top row
        let screen = camera.world_to_screen(Point3::new(-5.0, 0.0, -0.1)).unwrap();
        assert_eq!(resolver.resolve(screen), None);
    }

    #[test]
    fn banner_is_a_target_but_not_a_panel() {
        let (registry, camera) = setup();
        let resolver = PointerResolver::new(&registry, &camera);
        let screen = camera.world_to_screen(Point3::new(0.0, 5.0, 0.1)).unwrap();
        assert_eq!(resolver.resolve_target(screen), Some(HitTarget::Banner));
        assert_eq!(resolver.resolve(screen), None);
    }

    /// A registry where the hit volume of `front` is pulled to z = 3 right in
    /// front of panel `behind`.
    fn overlapping(front: usize, behind: usize) -> SceneRegistry {
        let mut panels = panel_grid();
        let covered = panels[behind].position;
        panels[front].hit_volume =
            Aabb::from_center_size(Point3::new(covered.x, covered.y, 3.0), PANEL_SIZE);
        SceneRegistry::new(
            panels,
            PRINCIPLES.to_vec(),
            PanelIndex::all().map(panel_position).collect(),
            Banner::default(),
        )
        .unwrap()
    }

    #[test]
    fn nearer_volume_wins_when_it_comes_later() {
        let registry = overlapping(5, 2);
        let camera = Camera::new(&WallConfig::default());
        let resolver = PointerResolver::new(&registry, &camera);
        let screen = camera
            .world_to_screen(registry.panel(PanelIndex::new(2).unwrap()).position)
            .unwrap();
        assert_eq!(resolver.resolve(screen), PanelIndex::new(5));
    }

    #[test]
    fn nearer_volume_wins_when_it_comes_first() {
        let registry = overlapping(2, 5);
        let camera = Camera::new(&WallConfig::default());
        let resolver = PointerResolver::new(&registry, &camera);
        let screen = camera
            .world_to_screen(registry.panel(PanelIndex::new(5).unwrap()).position)
            .unwrap();
        let (target, distance) = resolver.resolve_target_with_distance(screen).unwrap();
        assert_eq!(target, HitTarget::Panel(PanelIndex::new(2).unwrap()));

        let plain = SceneRegistry::principles();
        let (_, unmoved) = PointerResolver::new(&plain, &camera)
            .resolve_target_with_distance(screen)
            .unwrap();
        assert!(distance < unmoved);
    }
}
