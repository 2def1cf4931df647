//! The scene registry: panels, model slots and content payloads.
//!
//! The three collections are parallel and keyed by [`PanelIndex`]. Length
//! and order are checked once in [`SceneRegistry::new`]; afterwards panels
//! and contents are immutable and only the model slots fill up as assets
//! arrive.

use cgmath::{Point3, Rad};
use log::{info, warn};

use crate::{
    config::PANEL_COUNT,
    data_structures::{
        aabb::Aabb,
        content::{ContentPayload, PREAMBLE, PRINCIPLES, WALL_TITLE},
        model::Model,
        panel::{Panel, PanelIndex, banner_hit_volume, panel_grid, panel_position},
    },
    error::WallError,
};

/// The large monitor above the grid. It carries the wall title and opens the
/// preamble when clicked.
#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub title: &'static str,
    pub hit_volume: Aabb,
    pub content: ContentPayload,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            title: WALL_TITLE,
            hit_volume: banner_hit_volume(),
            content: PREAMBLE,
        }
    }
}

#[derive(Debug)]
pub struct SceneRegistry {
    panels: Vec<Panel>,
    contents: Vec<ContentPayload>,
    positions: Vec<Point3<f32>>,
    models: Vec<Option<Model>>,
    banner: Banner,
}

impl SceneRegistry {
    /// Builds a registry from parallel collections.
    ///
    /// All three must hold exactly one entry per panel and panels must be in
    /// index order.
    pub fn new(
        panels: Vec<Panel>,
        contents: Vec<ContentPayload>,
        positions: Vec<Point3<f32>>,
        banner: Banner,
    ) -> Result<Self, WallError> {
        if panels.len() != PANEL_COUNT
            || contents.len() != PANEL_COUNT
            || positions.len() != PANEL_COUNT
        {
            return Err(WallError::LengthMismatch {
                panels: panels.len(),
                contents: contents.len(),
                positions: positions.len(),
            });
        }
        if let Some((position, panel)) = panels
            .iter()
            .enumerate()
            .find(|(position, panel)| panel.index.get() != *position)
        {
            return Err(WallError::PanelOrder {
                position,
                found: panel.index.get(),
            });
        }
        Ok(Self {
            models: (0..PANEL_COUNT).map(|_| None).collect(),
            panels,
            contents,
            positions,
            banner,
        })
    }

    /// The eight principles wall: grid panels, principle pages, and models
    /// placed at the panel centres.
    pub fn principles() -> Self {
        Self {
            panels: panel_grid(),
            contents: PRINCIPLES.to_vec(),
            positions: PanelIndex::all().map(panel_position).collect(),
            models: (0..PANEL_COUNT).map(|_| None).collect(),
            banner: Banner::default(),
        }
    }

    /// Panels in index order. Available from construction on, independent of
    /// any model having loaded.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, index: PanelIndex) -> &Panel {
        &self.panels[index.get()]
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn content(&self, index: PanelIndex) -> Result<&ContentPayload, WallError> {
        self.contents
            .get(index.get())
            .ok_or(WallError::UnmappedPanelIndex(index.get()))
    }

    pub fn position(&self, index: PanelIndex) -> Point3<f32> {
        self.positions[index.get()]
    }

    /// Places `model` at the slot's position and stores it. A model already
    /// in the slot is replaced.
    pub fn register_model(&mut self, slot: PanelIndex, mut model: Model) {
        model.set_position(self.position(slot));
        info!(
            "Registered model {} at slot {} ({} triangles)",
            model.name,
            slot,
            model.triangle_count()
        );
        if let Some(previous) = self.models[slot.get()].replace(model) {
            warn!("Model {} in slot {} was replaced", previous.name, slot);
        }
    }

    pub fn model(&self, slot: PanelIndex) -> Option<&Model> {
        self.models[slot.get()].as_ref()
    }

    /// Loaded models in slot order. Slots whose asset failed are skipped.
    pub fn models(&self) -> impl Iterator<Item = (PanelIndex, &Model)> {
        PanelIndex::all()
            .zip(self.models.iter())
            .filter_map(|(idx, model)| Some((idx, model.as_ref()?)))
    }

    pub fn models_mut(&mut self) -> impl Iterator<Item = &mut Model> {
        self.models.iter_mut().flatten()
    }

    pub fn loaded_count(&self) -> usize {
        self.models.iter().flatten().count()
    }

    pub fn spin_models(&mut self, step: Rad<f32>) {
        self.models_mut().for_each(|model| model.spin(step));
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::principles()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::data_structures::model::Mesh;

    fn model(name: &str) -> Model {
        Model::new(name, vec![Mesh::cuboid(name, Vector3::new(1.0, 1.0, 1.0))]).unwrap()
    }

    #[test]
    fn panels_exist_before_any_model() {
        let registry = SceneRegistry::principles();
        assert_eq!(registry.panels().len(), PANEL_COUNT);
        assert_eq!(registry.loaded_count(), 0);
    }

    #[test]
    fn registration_places_model_at_slot_position() {
        let mut registry = SceneRegistry::principles();
        let slot = PanelIndex::new(5).unwrap();
        registry.register_model(slot, model("number6.glb"));
        assert_eq!(registry.model(slot).unwrap().position(), Point3::new(-2.5, -4.5, -0.1));
        assert_eq!(registry.models().map(|(i, _)| i).collect::<Vec<_>>(), vec![slot]);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = SceneRegistry::new(
            panel_grid(),
            PRINCIPLES[..7].to_vec(),
            PanelIndex::all().map(panel_position).collect(),
            Banner::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            WallError::LengthMismatch {
                panels: 8,
                contents: 7,
                positions: 8
            }
        );
    }

    #[test]
    fn reordered_panels_are_rejected() {
        let mut panels = panel_grid();
        panels.swap(0, 1);
        let err = SceneRegistry::new(
            panels,
            PRINCIPLES.to_vec(),
            PanelIndex::all().map(panel_position).collect(),
            Banner::default(),
        )
        .unwrap_err();
        assert_eq!(err, WallError::PanelOrder { position: 0, found: 1 });
    }

    #[test]
    fn every_panel_maps_to_its_content() {
        let registry = SceneRegistry::principles();
        for idx in PanelIndex::all() {
            assert_eq!(registry.content(idx).unwrap(), &PRINCIPLES[idx.get()]);
        }
    }
}
