//! Runtime configuration.
//!
//! [`WallConfig`] gathers every tunable of the wall in one place. Hosts take
//! the default and mutate the fields they care about before building a
//! [`Wall`](crate::flow::Wall), the same way a flow configures the context in
//! its init hook.

use cgmath::{Deg, Point3};

/// Number of panels (and content payloads, and model slots) on the wall.
pub const PANEL_COUNT: usize = 8;

/// Panels per grid row.
pub const PANEL_COLUMNS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct WallConfig {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    /// Initial viewport in physical pixels; replaced by the first resize.
    pub viewport: (u32, u32),
    /// Background colour as `0xRRGGBB`.
    pub clear_colour: u32,
    pub banner_colour: u32,
    /// Flat colour for loaded models; their own materials are not used.
    pub model_colour: u32,
    pub light_position: [f32; 3],
    pub ambient_strength: f32,
    /// Rotation about the vertical axis added to every loaded model per frame.
    pub spin_per_frame: f32,
    /// Overlay size as a fraction of the viewport.
    pub overlay_width: f32,
    pub overlay_height: f32,
    pub asset_dir: String,
    /// `{n}` is replaced by the 1-based panel number.
    pub asset_pattern: String,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, 10.0),
            target: Point3::new(0.0, 0.0, 0.0),
            fovy: Deg(75.0),
            znear: 0.1,
            zfar: 1000.0,
            viewport: (1280, 720),
            clear_colour: 0xFFFAEB,
            banner_colour: 0xCF4307,
            model_colour: 0x2E2A26,
            light_position: [10.0, 10.0, 10.0],
            ambient_strength: 3.0,
            spin_per_frame: 0.005,
            overlay_width: 0.75,
            overlay_height: 0.5,
            asset_dir: "assets".to_string(),
            asset_pattern: "number{n}.glb".to_string(),
        }
    }
}

impl WallConfig {
    /// Resource names in load order: `number1.glb` .. `number8.glb` by default.
    pub fn asset_names(&self) -> Vec<String> {
        (1..=PANEL_COUNT)
            .map(|n| self.asset_pattern.replace("{n}", &n.to_string()))
            .collect()
    }

    pub fn with_asset_dir(mut self, dir: impl Into<String>) -> Self {
        self.asset_dir = dir.into();
        self
    }
}

/// Splits `0xRRGGBB` into linear-ish `[r, g, b]` floats in `0.0..=1.0`.
pub fn rgb(colour: u32) -> [f32; 3] {
    let channel = |shift: u32| ((colour >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_names_follow_panel_numbers() {
        let names = WallConfig::default().asset_names();
        assert_eq!(names.len(), PANEL_COUNT);
        assert_eq!(names[0], "number1.glb");
        assert_eq!(names[7], "number8.glb");
    }

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(rgb(0xFF0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x0000FF), [0.0, 0.0, 1.0]);
    }
}
