//! Scene data: hit-volumes, panels, models, content and the registry tying
//! them together.
//!
//! - `aabb` is the axis-aligned box used for ray hit tests
//! - `content` holds the static overlay pages
//! - `instance` holds position/rotation/scale transforms
//! - `model` is the CPU-side mesh data produced by the asset loader
//! - `panel` defines the panel grid and the `PanelIndex` key
//! - `scene_graph` is the registry owning the three index-aligned collections

pub mod aabb;
pub mod content;
pub mod instance;
pub mod model;
pub mod panel;
pub mod scene_graph;
