//! ethos-wall
//!
//! An interactive wall of eight numbered panels. Clicking a panel opens the
//! ethical principle of software engineering it stands for; clicking the
//! banner above the grid opens the preamble. Models for the panels are
//! loaded one after the other and spin slowly while the page is open.
//!
//! The core (picking, overlay state, asset loading, animation and event
//! dispatch) has no windowing or GPU dependency. The `viewer` feature adds a
//! winit + wgpu front end for native and web builds.
//!
//! High-level modules
//! - `camera`: the fixed perspective camera and pointer-to-ray conversion
//! - `config`: every tunable of the wall in one place
//! - `data_structures`: panels, content pages, models and the scene registry
//! - `resources`: loading glTF models in a strictly ordered chain
//! - `pick`: resolving a pointer position to the panel under it
//! - `overlay`: the content overlay state machine and its display surfaces
//! - `animation`: the per-frame spin and the renderer seam
//! - `flow`: the event dispatch context tying everything together
//!

pub mod animation;
pub mod camera;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod overlay;
pub mod pick;
pub mod resources;

#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod context;
#[cfg(feature = "viewer")]
pub mod pipelines;
#[cfg(feature = "viewer")]
pub mod render;
#[cfg(feature = "viewer")]
pub mod surface;

// Re-exports commonly used types for convenience in downstream code.
pub use camera::{Camera, PointerPosition};
pub use config::WallConfig;
pub use data_structures::{content::ContentPayload, panel::PanelIndex, scene_graph::SceneRegistry};
pub use error::{AssetLoadError, WallError};
pub use flow::{Wall, WallEvent};
pub use overlay::{DisplaySurface, OverlayController, OverlayState, Page};
pub use pick::PointerResolver;
