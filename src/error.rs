//! Error types shared by the scene registry, the asset loader and the overlay.
//!
//! None of these errors is fatal: a failed asset leaves its panel without a
//! model and an unmapped panel index turns a click into a no-op.

use thiserror::Error;

/// Why a single named asset could not be turned into a [`Model`](crate::data_structures::model::Model).
#[derive(Error, Debug)]
pub enum AssetLoadErrorKind {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("the asset contains no mesh positions")]
    NoGeometry,
    #[error("buffer {0} refers to a binary chunk the file does not have")]
    MissingBuffer(usize),
    #[error("fetch failed: {0}")]
    Fetch(String),
}

/// A named resource failed to fetch or parse.
#[derive(Error, Debug)]
#[error("failed to load asset {name}: {kind}")]
pub struct AssetLoadError {
    pub name: String,
    #[source]
    pub kind: AssetLoadErrorKind,
}

impl AssetLoadError {
    pub fn new(name: impl Into<String>, kind: impl Into<AssetLoadErrorKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WallError {
    #[error("no content payload is registered for panel index {0}")]
    UnmappedPanelIndex(usize),
    #[error(
        "panels ({panels}), contents ({contents}) and model positions ({positions}) must have equal length"
    )]
    LengthMismatch {
        panels: usize,
        contents: usize,
        positions: usize,
    },
    #[error("panel {found} found at position {position}; panels must stay in index order")]
    PanelOrder { position: usize, found: usize },
}
