//! Panels: the invisible, clickable boxes laid out in a 4×2 grid.

use std::fmt;

use cgmath::{Point3, Vector3};

use crate::{
    config::{PANEL_COLUMNS, PANEL_COUNT},
    data_structures::aabb::Aabb,
};

/// Horizontal distance between neighbouring panel centres.
pub const PANEL_SPACING: f32 = 5.0;
/// Vertical position of the bottom row; the top row sits at 0.
pub const BOTTOM_ROW_Y: f32 = -4.5;
pub const PANEL_Z: f32 = -0.1;
pub const PANEL_SIZE: Vector3<f32> = Vector3::new(3.5, 3.5, 0.2);

pub const BANNER_CENTER: Point3<f32> = Point3::new(0.0, 5.0, 0.0);
pub const BANNER_SIZE: Vector3<f32> = Vector3::new(25.0, 4.5, 0.2);

/// The only key into panels, model slots and content payloads.
///
/// A `PanelIndex` can only be obtained for an index below the wall's panel
/// count, so holding one means all three collections have an entry for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PanelIndex(usize);

impl PanelIndex {
    /// `None` for indices outside the wall.
    pub fn new(index: usize) -> Option<Self> {
        (index < PANEL_COUNT).then_some(Self(index))
    }

    pub fn from_grid(row: usize, column: usize) -> Option<Self> {
        if column >= PANEL_COLUMNS {
            return None;
        }
        Self::new(row * PANEL_COLUMNS + column)
    }

    pub fn all() -> impl Iterator<Item = PanelIndex> {
        (0..PANEL_COUNT).map(PanelIndex)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// 0 for the top row, 1 for the bottom row.
    pub fn row(self) -> usize {
        self.0 / PANEL_COLUMNS
    }

    pub fn column(self) -> usize {
        self.0 % PANEL_COLUMNS
    }

    /// The number painted on the panel's model, 1-based.
    pub fn number(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for PanelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// World-space centre of the panel at `index`. Models use the same table.
pub fn panel_position(index: PanelIndex) -> Point3<f32> {
    let x = (index.column() as f32 - 1.5) * PANEL_SPACING;
    let y = if index.row() == 0 { 0.0 } else { BOTTOM_ROW_Y };
    Point3::new(x, y, PANEL_Z)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub index: PanelIndex,
    pub position: Point3<f32>,
    pub hit_volume: Aabb,
}

impl Panel {
    pub fn new(index: PanelIndex) -> Self {
        let position = panel_position(index);
        Self {
            index,
            position,
            hit_volume: Aabb::from_center_size(position, PANEL_SIZE),
        }
    }
}

/// All panels in index order. The order defines the index space and is
/// never re-sorted.
pub fn panel_grid() -> Vec<Panel> {
    PanelIndex::all().map(Panel::new).collect()
}

pub fn banner_hit_volume() -> Aabb {
    Aabb::from_center_size(BANNER_CENTER, BANNER_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_encodes_rows_and_columns() {
        let idx = PanelIndex::new(6).unwrap();
        assert_eq!((idx.row(), idx.column()), (1, 2));
        assert_eq!(PanelIndex::from_grid(0, 2), PanelIndex::new(2));
        assert_eq!(PanelIndex::from_grid(0, 4), None);
        assert_eq!(PanelIndex::from_grid(2, 0), None);
    }

    #[test]
    fn positions_match_the_fixed_table() {
        let expected = [
            (-7.5, 0.0),
            (-2.5, 0.0),
            (2.5, 0.0),
            (7.5, 0.0),
            (-7.5, -4.5),
            (-2.5, -4.5),
            (2.5, -4.5),
            (7.5, -4.5),
        ];
        for (panel, (x, y)) in panel_grid().iter().zip(expected) {
            assert_eq!(panel.position, Point3::new(x, y, PANEL_Z));
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert!(PanelIndex::new(PANEL_COUNT).is_none());
        assert_eq!(PanelIndex::all().count(), PANEL_COUNT);
    }
}
