//! The content overlay.
//!
//! [`OverlayController`] is a two-state machine, hidden or visible with one
//! page, driving a [`DisplaySurface`]. While a page is visible the scene does
//! not receive pointer input; the next click anywhere but on the surface
//! itself closes the overlay.

use log::{debug, info};

use crate::{
    camera::PointerPosition,
    data_structures::{content::ContentPayload, panel::PanelIndex, scene_graph::SceneRegistry},
};

/// A page the overlay can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    /// Opened from the banner.
    Preamble,
    /// The principle behind panel `i`.
    Principle(PanelIndex),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Hidden,
    Visible(Page),
}

/// Where a click landed, as far as the overlay is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Overlay,
    Elsewhere,
}

/// Whatever actually presents the overlay: a DOM element, a window title, a
/// rectangle drawn over the canvas.
pub trait DisplaySurface {
    fn show(&mut self, payload: &ContentPayload);

    fn hide(&mut self);

    /// Whether a click at `pointer` would land on the surface itself.
    fn contains(&self, pointer: PointerPosition) -> bool;

    /// Enables or disables pointer delivery to the scene beneath the surface.
    fn set_scene_pointer_events(&mut self, _enabled: bool) {}

    /// The viewport changed. Surfaces sized relative to it follow along.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

#[derive(Debug)]
pub struct OverlayController<D> {
    state: OverlayState,
    surface: D,
}

impl<D: DisplaySurface> OverlayController<D> {
    pub fn new(surface: D) -> Self {
        Self {
            state: OverlayState::Hidden,
            surface,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, OverlayState::Visible(_))
    }

    /// The scene only takes pointer input while nothing is shown.
    pub fn scene_accepts_pointer(&self) -> bool {
        !self.is_visible()
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    /// Shows `page`, replacing whatever was shown before.
    ///
    /// Returns `false` and leaves the state untouched when the registry holds
    /// no content for the page.
    pub fn open(&mut self, page: Page, registry: &SceneRegistry) -> bool {
        let payload = match page {
            Page::Preamble => &registry.banner().content,
            Page::Principle(index) => match registry.content(index) {
                Ok(payload) => payload,
                Err(e) => {
                    debug!("Ignoring click: {}", e);
                    return false;
                }
            },
        };
        info!("Showing {:?}: {}", page, payload.title);
        self.surface.show(payload);
        self.surface.set_scene_pointer_events(false);
        self.state = OverlayState::Visible(page);
        true
    }

    pub fn show_panel(&mut self, index: PanelIndex, registry: &SceneRegistry) -> bool {
        self.open(Page::Principle(index), registry)
    }

    /// Hides the overlay. Calling it while hidden does nothing.
    pub fn dismiss(&mut self) {
        if let OverlayState::Visible(page) = self.state {
            debug!("Dismissing {:?}", page);
            self.surface.hide();
            self.surface.set_scene_pointer_events(true);
            self.state = OverlayState::Hidden;
        }
    }

    pub fn click_target(&self, pointer: PointerPosition) -> ClickTarget {
        if self.is_visible() && self.surface.contains(pointer) {
            ClickTarget::Overlay
        } else {
            ClickTarget::Elsewhere
        }
    }

    /// Applies the dismiss rule to a click. Clicks on the surface itself are
    /// ignored; any other click closes the overlay. Returns whether the state
    /// changed.
    pub fn handle_click(&mut self, target: ClickTarget) -> bool {
        match (self.state, target) {
            (OverlayState::Visible(_), ClickTarget::Elsewhere) => {
                self.dismiss();
                true
            }
            _ => false,
        }
    }
}

/// A centred rectangle covering a fixed fraction of the viewport.
///
/// This is the overlay's hit area on hosts without a DOM, and what the
/// renderer fills when a page is open.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayRect {
    viewport: (u32, u32),
    width_fraction: f32,
    height_fraction: f32,
    shown: Option<ContentPayload>,
}

impl OverlayRect {
    pub fn new(viewport: (u32, u32), width_fraction: f32, height_fraction: f32) -> Self {
        Self {
            viewport,
            width_fraction: width_fraction.clamp(0.0, 1.0),
            height_fraction: height_fraction.clamp(0.0, 1.0),
            shown: None,
        }
    }

    pub fn shown(&self) -> Option<&ContentPayload> {
        self.shown.as_ref()
    }

    /// `(left, top, width, height)` in pixels.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (vw, vh) = (f64::from(self.viewport.0), f64::from(self.viewport.1));
        let w = vw * f64::from(self.width_fraction);
        let h = vh * f64::from(self.height_fraction);
        ((vw - w) / 2.0, (vh - h) / 2.0, w, h)
    }
}

impl DisplaySurface for OverlayRect {
    fn show(&mut self, payload: &ContentPayload) {
        self.shown = Some(payload.clone());
    }

    fn hide(&mut self) {
        self.shown = None;
    }

    fn contains(&self, pointer: PointerPosition) -> bool {
        if self.shown.is_none() {
            return false;
        }
        let (left, top, w, h) = self.bounds();
        pointer.x >= left && pointer.x <= left + w && pointer.y >= top && pointer.y <= top + h
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = (width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::content::PRINCIPLES;

    fn controller() -> OverlayController<OverlayRect> {
        OverlayController::new(OverlayRect::new((1000, 800), 0.75, 0.5))
    }

    #[test]
    fn starts_hidden() {
        let c = controller();
        assert_eq!(c.state(), OverlayState::Hidden);
        assert!(c.scene_accepts_pointer());
    }

    #[test]
    fn open_shows_the_matching_payload() {
        let registry = SceneRegistry::principles();
        let mut c = controller();
        let idx = PanelIndex::new(3).unwrap();
        assert!(c.show_panel(idx, &registry));
        assert_eq!(c.state(), OverlayState::Visible(Page::Principle(idx)));
        assert_eq!(c.surface().shown(), Some(&PRINCIPLES[3]));
        assert!(!c.scene_accepts_pointer());
    }

    #[test]
    fn dismiss_when_hidden_is_a_no_op() {
        let mut c = controller();
        c.dismiss();
        assert_eq!(c.state(), OverlayState::Hidden);
        assert!(!c.handle_click(ClickTarget::Elsewhere));
    }

    #[test]
    fn clicks_on_the_surface_keep_it_open() {
        let registry = SceneRegistry::principles();
        let mut c = controller();
        c.open(Page::Preamble, &registry);
        let centre = PointerPosition::new(500.0, 400.0);
        assert_eq!(c.click_target(centre), ClickTarget::Overlay);
        assert!(!c.handle_click(c.click_target(centre)));
        assert!(c.is_visible());

        let corner = PointerPosition::new(10.0, 10.0);
        assert!(c.handle_click(c.click_target(corner)));
        assert_eq!(c.state(), OverlayState::Hidden);
        assert!(c.surface().shown().is_none());
    }

    #[test]
    fn rect_bounds_are_centred() {
        let rect = OverlayRect::new((1000, 800), 0.75, 0.5);
        assert_eq!(rect.bounds(), (125.0, 200.0, 750.0, 400.0));
    }
}
