//! Display surfaces of the windowed viewer.
//!
//! Both track the overlay's hit area with an [`OverlayRect`]; the renderer
//! fills the same rectangle. Natively the page text goes to the window title
//! and the log, on the web it goes into a `<div>` laid over the canvas.

use log::info;

use crate::{
    camera::PointerPosition,
    data_structures::content::{ContentPayload, WALL_TITLE},
    overlay::{DisplaySurface, OverlayRect},
};
#[cfg(target_arch = "wasm32")]
use crate::data_structures::content::TITLE_LABEL_STYLE;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformSurface = WindowSurface;
#[cfg(target_arch = "wasm32")]
pub type PlatformSurface = DomSurface;

#[cfg(not(target_arch = "wasm32"))]
pub struct WindowSurface {
    window: std::sync::Arc<winit::window::Window>,
    rect: OverlayRect,
}

#[cfg(not(target_arch = "wasm32"))]
impl WindowSurface {
    pub fn new(window: std::sync::Arc<winit::window::Window>, rect: OverlayRect) -> Self {
        window.set_title(WALL_TITLE);
        Self { window, rect }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DisplaySurface for WindowSurface {
    fn show(&mut self, payload: &ContentPayload) {
        self.rect.show(payload);
        self.window.set_title(payload.title);
        info!("{}", payload.to_plain_text());
    }

    fn hide(&mut self) {
        self.rect.hide();
        self.window.set_title(WALL_TITLE);
    }

    fn contains(&self, pointer: PointerPosition) -> bool {
        self.rect.contains(pointer)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.rect.resize(width, height);
    }
}

/// A fixed, centred `<div>` sized by the same fractions as the rectangle.
/// The wall title is a second, permanent `<div>` over the banner.
#[cfg(target_arch = "wasm32")]
pub struct DomSurface {
    element: web_sys::HtmlElement,
    canvas: Option<web_sys::HtmlElement>,
    rect: OverlayRect,
}

#[cfg(target_arch = "wasm32")]
impl DomSurface {
    pub fn new(
        canvas: Option<web_sys::HtmlElement>,
        rect: OverlayRect,
        width_fraction: f32,
        height_fraction: f32,
    ) -> anyhow::Result<Self> {
        use wasm_bindgen::JsCast;

        let js = |e: wasm_bindgen::JsValue| anyhow::anyhow!("{:?}", e);
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let element: web_sys::HtmlElement = document
            .create_element("div")
            .map_err(js)?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("div is not an HtmlElement"))?;
        element.set_id("overlay");
        let width = width_fraction.clamp(0.0, 1.0) * 100.0;
        let height = height_fraction.clamp(0.0, 1.0) * 100.0;
        let style = element.style();
        for (property, value) in [
            ("position", "fixed".to_string()),
            ("left", format!("{}%", (100.0 - width) / 2.0)),
            ("top", format!("{}%", (100.0 - height) / 2.0)),
            ("width", format!("{}%", width)),
            ("height", format!("{}%", height)),
            ("overflow", "auto".to_string()),
            ("background", "white".to_string()),
            ("box-sizing", "border-box".to_string()),
            ("padding", "1em".to_string()),
            ("display", "none".to_string()),
        ] {
            style.set_property(property, &value).map_err(js)?;
        }
        let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
        body.append_child(&element).map_err(js)?;

        let label: web_sys::HtmlElement = document
            .create_element("div")
            .map_err(js)?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("div is not an HtmlElement"))?;
        label.set_id("title");
        for (property, value) in TITLE_LABEL_STYLE {
            label.style().set_property(property, value).map_err(js)?;
        }
        label.set_inner_text(WALL_TITLE);
        body.append_child(&label).map_err(js)?;
        document.set_title(WALL_TITLE);
        Ok(Self {
            element,
            canvas,
            rect,
        })
    }

    fn set_display(&self, value: &str) {
        if let Err(e) = self.element.style().set_property("display", value) {
            log::warn!("Could not update the overlay: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl DisplaySurface for DomSurface {
    fn show(&mut self, payload: &ContentPayload) {
        self.rect.show(payload);
        self.element.set_inner_html(&payload.to_html());
        self.set_display("block");
        info!("Showing {}", payload.title);
    }

    fn hide(&mut self) {
        self.rect.hide();
        self.set_display("none");
    }

    fn contains(&self, pointer: PointerPosition) -> bool {
        self.rect.contains(pointer)
    }

    fn set_scene_pointer_events(&mut self, enabled: bool) {
        // Pointer events stay on: the click that closes the overlay arrives
        // through the canvas. Only the cursor hint changes.
        if let Some(canvas) = &self.canvas {
            let cursor = if enabled { "pointer" } else { "default" };
            if let Err(e) = canvas.style().set_property("cursor", cursor) {
                log::warn!("Could not update the canvas style: {:?}", e);
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.rect.resize(width, height);
    }
}
