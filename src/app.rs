//! The windowed viewer: a winit event loop feeding [`WallEvent`]s into a
//! [`Wall`] drawn with wgpu.
//!
//! Natively the asset chain runs on a tokio runtime; on the web it runs on
//! the browser's executor. Either way its outcomes come back as user events
//! through the event loop proxy, so the wall only ever changes inside this
//! handler.

use std::sync::Arc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    camera::PointerPosition,
    config::WallConfig,
    context::Context,
    data_structures::{content::WALL_TITLE, scene_graph::SceneRegistry},
    flow::{Wall, WallEvent, init_logging},
    overlay::OverlayRect,
    render::WgpuRenderer,
    resources::{AssetRequest, FileAssetSource, LoadOutcome, asset_plan, load_all},
    surface::PlatformSurface,
};

type ViewerWall = Wall<WgpuRenderer, PlatformSurface>;

pub enum ViewerEvent {
    /// The GPU context finished initialising (web only; natively this
    /// happens synchronously in `resumed`).
    #[allow(dead_code)]
    Initialized(Box<ViewerWall>),
    Wall(WallEvent),
}

pub struct App {
    config: WallConfig,
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<ViewerEvent>,
    wall: Option<ViewerWall>,
    cursor: PointerPosition,
}

impl App {
    fn new(event_loop: &EventLoop<ViewerEvent>, config: WallConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        Ok(Self {
            config,
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy,
            wall: None,
            cursor: PointerPosition::new(0.0, 0.0),
        })
    }

    /// Starts the strictly sequential asset chain. Each outcome is posted to
    /// the event loop as soon as it is known.
    fn start_loading(&self) {
        let source = FileAssetSource::new(self.config.asset_dir.clone());
        let requests = asset_plan(&self.config);
        let proxy = self.proxy.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let handle = self.async_runtime.handle().clone();
            std::thread::spawn(move || handle.block_on(load_chain(source, requests, proxy)));
        }

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(load_chain(source, requests, proxy));
    }

    fn install(&mut self, mut wall: ViewerWall) {
        let size = wall.renderer().context().window().inner_size();
        wall.dispatch(WallEvent::Resize {
            width: size.width,
            height: size.height,
        });
        wall.renderer().context().window().request_redraw();
        self.wall = Some(wall);
        self.start_loading();
    }
}

async fn load_chain(
    source: FileAssetSource,
    requests: Vec<AssetRequest>,
    proxy: EventLoopProxy<ViewerEvent>,
) {
    load_all(&source, &requests, |outcome| {
        let event = match outcome {
            LoadOutcome::Loaded { slot, model } => WallEvent::ModelLoaded {
                slot,
                model: Box::new(model),
            },
            LoadOutcome::Failed { error, .. } => WallEvent::ModelFailed { name: error.name },
        };
        if proxy.send_event(ViewerEvent::Wall(event)).is_err() {
            log::warn!("Event loop closed before all assets were loaded");
        }
    })
    .await;
}

async fn build_wall(
    window: Arc<Window>,
    config: WallConfig,
    #[cfg(target_arch = "wasm32")] canvas: Option<web_sys::HtmlElement>,
) -> anyhow::Result<ViewerWall> {
    let ctx = Context::new(window.clone()).await?;
    let renderer = WgpuRenderer::new(ctx, &config);
    let rect = OverlayRect::new(config.viewport, config.overlay_width, config.overlay_height);

    #[cfg(not(target_arch = "wasm32"))]
    let surface = crate::surface::WindowSurface::new(window, rect);

    #[cfg(target_arch = "wasm32")]
    let surface =
        crate::surface::DomSurface::new(canvas, rect, config.overlay_width, config.overlay_height)?;

    Ok(Wall::new(config, SceneRegistry::principles(), renderer, surface))
}

impl ApplicationHandler<ViewerEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.wall.is_some() {
            return;
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(WALL_TITLE);

        #[cfg(target_arch = "wasm32")]
        let canvas = {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(CANVAS_ID));
            window_attributes = window_attributes
                .with_canvas(canvas.clone().map(|c| c.unchecked_into::<web_sys::HtmlCanvasElement>()));
            canvas.map(|c| c.unchecked_into::<web_sys::HtmlElement>())
        };

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let init = build_wall(
            window,
            self.config.clone(),
            #[cfg(target_arch = "wasm32")]
            canvas,
        );

        #[cfg(not(target_arch = "wasm32"))]
        match self.async_runtime.block_on(init) {
            Ok(wall) => self.install(wall),
            Err(e) => {
                log::error!("App initialization failed: {:#}", e);
                event_loop.exit();
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init.await {
                    Ok(wall) => {
                        if proxy.send_event(ViewerEvent::Initialized(Box::new(wall))).is_err() {
                            log::error!("Event loop closed during initialization");
                        }
                    }
                    Err(e) => log::error!("App initialization failed: {:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::Initialized(wall) => self.install(*wall),
            ViewerEvent::Wall(event) => {
                if let Some(wall) = &mut self.wall {
                    wall.dispatch(event);
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let wall = match &mut self.wall {
            Some(wall) => wall,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => wall.dispatch(WallEvent::Resize {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = PointerPosition::new(position.x, position.y);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => wall.dispatch(WallEvent::Click(self.cursor)),
            WindowEvent::RedrawRequested => wall.dispatch(WallEvent::Frame),
            _ => {}
        }
    }
}

pub fn run(config: WallConfig) -> anyhow::Result<()> {
    init_logging();

    let event_loop: EventLoop<ViewerEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), wasm_bindgen::JsValue> {
    run(WallConfig::default()).map_err(|e| wasm_bindgen::JsValue::from_str(&format!("{:#}", e)))
}
