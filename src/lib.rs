mod app;
mod camera;
mod canvas;
mod config;
mod content;
mod error;
mod gesture;
mod input;
mod layout;
mod page;
mod paint;
mod render;
mod scene;
mod scheduler;
mod sequencer;
mod timer;

pub use app::{Graphics, HeroApp};
pub use camera::{OrbitControls, PerspectiveCamera};
pub use canvas::{Canvas, CanvasState, MountFlag, SceneState};
pub use config::{CameraConfig, GestureConfig, LightConfig, PageConfig, hex_rgb, hex_rgba};
pub use content::{Icon, IconText, PageContent};
pub use error::{HeroError, Result};
pub use gesture::HoverFeedback;
pub use input::{DragKind, PointerButtons, PointerState};
pub use layout::{HitTarget, Layer, PageLayout, Rect, Scroll};
pub use page::{Page, PageAction, Section, WheelOutcome};
pub use paint::{CanvasView, DrawList, Fill, Panel, Shape};
pub use render::{GpuState, PageRenderer};
pub use scene::{AmbientLight, MeshVertex, PointLight, RenderedObject, SceneSetup, box_geometry};
pub use scheduler::{CallbackId, FrameScheduler};
pub use sequencer::{
    AnimatedElement, ElementId, Easing, Sequencer, TaskPhase, Transition, VisualState,
};
pub use timer::{FrameClock, Timer};

use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// ======================================
// === MAIN ENTRY POINT ===
// ======================================

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn run() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if let Err(e) = console_log::init_with_level(log::Level::Info) {
                web_sys::console::error_1(&format!("Couldn't initialize logger: {e}").into());
            }
        } else {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        }
    }

    log::info!("Started {} v{}", config::WINDOW_TITLE, env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_app(PageConfig::default(), PageContent::default()) {
        log::error!("{e}");
    }
}

// Runs the page in a window until it is closed.
pub fn run_app(config: PageConfig, content: PageContent) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = HeroApp::new(config, content);
    event_loop.run_app(&mut app)?;
    Ok(())
}
