use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::{DIMX, DIMY, LOGGING_TIMESTEP, PageConfig, WINDOW_TITLE};
use crate::content::PageContent;
use crate::input::PointerButtons;
use crate::page::{Page, PageAction};
use crate::render::{GpuState, PageRenderer};
use crate::timer::FrameClock;

// Filled once the async device request resolves.
pub struct Graphics {
    pub gpu: GpuState,
    pub renderer: PageRenderer,
}

impl Graphics {
    pub fn new(gpu: GpuState) -> Self {
        let renderer = PageRenderer::new(&gpu);
        Self { gpu, renderer }
    }
}

pub struct HeroApp {
    page: Page,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    graphics: Rc<RefCell<Option<Graphics>>>,
    should_exit: bool,
}

impl HeroApp {
    pub fn new(config: PageConfig, content: PageContent) -> Self {
        Self {
            page: Page::new(config, content, Vec2::new(DIMX as f32, DIMY as f32)),
            clock: FrameClock::new(),
            window: None,
            graphics: Rc::new(RefCell::new(None)),
            should_exit: false,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    fn logical_size(window: &Window, size: PhysicalSize<u32>) -> Vec2 {
        let logical = size.to_logical::<f32>(window.scale_factor());
        Vec2::new(logical.width, logical.height)
    }

    fn redraw(&mut self) {
        let ready = self.graphics.borrow().is_some();
        let Some(delta_time) = begin_frame(&mut self.page, &mut self.clock, ready) else {
            return;
        };

        let mut slot = self.graphics.borrow_mut();
        let Some(graphics) = slot.as_mut() else {
            return;
        };

        // The object is attached only after its geometry is on the GPU.
        let canvas = self.page.canvas();
        if canvas.is_running() && canvas.object().is_none() {
            if !graphics.renderer.has_mesh() {
                if let Some(setup) = canvas.setup() {
                    let size = setup.cube_size;
                    graphics.renderer.upload_mesh(&graphics.gpu, size);
                }
            }
            if graphics.renderer.has_mesh() {
                self.page.attach_canvas_object();
            }
        }

        self.page.frame(delta_time);

        let frame = self.clock.frame_count();
        if frame % LOGGING_TIMESTEP == 0 {
            log::trace!(
                "frame {frame}: dt {delta_time:.4}s, entrance settled: {}, canvas frames: {}",
                self.page.sequencer().is_settled(),
                self.page.canvas().frames_run()
            );
        }

        let list = self.page.draw_list();
        if let Err(e) = graphics.renderer.render(&graphics.gpu, &list) {
            match e {
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                    graphics.gpu.reconfigure();
                }
                wgpu::SurfaceError::OutOfMemory => {
                    log::error!("render: out of memory, exiting");
                    self.should_exit = true;
                }
                _ => log::error!("render error: {e:?}"),
            }
        }
    }

    fn perform(&self, action: PageAction) {
        match action {
            PageAction::Dial(target) => {
                cfg_if::cfg_if! {
                    if #[cfg(target_arch = "wasm32")] {
                        let Some(window) = web_sys::window() else {
                            return;
                        };
                        if let Err(e) = window.location().set_href(&target) {
                            log::error!("navigation to {target} failed: {e:?}");
                        }
                    } else {
                        log::info!("dial requested: {target}");
                    }
                }
            }
        }
    }

    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        self.page.teardown();
        if let Some(graphics) = self.graphics.borrow_mut().as_mut() {
            graphics.renderer.release_mesh();
        }
        event_loop.exit();
    }

    #[cfg(target_arch = "wasm32")]
    fn attach_canvas(window: &Window) {
        use winit::platform::web::WindowExtWebSys;

        let Some(canvas) = window.canvas() else {
            return;
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let container: web_sys::Element = match document.get_element_by_id("app") {
            Some(element) => element,
            None => match document.body() {
                Some(body) => body.into(),
                None => return,
            },
        };

        canvas.set_width(DIMX);
        canvas.set_height(DIMY);
        let style = canvas.style();
        for (property, value) in [("width", "100%"), ("height", "100vh"), ("display", "block")] {
            if let Err(e) = style.set_property(property, value) {
                log::warn!("canvas style {property}: {e:?}");
            }
        }

        if let Err(e) = container.append_child(&web_sys::Element::from(canvas)) {
            log::error!("couldn't append canvas to document: {e:?}");
        }
    }
}

// Activates the page on the first frame that can be painted, so the entrance
// never plays out while the surface is still being set up. Returns the frame's
// delta time, or None while there is nothing to paint on.
fn begin_frame(page: &mut Page, clock: &mut FrameClock, surface_ready: bool) -> Option<f32> {
    if !surface_ready {
        return None;
    }
    if !page.sequencer().is_started() {
        page.activate();
    }
    Some(clock.tick())
}

impl ApplicationHandler for HeroApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(DIMX, DIMY));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        cfg_if::cfg_if! {
            if #[cfg(target_arch = "wasm32")] {
                Self::attach_canvas(&window);

                let slot = self.graphics.clone();
                let window_clone = window.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match GpuState::new(window_clone).await {
                        Ok(gpu) => *slot.borrow_mut() = Some(Graphics::new(gpu)),
                        Err(e) => log::error!("gpu setup failed: {e}"),
                    }
                });
            } else {
                match pollster::block_on(GpuState::new(window.clone())) {
                    Ok(gpu) => *self.graphics.borrow_mut() = Some(Graphics::new(gpu)),
                    Err(e) => {
                        log::error!("gpu setup failed: {e}");
                        event_loop.exit();
                        return;
                    }
                }
            }
        }

        // The entrance and the canvas start with the first paintable frame.
        self.page.resize(Self::logical_size(&window, window.inner_size()));

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let window = match &self.window {
            Some(window) => window.clone(),
            None => return,
        };

        if window.id() != id {
            return;
        }

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(window.scale_factor());
                self.page.pointer_moved(Vec2::new(logical.x, logical.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.page.pointer_left();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButtons::LEFT,
                    MouseButton::Right => PointerButtons::RIGHT,
                    MouseButton::Middle => PointerButtons::MIDDLE,
                    _ => return,
                };

                if state == ElementState::Pressed {
                    self.page.pointer_pressed(button);
                } else if let Some(action) = self.page.pointer_released(button) {
                    self.perform(action);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // Positive wheel values scroll toward the top of the document.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * self.page.config().scroll_line_height,
                    MouseScrollDelta::PixelDelta(p) => -(p.y / window.scale_factor()) as f32,
                };
                self.page.wheel(delta_y);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(graphics) = self.graphics.borrow_mut().as_mut() {
                    graphics.gpu.resize(physical_size.width, physical_size.height);
                }
                self.page.resize(Self::logical_size(&window, physical_size));
            }
            WindowEvent::CloseRequested => {
                self.teardown(event_loop);
                return;
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if self.should_exit {
                    self.teardown(event_loop);
                    return;
                }
                window.request_redraw();
            }
            _ => {}
        }
    }
}
