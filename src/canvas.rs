use crate::scene::{RenderedObject, SceneSetup};
use crate::scheduler::{CallbackId, FrameScheduler};

// One-shot boolean gating first-time initialisation of the canvas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MountFlag(bool);

impl MountFlag {
    pub const fn new() -> Self {
        Self(false)
    }

    // Flips the flag. Returns `true` only on the `false -> true` edge.
    pub fn set(&mut self) -> bool {
        if self.0 {
            return false;
        }
        self.0 = true;
        true
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasState {
    Unmounted,
    Running,
    Released,
}

// What the per-frame callbacks are allowed to touch.
pub struct SceneState {
    pub object: Option<RenderedObject>,
    pub skipped_frames: u64,
}

// ======================================
// === CANVAS ===
// ======================================

// Unmounted -> Running -> Released. The rotating object sits in an optional
// handle, filled once its geometry is uploaded; frames skip while it is empty.
pub struct Canvas {
    state: CanvasState,
    setup: Option<SceneSetup>,
    scene: SceneState,
    scheduler: FrameScheduler<SceneState>,
    rotation_callback: Option<CallbackId>,
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            state: CanvasState::Unmounted,
            setup: None,
            scene: SceneState {
                object: None,
                skipped_frames: 0,
            },
            scheduler: FrameScheduler::new(),
            rotation_callback: None,
        }
    }

    // Acquires the scene. Ignored unless the canvas is still unmounted.
    pub fn mount(&mut self, setup: SceneSetup) -> bool {
        if self.state != CanvasState::Unmounted {
            log::debug!("canvas: mount ignored in state {:?}", self.state);
            return false;
        }

        let id = self.scheduler.register(|scene: &mut SceneState, delta_time| {
            match scene.object.as_mut() {
                Some(object) => object.advance(delta_time),
                None => {
                    scene.skipped_frames += 1;
                    log::trace!("canvas: object not attached, skipping frame");
                }
            }
        });

        log::info!(
            "canvas: mounted (camera at {:?}, {} callback(s))",
            setup.camera.position(),
            self.scheduler.len()
        );

        self.rotation_callback = Some(id);
        self.setup = Some(setup);
        self.state = CanvasState::Running;
        true
    }

    // Fills the object handle with a fresh object. Only valid while running;
    // an already attached object is left untouched.
    pub fn attach_object(&mut self) -> bool {
        if self.state != CanvasState::Running || self.scene.object.is_some() {
            return false;
        }
        let Some(setup) = &self.setup else {
            return false;
        };
        let (rate_x, rate_y) = setup.rotation_rates;
        self.scene.object = Some(RenderedObject::new(rate_x, rate_y));
        log::debug!("canvas: object attached");
        true
    }

    // Runs one frame of the render loop. No-op unless running.
    pub fn frame(&mut self, delta_time: f32) {
        if self.state != CanvasState::Running {
            return;
        }
        self.scheduler.tick(&mut self.scene, delta_time.max(0.0));
    }

    // Releases the scene at page teardown. The canvas cannot be mounted again.
    pub fn release(&mut self) {
        if self.state == CanvasState::Released {
            return;
        }
        if let Some(id) = self.rotation_callback.take() {
            self.scheduler.unregister(id);
        }
        self.scheduler.clear();
        self.scene.object = None;
        self.setup = None;
        self.state = CanvasState::Released;
        log::info!("canvas: released");
    }

    pub fn state(&self) -> CanvasState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CanvasState::Running
    }

    pub fn object(&self) -> Option<&RenderedObject> {
        self.scene.object.as_ref()
    }

    pub fn object_count(&self) -> usize {
        usize::from(self.scene.object.is_some())
    }

    pub fn setup(&self) -> Option<&SceneSetup> {
        self.setup.as_ref()
    }

    pub fn setup_mut(&mut self) -> Option<&mut SceneSetup> {
        self.setup.as_mut()
    }

    pub fn skipped_frames(&self) -> u64 {
        self.scene.skipped_frames
    }

    pub fn frames_run(&self) -> u64 {
        self.scheduler.ticks()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
