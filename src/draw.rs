//! Render loop driver.
//!
//! A [`RenderLoop`] owns one layer's drawables and knows how to paint a frame.
//! When frames run is up to a [`FrameDriver`]: in the browser that is
//! `requestAnimationFrame`, on the host a [`ManualDriver`] advanced by hand.
//! Either way the driver hands back a [`Teardown`] that stops the loop.

use std::cell::RefCell;
use std::rc::Rc;

use crate::body::Body;
use crate::context::DrawContext;
use crate::drawable::Drawable;
use crate::error::StarfieldError;
use crate::surface::Surface;

/// Frame-skipping pacer: the host calls back on every repaint, and a frame only
/// runs once `1000 / fps` milliseconds have passed since the last one ran.
#[derive(Debug, Clone)]
pub struct FramePacer {
    step_ms: f64,
    last: Option<f64>,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        let step_ms = if fps == 0 {
            0.0
        } else {
            1000.0 / f64::from(fps)
        };
        Self {
            step_ms,
            last: None,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Whether a frame should run at `now_ms`. Records `now_ms` when it does.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last {
            if now_ms - last < self.step_ms {
                return false;
            }
        }
        self.last = Some(now_ms);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Ready,
    Running,
    Stopped,
}

/// One layer: a context, its drawables in paint order, and an optional
/// background fill.
pub struct RenderLoop<S> {
    draw: Rc<DrawContext<S>>,
    bodies: Vec<Body>,
    bg_color: Option<String>,
    pacer: FramePacer,
    state: LoopState,
    frames: u64,
}

impl<S: Surface> RenderLoop<S> {
    pub fn new(draw: Rc<DrawContext<S>>, bodies: Vec<Body>, bg_color: Option<String>) -> Self {
        let pacer = FramePacer::new(draw.fps());
        Self {
            draw,
            bodies,
            bg_color,
            pacer,
            state: LoopState::Ready,
            frames: 0,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Frames painted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_animated(&self) -> bool {
        self.draw.is_animated()
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Whether the driver should keep scheduling repaints for this loop.
    pub fn wants_frames(&self) -> bool {
        self.is_running() && self.is_animated()
    }

    /// Save the surface state and paint the first frame. No-op unless the
    /// loop is fresh.
    pub fn start(&mut self, now_ms: f64) {
        if self.state != LoopState::Ready {
            return;
        }
        self.draw.surface().save();
        self.state = LoopState::Running;
        self.tick(now_ms);
    }

    /// Repaint callback. Returns whether a frame was painted.
    ///
    /// A static layer (`fps == 0`) paints exactly once.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        let due = if self.is_animated() {
            self.pacer.ready(now_ms)
        } else {
            self.frames == 0
        };
        if !due {
            return false;
        }
        self.render_frame();
        true
    }

    /// Clear, fill the background, then draw every body in order.
    ///
    /// A body that fails is logged and skipped; the rest of the frame still
    /// paints.
    pub fn render_frame(&mut self) {
        let draw: &DrawContext<S> = &self.draw;
        let (width, height) = (draw.width(), draw.height());
        let surface = draw.surface();
        surface.clear_rect(0.0, 0.0, width, height);
        if let Some(bg) = &self.bg_color {
            surface.set_global_alpha(1.0);
            surface.set_fill_color(bg);
            surface.fill_rect(0.0, 0.0, width, height);
        }

        for (i, body) in self.bodies.iter_mut().enumerate() {
            if let Err(err) = body.draw(draw) {
                log::warn!("{:?} #{i} failed to draw: {err}", body.kind());
            }
        }
        self.frames += 1;
    }

    /// Restore the surface state saved by [`RenderLoop::start`] and stop.
    /// Safe to call repeatedly and before `start`.
    pub fn teardown(&mut self) {
        if self.state == LoopState::Running {
            self.draw.surface().restore();
        }
        self.state = LoopState::Stopped;
    }
}

/// One-shot cancellation handle. Running it more than once is a no-op.
#[derive(Default)]
pub struct Teardown(Option<Box<dyn FnOnce()>>);

impl Teardown {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(f)))
    }

    pub fn run(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }

    pub fn is_done(&self) -> bool {
        self.0.is_none()
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("done", &self.is_done())
            .finish()
    }
}

/// Runs render loops on the platform's repaint schedule.
pub trait FrameDriver<S: Surface> {
    /// Start `render_loop` (painting its first frame right away) and keep
    /// repainting it while it is animated.
    ///
    /// # Errors
    ///
    /// Fails when the first repaint cannot be scheduled.
    fn drive(&mut self, render_loop: RenderLoop<S>) -> Result<Teardown, StarfieldError>;
}

/// Host driver: repaints happen only when [`ManualDriver::advance`] is called.
pub struct ManualDriver<S> {
    now_ms: f64,
    loops: Vec<Rc<RefCell<RenderLoop<S>>>>,
}

impl<S> Default for ManualDriver<S> {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            loops: Vec::new(),
        }
    }
}

impl<S: Surface> ManualDriver<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loops that have not been torn down, in the order they were started.
    pub fn loops(&self) -> Vec<Rc<RefCell<RenderLoop<S>>>> {
        self.loops
            .iter()
            .filter(|l| l.borrow().is_running())
            .cloned()
            .collect()
    }

    /// Move the clock forward and deliver one repaint callback to every live
    /// loop. Returns how many frames were painted.
    pub fn advance(&mut self, ms: f64) -> usize {
        self.now_ms += ms;
        self.loops.retain(|l| l.borrow().is_running());
        let mut painted = 0;
        for render_loop in &self.loops {
            if render_loop.borrow_mut().tick(self.now_ms) {
                painted += 1;
            }
        }
        painted
    }
}

impl<S: Surface + 'static> FrameDriver<S> for ManualDriver<S> {
    fn drive(&mut self, render_loop: RenderLoop<S>) -> Result<Teardown, StarfieldError> {
        let shared = Rc::new(RefCell::new(render_loop));
        shared.borrow_mut().start(self.now_ms);
        self.loops.push(Rc::clone(&shared));
        Ok(Teardown::new(move || shared.borrow_mut().teardown()))
    }
}
