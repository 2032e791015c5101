//! Shared rendering context: a surface, its frame rate and cached dimensions.

use std::cell::Cell;

use crate::surface::Surface;

/// Wraps a [`Surface`] with the target frame rate of its layer.
///
/// Width and height are read from the surface once and cached. After the
/// surface is resized, [`DrawContext::recalc`] must run before the next draw
/// that depends on canvas size; until then the old dimensions are returned.
pub struct DrawContext<S> {
    surface: S,
    fps: u32,
    width: Cell<Option<f64>>,
    height: Cell<Option<f64>>,
}

impl<S: Surface> DrawContext<S> {
    /// `fps == 0` marks a static layer that is drawn exactly once.
    pub fn new(surface: S, fps: u32) -> Self {
        Self {
            surface,
            fps,
            width: Cell::new(None),
            height: Cell::new(None),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn is_animated(&self) -> bool {
        self.fps > 0
    }

    pub fn width(&self) -> f64 {
        cached(&self.width, || self.surface.width())
    }

    pub fn height(&self) -> f64 {
        cached(&self.height, || self.surface.height())
    }

    pub fn min_side(&self) -> f64 {
        self.width().min(self.height())
    }

    pub fn max_side(&self) -> f64 {
        self.width().max(self.height())
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width() / 2.0, self.height() / 2.0)
    }

    /// Forget cached dimensions; the next read goes back to the surface.
    pub fn recalc(&self) {
        self.width.set(None);
        self.height.set(None);
    }
}

fn cached(slot: &Cell<Option<f64>>, read: impl FnOnce() -> f64) -> f64 {
    if let Some(v) = slot.get() {
        return v;
    }
    let v = read();
    slot.set(Some(v));
    v
}
