//! The drawing surface seam.
//!
//! Drawables only ever talk to a [`Surface`]. In the browser that is a
//! `CanvasRenderingContext2d` (see `wasm::canvas`); on the host it is a
//! [`crate::recording::RecordingSurface`]. Surface state (fill style, global
//! alpha, shadow blur) persists between calls, so every drawable must set the
//! properties it depends on.

use crate::error::DrawResult;

/// A radial gradient between two circles, with color stops in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub x0: f64,
    pub y0: f64,
    pub r0: f64,
    pub x1: f64,
    pub y1: f64,
    pub r1: f64,
    pub stops: Vec<(f64, String)>,
}

impl RadialGradient {
    /// Gradient centered on `(x, y)` spreading from the center out to `radius`.
    #[must_use]
    pub fn centered(x: f64, y: f64, radius: f64) -> Self {
        Self {
            x0: x,
            y0: y,
            r0: 0.0,
            x1: x,
            y1: y,
            r1: radius,
            stops: Vec::new(),
        }
    }

    #[must_use]
    pub fn stop(mut self, offset: f64, color: impl Into<String>) -> Self {
        self.stops.push((offset, color.into()));
        self
    }
}

/// 2D drawing commands used by the starfield.
///
/// Methods take `&self`: the underlying canvas context is a shared handle.
pub trait Surface {
    /// Current backing-store width in pixels (uncached).
    fn width(&self) -> f64;
    /// Current backing-store height in pixels (uncached).
    fn height(&self) -> f64;
    /// Set the backing-store size. Clears the surface as a side effect.
    fn resize(&self, width: u32, height: u32);

    fn save(&self);
    fn restore(&self);

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);

    fn set_fill_color(&self, color: &str);
    /// Use `gradient` as the fill style.
    ///
    /// # Errors
    ///
    /// Fails when the gradient geometry or a stop is rejected.
    fn set_fill_gradient(&self, gradient: &RadialGradient) -> DrawResult;
    fn set_global_alpha(&self, alpha: f64);
    fn set_shadow_blur(&self, blur: f64);

    fn begin_path(&self);
    fn close_path(&self);
    /// # Errors
    ///
    /// Fails on a negative radius.
    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> DrawResult;
    /// # Errors
    ///
    /// Fails on a negative radius.
    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start: f64,
        end: f64,
    ) -> DrawResult;
    fn fill(&self);
}
