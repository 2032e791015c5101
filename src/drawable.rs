use crate::context::DrawContext;
use crate::error::DrawResult;
use crate::surface::Surface;

/// Something that advances its own animation state and paints itself.
///
/// Called once per executed frame, in registration order. Implementations must
/// not rely on surface state left behind by the previous drawable.
pub trait Drawable {
    /// # Errors
    ///
    /// Returns the first surface command that failed.
    fn draw<S: Surface>(&mut self, draw: &DrawContext<S>) -> DrawResult;
}
