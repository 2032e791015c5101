use std::f64::consts::PI;
use std::rc::Rc;

use rand::Rng;

use crate::astre::{Astre, AstreArgs};
use crate::color::round_coords;
use crate::context::DrawContext;
use crate::drawable::Drawable;
use crate::error::DrawResult;
use crate::surface::Surface;

/// A point of light orbiting the canvas center or another body.
#[derive(Debug, Clone)]
pub struct Star {
    astre: Rc<Astre>,
    color: String,
}

impl Star {
    /// `color` is a ready canvas fill style.
    pub fn new<S: Surface, R: Rng + ?Sized>(
        draw: &DrawContext<S>,
        args: AstreArgs,
        color: impl Into<String>,
        rng: &mut R,
    ) -> Self {
        Self {
            astre: Rc::new(Astre::new(draw, args, rng)),
            color: color.into(),
        }
    }

    /// Shared handle, for use as another body's origin.
    pub fn astre(&self) -> &Rc<Astre> {
        &self.astre
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

impl Drawable for Star {
    fn draw<S: Surface>(&mut self, draw: &DrawContext<S>) -> DrawResult {
        self.astre.rotate();
        let surface = draw.surface();
        surface.set_shadow_blur(0.0);
        surface.set_global_alpha(1.0);
        surface.begin_path();
        let (x, y) = round_coords(self.astre.origin_coords(draw));
        surface.arc(x, y, self.astre.width().round(), 0.0, PI * 2.0)?;
        surface.close_path();
        surface.set_fill_color(&self.color);
        surface.fill();
        Ok(())
    }
}
