//! Soft background glow.
//!
//! The cloud pattern is generated once and stored in canvas-relative units, so
//! the same nebula can be redrawn after a resize or an intensity change
//! without rolling a new pattern.

use rand::Rng;

use crate::color::{rgba, Rgb};
use crate::context::DrawContext;
use crate::drawable::Drawable;
use crate::error::DrawResult;
use crate::random;
use crate::surface::{RadialGradient, Surface};

const CLOUD_COUNT: usize = 14;

/// Hues the clouds are picked from, cycled after shuffling.
const PALETTE: [Rgb; 5] = [
    [84, 52, 168],
    [38, 76, 160],
    [140, 48, 132],
    [26, 110, 140],
    [170, 70, 110],
];

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    /// Center as fractions of canvas width and height.
    pub x: f64,
    pub y: f64,
    /// Radius as a fraction of the canvas's longer side.
    pub radius: f64,
    pub rgb: Rgb,
    /// Opacity at full intensity.
    pub alpha: f64,
}

#[derive(Debug, Clone)]
pub struct Nebula {
    clouds: Vec<Cloud>,
    intensity: f64,
}

impl Nebula {
    pub fn new<R: Rng + ?Sized>(intensity: f64, rng: &mut R) -> Self {
        let palette = random::shuffled(rng, &PALETTE);
        let clouds = (0..CLOUD_COUNT)
            .map(|i| Cloud {
                x: random::between(rng, -0.1, 1.1),
                y: random::between(rng, -0.1, 1.1),
                radius: random::between(rng, 0.15, 0.45),
                rgb: palette[i % palette.len()],
                alpha: random::around(rng, 0.25, 0.1),
            })
            .collect();
        log::debug!("generated nebula with {CLOUD_COUNT} clouds");
        Self { clouds, intensity }
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Change brightness in place; the cloud pattern is kept.
    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = intensity;
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }
}

impl Drawable for Nebula {
    fn draw<S: Surface>(&mut self, draw: &DrawContext<S>) -> DrawResult {
        let surface = draw.surface();
        let (width, height) = (draw.width(), draw.height());
        let max_side = draw.max_side();
        surface.set_shadow_blur(0.0);
        surface.set_global_alpha(1.0);

        for cloud in &self.clouds {
            let (x, y) = (cloud.x * width, cloud.y * height);
            let radius = cloud.radius * max_side;
            let alpha = cloud.alpha * self.intensity;
            let glow = RadialGradient::centered(x, y, radius)
                .stop(0.0, rgba(cloud.rgb, alpha))
                .stop(0.5, rgba(cloud.rgb, alpha * 0.35))
                .stop(1.0, rgba(cloud.rgb, 0.0));
            surface.set_fill_gradient(&glow)?;
            surface.fill_rect(x - radius, y - radius, radius * 2.0, radius * 2.0);
        }
        Ok(())
    }
}
