//! Builds the drawable population from a [`StarfieldConfig`].

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;

use crate::astre::AstreArgs;
use crate::body::Body;
use crate::color::Color;
use crate::comet::Comet;
use crate::config::{Range, StarfieldConfig};
use crate::context::DrawContext;
use crate::nebula::Nebula;
use crate::random;
use crate::star::Star;
use crate::surface::Surface;

/// Outer edge of the star disc, in percent of the shorter side. Stars reach
/// past the canvas edge so corners are populated too.
const STAR_SPREAD: f64 = 120.0;
/// Config rotation speed to degrees per frame.
const ROTATION_SCALE: f64 = 0.015;
const ROTATION_JITTER: f64 = 0.005;
const COMET_SLOTS: usize = 1;

/// Everything one generation pass produced.
#[derive(Debug)]
pub struct Scene {
    pub nebula: Rc<RefCell<Nebula>>,
    pub stars: Vec<Star>,
    pub comets: Vec<Comet>,
}

impl Scene {
    /// Background layer contents.
    pub fn background(&self) -> Vec<Body> {
        vec![Body::Nebula(Rc::clone(&self.nebula))]
    }

    /// Foreground layer contents: stars first, then comets on top. Consumes
    /// the stars and comets.
    pub fn into_foreground(self) -> Vec<Body> {
        self.stars
            .into_iter()
            .map(Body::from)
            .chain(self.comets.into_iter().map(Body::from))
            .collect()
    }
}

/// Generate a full scene. A previous nebula is reused (re-intensified) rather
/// than regenerated; stars and comets are always rebuilt against the current
/// foreground size.
pub fn generate<S: Surface, R: Rng + ?Sized>(
    config: &StarfieldConfig,
    foreground: &DrawContext<S>,
    nebula: Option<Rc<RefCell<Nebula>>>,
    rng: &mut R,
) -> Scene {
    let nebula = generate_nebula(nebula, config.nebula_intensity, rng);
    let stars = generate_stars(
        foreground,
        config.stars_count,
        &config.stars_color,
        config.stars_size,
        config.stars_rotation_speed,
        rng,
    );
    let comets = generate_comets(config.comet_frequency, rng);
    let (star_count, comet_count) = (stars.len(), comets.len());
    log::debug!("generated scene: {star_count} stars, {comet_count} comets");
    Scene {
        nebula,
        stars,
        comets,
    }
}

pub fn generate_nebula<R: Rng + ?Sized>(
    existing: Option<Rc<RefCell<Nebula>>>,
    intensity: f64,
    rng: &mut R,
) -> Rc<RefCell<Nebula>> {
    match existing {
        Some(nebula) => {
            nebula.borrow_mut().set_intensity(intensity);
            nebula
        }
        None => Rc::new(RefCell::new(Nebula::new(intensity, rng))),
    }
}

pub fn generate_stars<S: Surface, R: Rng + ?Sized>(
    draw: &DrawContext<S>,
    count: usize,
    color: &Color,
    size: Range,
    rotation_speed: f64,
    rng: &mut R,
) -> Vec<Star> {
    let fill = color.to_canvas_color();
    (0..count)
        .map(|_| {
            let width = match size {
                Range::Fixed(w) => w,
                Range::Between(min, max) => random::between(rng, min, max),
            };
            // sqrt of a product of two uniforms: denser toward the middle.
            let distance = STAR_SPREAD * (rng.gen::<f64>() * rng.gen::<f64>()).sqrt();
            let speed = random::around(rng, rotation_speed * ROTATION_SCALE, ROTATION_JITTER);
            let args = AstreArgs {
                width,
                distance,
                speed,
                ..AstreArgs::default()
            };
            Star::new(draw, args, fill.clone(), rng)
        })
        .collect()
}

pub fn generate_comets<R: Rng + ?Sized>(frequency: f64, rng: &mut R) -> Vec<Comet> {
    (0..COMET_SLOTS)
        .map(|_| Comet::new(frequency, random::child_seed(rng)))
        .collect()
}
