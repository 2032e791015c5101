//! Shooting comets: streaks that spawn at random, cross part of the canvas and
//! fade out.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::{rgba, Rgb};
use crate::context::DrawContext;
use crate::drawable::Drawable;
use crate::error::DrawResult;
use crate::random;
use crate::surface::{RadialGradient, Surface};

/// Base travel per frame, before ±15% jitter.
pub const COMET_SPEED: f64 = 115.0;
/// Length of the glow along the travel direction, in pixels.
pub const COMET_GLOW_LENGTH: f64 = 90.0;
pub const COMET_COLOR: Rgb = [255, 207, 207];
/// Opacity never drops below this once a streak is visible.
pub const COMET_MIN_OPACITY: f64 = 0.7;

/// Progress fraction at which fade-in hands over to fade-out.
const FADE_IN_END: f64 = 0.3;

/// One streak in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    pub start: (f64, f64),
    /// Radians.
    pub direction: f64,
    pub distance_to_target: f64,
    pub speed: f64,
    pub rgb: Rgb,
    pub width: f64,
    pub position: (f64, f64),
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CometState {
    #[default]
    Idle,
    Active(Show),
}

/// A comet slot. Idle most of the time; each frame it may start a new show.
#[derive(Debug, Clone)]
pub struct Comet {
    /// Expected spawns per second, times 100.
    frequency: f64,
    state: CometState,
    rng: StdRng,
}

impl Comet {
    pub fn new(frequency: f64, seed: u64) -> Self {
        Self {
            frequency,
            state: CometState::Idle,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &CometState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, CometState::Active(_))
    }

    /// Advance one frame: move the active show or roll for a new one.
    pub fn step<S: Surface>(&mut self, draw: &DrawContext<S>) {
        match &mut self.state {
            CometState::Active(show) => {
                if advance(show) {
                    self.state = CometState::Idle;
                }
            }
            CometState::Idle => {
                let p = spawn_probability(self.frequency, draw.fps());
                if p > 0.0 && self.rng.gen::<f64>() < p {
                    let show = new_show(&mut self.rng, draw.width(), draw.height());
                    self.state = CometState::Active(show);
                }
            }
        }
    }
}

/// Chance that an idle comet starts a show on a given frame.
///
/// `frequency / 100` spawns per second spread over `fps` frames. A static
/// layer (`fps == 0`) never spawns.
#[must_use]
pub fn spawn_probability(frequency: f64, fps: u32) -> f64 {
    if fps == 0 {
        return 0.0;
    }
    (frequency / 100.0 / f64::from(fps)).clamp(0.0, 1.0)
}

/// Opacity for a show that has covered `progress` of its target distance:
/// quick fade-in, slow fade-out, floored at [`COMET_MIN_OPACITY`].
#[must_use]
pub fn opacity_at(progress: f64) -> f64 {
    let raw = if progress < FADE_IN_END {
        progress
    } else {
        1.0 - progress
    };
    raw.min(1.0).max(COMET_MIN_OPACITY)
}

/// Move `show` one frame. Returns `true` once it has passed its target.
fn advance(show: &mut Show) -> bool {
    show.position.0 += show.speed * show.direction.cos();
    show.position.1 += show.speed * show.direction.sin();
    let dx = show.position.0 - show.start.0;
    let dy = show.position.1 - show.start.1;
    let traveled = dx.hypot(dy);
    show.opacity = opacity_at(traveled / show.distance_to_target);
    traveled > show.distance_to_target
}

fn new_show<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Show {
    let from_angle = random::between(rng, 0.0, 2.0 * PI);
    let heading = from_angle + PI;
    let max_side = width.max(height);
    let start = (
        random::around_percent(rng, from_angle.cos() * max_side / 3.0, 0.5) + width / 2.0,
        random::around_percent(rng, from_angle.sin() * max_side / 3.0, 0.5) + height / 2.0,
    );
    Show {
        start,
        direction: random::between(rng, heading - PI / 6.0, heading + PI / 6.0),
        distance_to_target: random::around_percent(rng, max_side * 0.6, 0.3),
        speed: random::around_percent(rng, COMET_SPEED, 0.15),
        rgb: COMET_COLOR,
        width: random::between(rng, 0.2, 0.8),
        position: start,
        opacity: 0.0,
    }
}

impl Drawable for Comet {
    fn draw<S: Surface>(&mut self, draw: &DrawContext<S>) -> DrawResult {
        self.step(draw);
        let CometState::Active(show) = &self.state else {
            return Ok(());
        };
        // Spawn frame: the head has not moved and nothing is visible yet.
        if show.opacity <= 0.0 {
            return Ok(());
        }

        let surface = draw.surface();
        surface.save();
        let result = paint(surface, show);
        surface.restore();
        result
    }
}

/// Elongated glow, long axis across the travel direction.
fn paint<S: Surface>(surface: &S, show: &Show) -> DrawResult {
    let (x, y) = show.position;
    let rotation = show.direction + PI / 2.0;
    surface.set_shadow_blur(0.0);
    surface.begin_path();
    surface.ellipse(x, y, show.width, COMET_GLOW_LENGTH, rotation, 0.0, PI * 2.0)?;
    surface.set_global_alpha(show.opacity);
    let glow = RadialGradient::centered(x, y, COMET_GLOW_LENGTH)
        .stop(0.0, rgba(show.rgb, 1.0))
        .stop(1.0, rgba(show.rgb, 0.0));
    surface.set_fill_gradient(&glow)?;
    surface.fill();
    Ok(())
}
