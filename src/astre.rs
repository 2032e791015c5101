//! Orbit state shared by celestial bodies.
//!
//! An [`Astre`] orbits either the canvas center or another `Astre` (its
//! origin). The origin link is a [`Weak`] back-reference: the scene owns every
//! body, a child only looks its parent up when resolving a position. Cycles
//! cannot be built because an origin must exist before its children.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use rand::Rng;

use crate::context::DrawContext;
use crate::random;
use crate::surface::Surface;

/// Construction parameters. `width` and `distance` are percentages of the
/// canvas's shorter side.
#[derive(Debug, Clone, Default)]
pub struct AstreArgs {
    pub width: f64,
    pub distance: f64,
    /// Degrees per frame.
    pub speed: f64,
    pub origin: Option<Rc<Astre>>,
    /// Starting angle in degrees; random in `[0, 360)` when unset.
    pub start_angle: Option<f64>,
}

#[derive(Debug)]
pub struct Astre {
    relative_width: f64,
    relative_distance: f64,
    width: f64,
    distance: f64,
    speed: f64,
    /// Radians.
    angle: Cell<f64>,
    origin: Option<Weak<Astre>>,
}

impl Astre {
    /// Resolve relative sizes against `draw`'s current shorter side.
    pub fn new<S: Surface, R: Rng + ?Sized>(
        draw: &DrawContext<S>,
        args: AstreArgs,
        rng: &mut R,
    ) -> Self {
        let min_side = draw.min_side();
        let start_angle = args
            .start_angle
            .unwrap_or_else(|| random::between(rng, 0.0, 360.0));
        Self {
            relative_width: args.width,
            relative_distance: args.distance,
            width: args.width / 100.0 * min_side,
            distance: args.distance / 100.0 * min_side,
            speed: args.speed,
            angle: Cell::new(start_angle.to_radians()),
            origin: args.origin.as_ref().map(Rc::downgrade),
        }
    }

    /// Advance one frame.
    ///
    /// The wrap is `% 360` on a radian angle, so in practice the angle only
    /// grows; trigonometry downstream makes that invisible. Kept as-is because
    /// the configured rotation speeds are calibrated against it.
    pub fn rotate(&self) {
        let next = self.angle.get() + self.speed.to_radians();
        self.angle.set(next % 360.0);
    }

    pub fn angle(&self) -> f64 {
        self.angle.get()
    }

    /// Own angle plus the origin's angle (0 without origin).
    pub fn ref_angle(&self) -> f64 {
        self.angle() + self.origin().map_or(0.0, |o| o.angle())
    }

    /// Absolute width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Absolute orbit radius in pixels.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn relative_width(&self) -> f64 {
        self.relative_width
    }

    pub fn relative_distance(&self) -> f64 {
        self.relative_distance
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The orbit origin, if it is set and still alive.
    pub fn origin(&self) -> Option<Rc<Astre>> {
        self.origin.as_ref().and_then(Weak::upgrade)
    }

    /// Absolute position on the canvas.
    ///
    /// Without origin the body circles the canvas center at `distance`. With an
    /// origin it circles the origin's position at `distance + origin.width`,
    /// in the direction `origin.angle + angle`.
    pub fn origin_coords<S: Surface>(&self, draw: &DrawContext<S>) -> (f64, f64) {
        match self.origin() {
            None => {
                let (cx, cy) = draw.center();
                let (angle, reach) = (self.angle(), self.distance);
                (cx + angle.cos() * reach, cy + angle.sin() * reach)
            }
            Some(origin) => {
                let (ox, oy) = origin.origin_coords(draw);
                let angle = origin.angle() + self.angle();
                let reach = self.distance + origin.width();
                (ox + angle.cos() * reach, oy + angle.sin() * reach)
            }
        }
    }
}
