//! Randomization helpers used by the procedural generators.
//!
//! Every helper takes the generator explicitly so scenes can be replayed from a
//! seed.

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform value in `[min, max)`. Returns `min` when the range is empty.
pub fn between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

/// Uniform value in `[value - tolerance, value + tolerance)`.
pub fn around<R: Rng + ?Sized>(rng: &mut R, value: f64, tolerance: f64) -> f64 {
    value - tolerance + rng.gen::<f64>() * tolerance * 2.0
}

/// Like [`around`], with the tolerance given as a fraction of `value`
/// (`0.5` means ±50%).
pub fn around_percent<R: Rng + ?Sized>(rng: &mut R, value: f64, fraction: f64) -> f64 {
    around(rng, value, fraction * value)
}

/// `1.0` or `-1.0` with equal probability.
pub fn positive_or_negative<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// A shuffled copy of `items`; the input is left untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Fresh seed for a child generator, so each entity owns its own stream.
pub fn child_seed<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen()
}
