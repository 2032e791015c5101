//! Declarative starfield configuration, as passed in by the page.

use serde::Deserialize;

use crate::color::Color;
use crate::error::StarfieldError;

/// Either a fixed value or a `[min, max]` range to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Range {
    Fixed(f64),
    Between(f64, f64),
}

/// Field names follow the JS object: `bgColor`, `nebulaIntensity`,
/// `starsColor`, `starsCount`, `starsRotationSpeed`, `starsSize` and
/// `cometFrequency`.
///
/// Values are trusted; the page is expected to pass sane numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarfieldConfig {
    pub bg_color: Color,
    pub nebula_intensity: f64,
    pub stars_color: Color,
    pub stars_count: usize,
    /// Scaled by 0.015 into degrees per frame.
    pub stars_rotation_speed: f64,
    /// Star radius as a percentage of the canvas's shorter side.
    pub stars_size: Range,
    /// Expected comet spawns per second, times 100.
    pub comet_frequency: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            bg_color: Color::Css("#030014".to_owned()),
            nebula_intensity: 1.0,
            stars_color: Color::Rgb([255, 255, 255]),
            stars_count: 300,
            stars_rotation_speed: 1.0,
            stars_size: Range::Between(0.05, 0.15),
            comet_frequency: 15.0,
        }
    }
}

impl StarfieldConfig {
    /// Parse a JSON object, filling missing keys from [`Default`].
    ///
    /// # Errors
    ///
    /// Returns [`StarfieldError::Config`] on malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, StarfieldError> {
        Ok(serde_json::from_str(json)?)
    }
}
