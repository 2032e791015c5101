//! Color parsing and formatting for canvas fill styles.

use serde::Deserialize;

use crate::error::ColorError;

/// Red, green and blue channels.
pub type Rgb = [u8; 3];

/// A color as accepted in the starfield configuration: either explicit
/// channels (`[255, 207, 207]`) or any CSS color string the canvas understands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Rgb(Rgb),
    Css(String),
}

impl Color {
    /// Fill style string for the canvas. Channel triples become opaque `rgba(...)`.
    #[must_use]
    pub fn to_canvas_color(&self) -> String {
        match self {
            Color::Rgb(rgb) => rgba(*rgb, 1.0),
            Color::Css(css) => css.clone(),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb)
    }
}

impl From<&str> for Color {
    fn from(css: &str) -> Self {
        Color::Css(css.to_owned())
    }
}

/// Parse `#rgb`, `#rrggbb` or `rgb(r, g, b)` / `rgba(r, g, b, a)` into channels.
///
/// # Errors
///
/// Returns [`ColorError`] when the string is in none of these forms or a
/// channel is not a number in `0..=255`.
pub fn parse_color(input: &str) -> Result<Rgb, ColorError> {
    let trimmed = input.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(input, hex);
    }

    let body = trimmed
        .strip_prefix("rgba(")
        .or_else(|| trimmed.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ColorError::Unsupported(input.to_owned()))?;

    let mut parts = body.split(',').map(str::trim);
    let mut rgb = [0u8; 3];
    for slot in &mut rgb {
        let part = parts
            .next()
            .ok_or_else(|| ColorError::Unsupported(input.to_owned()))?;
        *slot = part.parse().map_err(|_| ColorError::Channel {
            input: input.to_owned(),
            channel: part.to_owned(),
        })?;
    }
    Ok(rgb)
}

fn parse_hex(input: &str, hex: &str) -> Result<Rgb, ColorError> {
    let channel = |digits: &str| {
        u8::from_str_radix(digits, 16).map_err(|_| ColorError::Channel {
            input: input.to_owned(),
            channel: digits.to_owned(),
        })
    };

    match hex.len() {
        // Short form: each nibble is doubled (`f` -> `ff`).
        3 | 4 if hex.is_ascii() => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = channel(&hex[i..=i].repeat(2))?;
            }
            Ok(rgb)
        }
        6 | 8 if hex.is_ascii() => Ok([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ]),
        _ => Err(ColorError::Unsupported(input.to_owned())),
    }
}

/// CSS `rgba(...)` string for channels and an opacity in `[0, 1]`.
#[must_use]
pub fn rgba(rgb: Rgb, opacity: f64) -> String {
    let [r, g, b] = rgb;
    let a = opacity.clamp(0.0, 1.0);
    format!("rgba({r}, {g}, {b}, {a})")
}

/// Round both coordinates to whole pixels.
#[must_use]
pub fn round_coords((x, y): (f64, f64)) -> (f64, f64) {
    (x.round(), y.round())
}
