//! Error types shared by the core and the browser adapter.

use thiserror::Error;

/// A CSS color string that could not be turned into channels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("unsupported color format: {0:?}")]
    Unsupported(String),
    #[error("invalid color channel {channel:?} in {input:?}")]
    Channel { input: String, channel: String },
}

/// Failure of a single drawing command against a surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// The canvas rejected a call (negative radius, non-finite value, ...).
    #[error("canvas call `{call}` failed: {reason}")]
    Canvas { call: &'static str, reason: String },
    #[error("2d rendering context unavailable")]
    SurfaceUnavailable,
}

impl DrawError {
    pub fn canvas(call: &'static str, reason: impl Into<String>) -> Self {
        Self::Canvas {
            call,
            reason: reason.into(),
        }
    }
}

/// Top-level failure surfaced by [`crate::starfield::Starfield`] and the entry point.
#[derive(Debug, Error)]
pub enum StarfieldError {
    #[error("invalid starfield config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("could not schedule repaint: {0}")]
    Schedule(String),
    #[error(transparent)]
    Draw(#[from] DrawError),
}

pub type DrawResult = Result<(), DrawError>;
