//! Headless [`Surface`] that records every command instead of painting.

use std::cell::{Cell, RefCell};

use crate::error::{DrawError, DrawResult};
use crate::surface::{RadialGradient, Surface};

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Resize { width: u32, height: u32 },
    Save,
    Restore,
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    FillColor(String),
    FillGradient(RadialGradient),
    GlobalAlpha(f64),
    ShadowBlur(f64),
    BeginPath,
    ClosePath,
    Arc { x: f64, y: f64, radius: f64 },
    Ellipse {
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
    },
    Fill,
}

/// Records commands in call order. Rejects negative radii the way a canvas does.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: Cell<u32>,
    height: Cell<u32>,
    commands: RefCell<Vec<Command>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Cell::new(width),
            height: Cell::new(height),
            commands: RefCell::default(),
        }
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        self.commands.borrow().clone()
    }

    /// Drop the recorded history.
    pub fn clear_commands(&self) {
        self.commands.borrow_mut().clear();
    }

    /// Number of recorded commands matching `pred`.
    pub fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.commands.borrow().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, command: Command) {
        self.commands.borrow_mut().push(command);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        f64::from(self.width.get())
    }

    fn height(&self) -> f64 {
        f64::from(self.height.get())
    }

    fn resize(&self, width: u32, height: u32) {
        self.width.set(width);
        self.height.set(height);
        self.push(Command::Resize { width, height });
    }

    fn save(&self) {
        self.push(Command::Save);
    }

    fn restore(&self) {
        self.push(Command::Restore);
    }

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.push(Command::ClearRect { x, y, w, h });
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.push(Command::FillRect { x, y, w, h });
    }

    fn set_fill_color(&self, color: &str) {
        self.push(Command::FillColor(color.to_owned()));
    }

    fn set_fill_gradient(&self, gradient: &RadialGradient) -> DrawResult {
        if gradient.r0 < 0.0 || gradient.r1 < 0.0 {
            return Err(DrawError::canvas("createRadialGradient", "negative radius"));
        }
        self.push(Command::FillGradient(gradient.clone()));
        Ok(())
    }

    fn set_global_alpha(&self, alpha: f64) {
        self.push(Command::GlobalAlpha(alpha));
    }

    fn set_shadow_blur(&self, blur: f64) {
        self.push(Command::ShadowBlur(blur));
    }

    fn begin_path(&self) {
        self.push(Command::BeginPath);
    }

    fn close_path(&self) {
        self.push(Command::ClosePath);
    }

    fn arc(&self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) -> DrawResult {
        if radius < 0.0 {
            let reason = format!("negative radius {radius}");
            return Err(DrawError::canvas("arc", reason));
        }
        self.push(Command::Arc { x, y, radius });
        Ok(())
    }

    fn ellipse(
        &self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        _start: f64,
        _end: f64,
    ) -> DrawResult {
        if radius_x < 0.0 || radius_y < 0.0 {
            return Err(DrawError::canvas("ellipse", "negative radius"));
        }
        self.push(Command::Ellipse {
            x,
            y,
            radius_x,
            radius_y,
            rotation,
        });
        Ok(())
    }

    fn fill(&self) {
        self.push(Command::Fill);
    }
}
