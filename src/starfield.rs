//! Orchestrator: owns both layers, sizes them from the container and
//! (re)starts rendering.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::body::Body;
use crate::config::StarfieldConfig;
use crate::context::DrawContext;
use crate::draw::{FrameDriver, RenderLoop, Teardown};
use crate::error::StarfieldError;
use crate::nebula::Nebula;
use crate::scene;
use crate::surface::Surface;

/// Foreground (stars, comets) repaint rate.
pub const FOREGROUND_FPS: u32 = 40;
/// The nebula layer is painted once per (re)start.
pub const BACKGROUND_FPS: u32 = 0;
/// Background backing store is the container size divided by this.
pub const BACKGROUND_DIVISOR: f64 = 3.0;
/// Foreground backing store is the container size times this.
pub const FOREGROUND_SCALE: f64 = 2.0;

/// Container size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Backing-store sizes `(background, foreground)` for a container, truncated
/// to whole pixels.
#[must_use]
pub fn canvas_sizes(container: Size) -> ((u32, u32), (u32, u32)) {
    let background = (
        to_pixels(container.width / BACKGROUND_DIVISOR),
        to_pixels(container.height / BACKGROUND_DIVISOR),
    );
    let foreground = (
        to_pixels(container.width * FOREGROUND_SCALE),
        to_pixels(container.height * FOREGROUND_SCALE),
    );
    (background, foreground)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(v: f64) -> u32 {
    v.max(0.0) as u32
}

pub struct Starfield<S, D> {
    config: StarfieldConfig,
    background: Rc<DrawContext<S>>,
    foreground: Rc<DrawContext<S>>,
    driver: D,
    nebula: Option<Rc<RefCell<Nebula>>>,
    background_teardown: Teardown,
    foreground_teardown: Teardown,
    init_complete: bool,
    rng: StdRng,
}

impl<S: Surface + 'static, D: FrameDriver<S>> Starfield<S, D> {
    pub fn new(
        config: StarfieldConfig,
        background: S,
        foreground: S,
        driver: D,
        seed: u64,
    ) -> Self {
        Self {
            config,
            background: Rc::new(DrawContext::new(background, BACKGROUND_FPS)),
            foreground: Rc::new(DrawContext::new(foreground, FOREGROUND_FPS)),
            driver,
            nebula: None,
            background_teardown: Teardown::default(),
            foreground_teardown: Teardown::default(),
            init_complete: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Size both canvases from `container`, regenerate the scene and start
    /// both layers. Loops from a previous call are stopped first.
    ///
    /// # Errors
    ///
    /// Fails when the driver cannot schedule repaints.
    pub fn init(&mut self, container: Size) -> Result<(), StarfieldError> {
        self.stop();
        self.adjust_size(container);

        let scene = scene::generate(
            &self.config,
            &*self.foreground,
            self.nebula.take(),
            &mut self.rng,
        );
        self.nebula = Some(Rc::clone(&scene.nebula));

        let bg_color = self.config.bg_color.to_canvas_color();
        let bodies = scene.background();
        let background = RenderLoop::new(Rc::clone(&self.background), bodies, Some(bg_color));
        self.background_teardown = self.driver.drive(background)?;

        let bodies = scene.into_foreground();
        let foreground = RenderLoop::new(Rc::clone(&self.foreground), bodies, None);
        self.foreground_teardown = self.driver.drive(foreground)?;

        if !self.init_complete {
            log::info!("starfield started ({} stars)", self.config.stars_count);
        }
        self.init_complete = true;
        Ok(())
    }

    /// Same as [`Starfield::init`]: the nebula survives, stars and comets are
    /// rebuilt for the new size.
    ///
    /// # Errors
    ///
    /// See [`Starfield::init`].
    pub fn on_resize(&mut self, container: Size) -> Result<(), StarfieldError> {
        log::debug!("resize to {}x{}", container.width, container.height);
        self.init(container)
    }

    /// Change nebula brightness and repaint only the background layer.
    ///
    /// # Errors
    ///
    /// Fails when the driver cannot schedule the repaint.
    pub fn set_nebula_intensity(&mut self, intensity: f64) -> Result<(), StarfieldError> {
        self.config.nebula_intensity = intensity;
        let Some(nebula) = &self.nebula else {
            return Ok(());
        };
        nebula.borrow_mut().set_intensity(intensity);
        let bodies = vec![Body::from(Rc::clone(nebula))];

        let bg_color = self.config.bg_color.to_canvas_color();
        let background = RenderLoop::new(Rc::clone(&self.background), bodies, Some(bg_color));
        self.background_teardown.run();
        self.background_teardown = self.driver.drive(background)?;
        Ok(())
    }

    /// Stop both layers. Idempotent.
    pub fn destroy(&mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.background_teardown.run();
        self.foreground_teardown.run();
    }

    fn adjust_size(&mut self, container: Size) {
        let ((bw, bh), (fw, fh)) = canvas_sizes(container);
        self.background.surface().resize(bw, bh);
        self.foreground.surface().resize(fw, fh);
        self.background.recalc();
        self.foreground.recalc();
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn background(&self) -> &Rc<DrawContext<S>> {
        &self.background
    }

    pub fn foreground(&self) -> &Rc<DrawContext<S>> {
        &self.foreground
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn nebula(&self) -> Option<&Rc<RefCell<Nebula>>> {
        self.nebula.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.init_complete
    }
}
