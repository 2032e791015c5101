
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::Window;

use super::canvas::CanvasSurface;
use crate::draw::{FrameDriver, RenderLoop, Teardown};
use crate::error::StarfieldError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drives render loops from `requestAnimationFrame`.
///
/// The browser calls back on every repaint; the loop's pacer decides whether
/// a frame is actually painted. Static layers are painted once and never
/// scheduled.
pub struct AnimationFrameDriver {
    window: Window,
}

impl AnimationFrameDriver {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn now(&self) -> f64 {
        self.window
            .performance()
            .map_or_else(js_sys::Date::now, |p| p.now())
    }
}

fn schedule_error(err: &JsValue) -> StarfieldError {
    StarfieldError::Schedule(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32, StarfieldError> {
    let slot = callback.borrow();
    let Some(callback) = slot.as_ref() else {
        return Err(StarfieldError::Schedule("no frame callback".into()));
    };
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|e| schedule_error(&e))
}

impl FrameDriver<CanvasSurface> for AnimationFrameDriver {
    fn drive(
        &mut self,
        render_loop: RenderLoop<CanvasSurface>,
    ) -> Result<Teardown, StarfieldError> {
        let state = Rc::new(RefCell::new(render_loop));
        state.borrow_mut().start(self.now());
        if !state.borrow().wants_frames() {
            return Ok(Teardown::new(move || state.borrow_mut().teardown()));
        }

        // `f` holds the animation-frame closure so that it can keep calling
        // `request_animation_frame` on itself. Storing it inside an `Option`
        // allows us to create the `Closure` first and then obtain a reference
        // to it from within itself.
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        {
            let state = state.clone();
            let pending = pending.clone();
            let window = self.window.clone();
            *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
                pending.set(None);
                if !state.borrow().wants_frames() {
                    return;
                }

                // schedule next
                match request_frame(&window, &f) {
                    Ok(id) => pending.set(Some(id)),
                    Err(err) => log::warn!("starfield stopped: {err}"),
                }
                state.borrow_mut().tick(now);
            }) as Box<dyn FnMut(f64)>));
        }
        pending.set(Some(request_frame(&self.window, &g)?));

        let window = self.window.clone();
        Ok(Teardown::new(move || {
            state.borrow_mut().teardown();
            if let Some(id) = pending.take() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    log::debug!("cancelAnimationFrame failed: {err:?}");
                }
            }
            // Dropping the closure breaks its self-reference.
            drop(g.borrow_mut().take());
        }))
    }
}
