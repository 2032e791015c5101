//! DOM wiring: finds the container and canvases, binds window events and
//! exposes the orchestrator's entry points to JS.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, Window};

use super::canvas::CanvasSurface;
use super::render::AnimationFrameDriver;
use crate::config::StarfieldConfig;
use crate::error::StarfieldError;
use crate::starfield::{Size, Starfield};

pub const CONTAINER_ID: &str = "starfield-container";
pub const BACKGROUND_ID: &str = "starfield-bg";
pub const FOREGROUND_ID: &str = "starfield-fg";
/// Added to each canvas after its first paint; the page's CSS fades it in.
pub const FADE_IN_CLASS: &str = "starfield-fadein";

type Field = Starfield<CanvasSurface, AnimationFrameDriver>;

struct Mount {
    starfield: RefCell<Field>,
    container: HtmlElement,
    canvases: [HtmlCanvasElement; 2],
}

impl Mount {
    fn container_size(&self) -> Size {
        let width = f64::from(self.container.offset_width());
        let height = f64::from(self.container.offset_height());
        Size::new(width, height)
    }

    fn init(&self) -> Result<(), StarfieldError> {
        self.starfield.borrow_mut().init(self.container_size())?;
        for canvas in &self.canvases {
            if let Err(err) = canvas.class_list().add_1(FADE_IN_CLASS) {
                log::debug!("could not add {FADE_IN_CLASS}: {err:?}");
            }
        }
        Ok(())
    }
}

fn to_js(err: StarfieldError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, StarfieldError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| StarfieldError::MissingElement(id.to_owned()))
}

fn random_seed() -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let noise = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clock = js_sys::Date::now() as u64;
    noise ^ clock.rotate_left(32)
}

/// A running starfield. Dropping (or `free()`-ing from JS) unbinds the window
/// listeners and stops rendering.
#[wasm_bindgen]
pub struct StarfieldHandle {
    mount: Rc<Mount>,
    window: Window,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

#[wasm_bindgen]
impl StarfieldHandle {
    /// Size, generate and start both layers.
    pub fn init(&self) -> Result<(), JsValue> {
        self.mount.init().map_err(to_js)
    }

    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&self) -> Result<(), JsValue> {
        let size = self.mount.container_size();
        self.mount
            .starfield
            .borrow_mut()
            .on_resize(size)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = setNebulaIntensity)]
    pub fn set_nebula_intensity(&self, intensity: f64) -> Result<(), JsValue> {
        self.mount
            .starfield
            .borrow_mut()
            .set_nebula_intensity(intensity)
            .map_err(to_js)
    }

    /// Stop rendering and unbind window events. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        let window = &self.window;
        for (event, listener) in self.listeners.drain(..) {
            let callback = listener.as_ref().unchecked_ref();
            if let Err(err) = window.remove_event_listener_with_callback(event, callback) {
                log::debug!("could not unbind {event}: {err:?}");
            }
        }
        self.mount.starfield.borrow_mut().destroy();
    }
}

impl Drop for StarfieldHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Mount the starfield on the page's container and canvases.
///
/// Returns `None` (and logs) when the page has no canvas-capable surface; the
/// background is decorative, so the page carries on without it.
pub fn mount(config: StarfieldConfig) -> Result<Option<StarfieldHandle>, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let lookup = || -> Result<_, StarfieldError> {
        let container: HtmlElement = element(&document, CONTAINER_ID)?;
        let bg_canvas: HtmlCanvasElement = element(&document, BACKGROUND_ID)?;
        let fg_canvas: HtmlCanvasElement = element(&document, FOREGROUND_ID)?;
        let background = CanvasSurface::acquire(bg_canvas.clone(), true)?;
        let foreground = CanvasSurface::acquire(fg_canvas.clone(), false)?;
        Ok((container, [bg_canvas, fg_canvas], background, foreground))
    };
    let (container, canvases, background, foreground) = match lookup() {
        Ok(parts) => parts,
        Err(err) => {
            log::warn!("starfield disabled: {err}");
            return Ok(None);
        }
    };

    let starfield = Starfield::new(
        config,
        background,
        foreground,
        AnimationFrameDriver::new(window.clone()),
        random_seed(),
    );
    let mount = Rc::new(Mount {
        starfield: RefCell::new(starfield),
        container,
        canvases,
    });

    let mut handle = StarfieldHandle {
        mount,
        window: window.clone(),
        listeners: Vec::new(),
    };
    handle.listen("resize")?;
    if document.ready_state() == "complete" {
        handle.init()?;
    } else {
        handle.listen("load")?;
    }
    Ok(Some(handle))
}

impl StarfieldHandle {
    fn listen(&mut self, event: &'static str) -> Result<(), JsValue> {
        let mount = Rc::clone(&self.mount);
        let listener = Closure::wrap(Box::new(move || {
            if let Err(err) = mount.init() {
                log::warn!("starfield {event} failed: {err}");
            }
        }) as Box<dyn FnMut()>);
        let window = &self.window;
        let callback = listener.as_ref().unchecked_ref();
        window.add_event_listener_with_callback(event, callback)?;
        self.listeners.push((event, listener));
        Ok(())
    }
}
