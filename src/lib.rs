//! Animated starfield background for a static site.
//!
//! Two stacked canvases: a static background layer holding a soft nebula
//! glow, and a foreground layer where stars orbit the center and comets
//! streak across now and then. Compiled to WebAssembly; the page mounts the
//! canvases and calls `doStarfield(config)`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`starfield`] | Orchestrator: sizing, (re)generation, layer lifecycle |
//! | [`scene`] | Builds stars, comets and the nebula from a [`config::StarfieldConfig`] |
//! | [`draw`] | Render loop, frame pacer and the [`draw::FrameDriver`] seam |
//! | [`astre`] | Orbit math shared by celestial bodies |
//! | [`star`], [`comet`], [`nebula`] | The drawables, unified by [`body::Body`] |
//! | [`context`] | Surface + frame rate + cached dimensions |
//! | [`surface`] | Drawing-command trait; [`recording`] is the headless implementation |
//! | [`color`], [`random`] | Color parsing and randomization helpers |
//!
//! Everything above builds on the host; browser bindings live in the
//! `wasm32`-only `wasm` module.

pub mod astre;
pub mod body;
pub mod color;
pub mod comet;
pub mod config;
pub mod context;
pub mod draw;
pub mod drawable;
pub mod error;
pub mod nebula;
pub mod random;
pub mod recording;
pub mod scene;
pub mod star;
pub mod starfield;
pub mod surface;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::StarfieldConfig;

    pub mod canvas;
    pub mod mount;
    pub mod render;

    pub use mount::StarfieldHandle;

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger already installed: {err}").into());
        }
    }

    /// Mount the starfield. `config` is a plain object with the
    /// `StarfieldConfig` keys; `undefined` uses the defaults.
    #[wasm_bindgen(js_name = doStarfield)]
    pub fn do_starfield(config: JsValue) -> Result<Option<StarfieldHandle>, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            StarfieldConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        mount::mount(config)
    }

    /// Same as `doStarfield`, with the config as a JSON string (e.g. read from
    /// a `data-` attribute).
    #[wasm_bindgen(js_name = doStarfieldJson)]
    pub fn do_starfield_json(json: &str) -> Result<Option<StarfieldHandle>, JsValue> {
        let config = StarfieldConfig::from_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        mount::mount(config)
    }
}
