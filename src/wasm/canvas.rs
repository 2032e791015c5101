use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{DrawError, DrawResult};
use crate::surface::{RadialGradient, Surface};

/// [`Surface`] backed by a `<canvas>` 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`. `opaque` requests `{ alpha: false }`,
    /// which lets the browser skip compositing for a fully painted layer.
    pub fn acquire(canvas: HtmlCanvasElement, opaque: bool) -> Result<Self, DrawError> {
        let ctx = if opaque {
            let options = js_sys::Object::new();
            js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::FALSE)
                .map_err(|e| DrawError::canvas("getContext", reason(&e)))?;
            canvas.get_context_with_context_options("2d", &options)
        } else {
            canvas.get_context("2d")
        };
        let ctx = ctx
            .map_err(|e| DrawError::canvas("getContext", reason(&e)))?
            .ok_or(DrawError::SurfaceUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DrawError::SurfaceUnavailable)?;
        Ok(Self { canvas, ctx })
    }
}

fn reason(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }

    fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn save(&self) {
        self.ctx.save();
    }

    fn restore(&self) {
        self.ctx.restore();
    }

    fn clear_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn set_fill_color(&self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set_fill_gradient(&self, g: &RadialGradient) -> DrawResult {
        let gradient = self
            .ctx
            .create_radial_gradient(g.x0, g.y0, g.r0, g.x1, g.y1, g.r1)
            .map_err(|e| DrawError::canvas("createRadialGradient", reason(&e)))?;
        for (offset, color) in &g.stops {
            gradient
                .add_color_stop(*offset as f32, color)
                .map_err(|e| DrawError::canvas("addColorStop", reason(&e)))?;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        Ok(())
    }

    fn set_global_alpha(&self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_shadow_blur(&self, blur: f64) {
        self.ctx.set_shadow_blur(blur);
    }

    fn begin_path(&self) {
        self.ctx.begin_path();
    }

    fn close_path(&self) {
        self.ctx.close_path();
    }

    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> DrawResult {
        self.ctx
            .arc(x, y, radius, start, end)
            .map_err(|e| DrawError::canvas("arc", reason(&e)))
    }

    fn ellipse(
        &self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start: f64,
        end: f64,
    ) -> DrawResult {
        self.ctx
            .ellipse(x, y, radius_x, radius_y, rotation, start, end)
            .map_err(|e| DrawError::canvas("ellipse", reason(&e)))
    }

    fn fill(&self) {
        self.ctx.fill();
    }
}
