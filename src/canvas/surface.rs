//! Canvas acquisition and viewport measurement.
//!
//! The canvas bitmap is kept at CSS size times the device pixel ratio so
//! drawing stays crisp on high-DPI displays; everything downstream works in
//! device pixels via the [`Viewport`] snapshot taken at each (re)measure.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::constants::{CANVAS_BACKGROUND, CANVAS_ID};

/// Current drawable dimensions in device pixels. A pure value type so the
/// projection math is testable without a DOM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Shorter side, used to scale radii consistently across aspect ratios.
    pub reference_length: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            reference_length: width.min(height),
        }
    }

    /// Denormalize a `[0, 1)` surface position into device pixels.
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.width, y * self.height)
    }

    /// Radius in device pixels for a normalized size factor.
    pub fn radius(&self, size: f64) -> f64 {
        size * self.reference_length
    }
}

/// Find the page's canvas by id, or create a full-window one if the host
/// page didn't provide any.
pub fn acquire_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(existing) = document.get_element_by_id(CANVAS_ID) {
        return existing.dyn_into::<HtmlCanvasElement>().map_err(|_| {
            JsValue::from_str(&format!("element #{} is not a <canvas>", CANVAS_ID))
        });
    }

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id(CANVAS_ID);

    let style = canvas.style();
    style.set_property("position", "fixed")?;
    style.set_property("top", "0")?;
    style.set_property("left", "0")?;
    style.set_property("width", "100vw")?;
    style.set_property("height", "100vh")?;
    style.set_property("display", "block")?;
    style.set_property("background", CANVAS_BACKGROUND)?;

    document
        .body()
        .ok_or_else(|| JsValue::from_str("no <body> element found"))?
        .append_child(&canvas)?;
    Ok(canvas)
}

/// The 2D context is the only rendering path; failing to get one is fatal.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has an unexpected type"))
}

/// Match the canvas bitmap to its CSS size times the device pixel ratio and
/// report the resulting device-pixel viewport.
pub fn resize_canvas(canvas: &HtmlCanvasElement) -> Result<Viewport, JsValue> {
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let dpr = window.device_pixel_ratio();

    let width = (canvas.client_width() as f64 * dpr).ceil();
    let height = (canvas.client_height() as f64 * dpr).ceil();
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    Ok(Viewport::new(width, height))
}

/// Re-measure on every window resize and hand the fresh viewport to `apply`.
pub fn on_resize<F>(canvas: &HtmlCanvasElement, mut apply: F) -> Result<(), JsValue>
where
    F: FnMut(Viewport) + 'static,
{
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;

    let canvas = canvas.clone();
    let callback = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        match resize_canvas(&canvas) {
            Ok(viewport) => apply(viewport),
            Err(err) => {
                web_sys::console::error_1(&format!("canvas resize failed: {:?}", err).into())
            }
        }
    }));
    window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
    callback.forget(); // listener lives for the page lifetime

    Ok(())
}
