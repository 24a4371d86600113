//! Fireflies: an ambient canvas animation of luminous drifting particles.
//!
//! Particles are born on a renewal process, wander under a stochastic
//! steering/acceleration model on a toroidal surface, fade out when their
//! randomized lifespan runs out, and are continuously replenished toward a
//! target density. The engine (`sampler`, `particle`, `population`) is pure
//! and host-independent; the `canvas` and `ui` modules bind it to a browser
//! canvas, the display's refresh cycle, and a self-hiding pointer cursor.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

pub mod canvas;
pub mod constants;
pub mod particle;
pub mod population;
pub mod sampler;
pub mod ui;


use canvas::renderer;
use canvas::surface::{self, Viewport};
use population::Population;
use sampler::Samplers;

/// Everything the frame and resize callbacks touch, behind one explicit
/// owner. The collection is only ever mutated from the frame callback, so a
/// shared `RefCell` is all the synchronization this needs.
pub struct App {
    population: Population,
    samplers: Samplers,
    viewport: Viewport,
    context: CanvasRenderingContext2d,
}

impl App {
    /// One animation frame: simulate, then repaint.
    fn frame(&mut self, elapsed_ms: f64) {
        self.population.tick(elapsed_ms, &mut self.samplers);
        renderer::paint(&self.context, &self.viewport, &self.population);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");

    // Acquiring the surface and its context is the only fatal startup path;
    // there is no fallback rendering.
    let canvas = surface::acquire_canvas(&document)?;
    let context = surface::context_2d(&canvas)?;
    let viewport = surface::resize_canvas(&canvas)?;

    let mut samplers = Samplers::new()
        .map_err(|e| JsValue::from_str(&format!("sampler configuration rejected: {e}")))?;
    let population = Population::seeded(&mut samplers);

    let app = Rc::new(RefCell::new(App {
        population,
        samplers,
        viewport,
        context,
    }));

    {
        let app = app.clone();
        surface::on_resize(&canvas, move |viewport| {
            app.borrow_mut().set_viewport(viewport);
        })?;
    }

    ui::cursor::auto_hide_cursor(&canvas, constants::CURSOR_HIDE_TIMEOUT_MS)?;
    ui::setup_animation_loop(app)?;

    Ok(())
}
