//! Frame painting: a clear pass plus one filled circle per live firefly.

use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

use crate::canvas::surface::Viewport;
use crate::particle::Kinetics;
use crate::population::Population;

pub fn clear(context: &CanvasRenderingContext2d, viewport: &Viewport) {
    context.clear_rect(0.0, 0.0, viewport.width, viewport.height);
}

pub fn fill_circle(
    context: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    radius: f64,
    color: &str,
) {
    context.begin_path();
    let _ = context.arc(x, y, radius, 0.0, TAU);
    context.set_fill_style_str(color);
    context.fill();
}

/// Clear the surface and draw every live firefly against the current
/// viewport dimensions.
pub fn paint(context: &CanvasRenderingContext2d, viewport: &Viewport, population: &Population) {
    clear(context, viewport);
    for body in population.live_bodies() {
        draw_body(context, viewport, body);
    }
}

fn draw_body(context: &CanvasRenderingContext2d, viewport: &Viewport, body: &Kinetics) {
    let (x, y) = viewport.project(body.x, body.y);
    let color = format!("rgba(255, 255, 255, {})", body.alpha);
    fill_circle(context, x, y, viewport.radius(body.size), &color);
}
