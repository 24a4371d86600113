//! Tunables for the fireflies animation.
//!
//! This module centralizes every knob of the simulation so the behavior can
//! be retuned in one place. Time is in milliseconds, positions and sizes are
//! normalized (positions in `[0, 1)` per axis, sizes as a fraction of the
//! viewport's shorter side).

use std::f64::consts::TAU;

// Population
pub const TARGET_POPULATION: usize = 15;

// Lifespan moments (milliseconds)
pub const LIFE_EXPECTANCY_MS: f64 = 60_000.0;
pub const LIFE_DEVIATION_MS: f64 = 10_000.0;

// Renewal spawning: mean gap = mean lifespan / target population, so the
// birth rate balances the death rate at the target density.
pub const SPAWN_MEAN_MS: f64 = LIFE_EXPECTANCY_MS / TARGET_POPULATION as f64;
pub const SPAWN_DEVIATION_MS: f64 = LIFE_DEVIATION_MS / TARGET_POPULATION as f64;

// Radius as a fraction of the viewport's shorter side
pub const SIZE_MEAN: f64 = 0.03;
pub const SIZE_DEVIATION: f64 = 0.005;

// Opacity, fixed per particle at birth
pub const ALPHA_MEAN: f64 = 0.85;
pub const ALPHA_DEVIATION: f64 = 0.1;

// Birth position per axis, biased toward the center of the surface
pub const POSITION_MEAN: f64 = 0.5;
pub const POSITION_DEVIATION: f64 = 0.25;

// Heading random walk, radians per frame
pub const STEER_DEVIATION_RAD: f64 = 5e-4 * TAU;

// Speed in normalized units per millisecond
pub const SPEED_MEAN: f64 = 0.01 / 1000.0;
pub const SPEED_DEVIATION: f64 = 0.005 / 1000.0;

// Multiplicative speed perturbation per frame; strictly positive support
pub const ACCELERATION_MEAN: f64 = 1.0;
pub const ACCELERATION_DEVIATION: f64 = 1e-4;

// Canvas / UI
pub const CANVAS_ID: &str = "fireflies-canvas";
pub const CANVAS_BACKGROUND: &str = "#000000";
pub const CURSOR_HIDE_TIMEOUT_MS: u32 = 1_000;
