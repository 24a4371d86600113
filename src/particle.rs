//! A single firefly: its state and its per-frame update rule.

use crate::sampler::Samplers;

/// What `advance` decided about a particle this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    Expired,
}

/// Drawable state of a live firefly. Size and alpha are fixed at birth;
/// position, heading, and speed evolve every frame. Positions are normalized
/// to `[0, 1)` per axis on a toroidal surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinetics {
    pub size: f64,
    pub alpha: f64,
    pub x: f64,
    pub y: f64,
    pub theta: f64,
    pub speed: f64,
}

/// True mathematical modulo: the result lies in `[0, m)` even for negative
/// `n`, unlike the `%` remainder operator.
pub fn wrap(n: f64, m: f64) -> f64 {
    ((n % m) + m) % m
}

/// One firefly. A particle whose drawn life came out non-positive is
/// stillborn: it carries no kinetic body and expires before it is ever drawn.
#[derive(Debug, Clone)]
pub struct Firefly {
    remaining_life: f64,
    kinetics: Option<Kinetics>,
}

impl Firefly {
    /// A firefly born mid-frame. `life_offset` is the sub-frame instant the
    /// spawn was actually due (`time_to_next_spawn + elapsed`); the same
    /// frame's advance pass then subtracts the full frame time, so birth
    /// timing stays continuous rather than snapped to frame boundaries.
    pub fn spawned(life_offset: f64, samplers: &mut Samplers) -> Self {
        Self::with_life(samplers.life() + life_offset, samplers)
    }

    /// A firefly seeded at startup, already partway through its life: the
    /// drawn lifespan is thinned by a fresh uniform draw so the initial
    /// population looks like a steady state instead of a synchronized cohort.
    pub fn seeded(samplers: &mut Samplers) -> Self {
        let life = samplers.life() * samplers.unit();
        Self::with_life(life, samplers)
    }

    fn with_life(remaining_life: f64, samplers: &mut Samplers) -> Self {
        let kinetics = (remaining_life > 0.0).then(|| Kinetics {
            size: samplers.size(),
            alpha: samplers.alpha(),
            x: samplers.position(),
            y: samplers.position(),
            theta: samplers.angle(),
            speed: samplers.speed(),
        });
        Self {
            remaining_life,
            kinetics,
        }
    }

    /// Age the particle by `elapsed_ms` and, if it survives, perturb its
    /// heading and speed and integrate its position around the torus.
    ///
    /// The perturbations are fixed-magnitude per call regardless of elapsed
    /// time; only the positional step scales with it.
    pub fn advance(&mut self, elapsed_ms: f64, samplers: &mut Samplers) -> Fate {
        self.remaining_life -= elapsed_ms;
        if self.remaining_life <= 0.0 {
            return Fate::Expired;
        }
        let Some(body) = self.kinetics.as_mut() else {
            // Stillborn particles never get here: their life is already
            // non-positive at construction.
            return Fate::Expired;
        };

        body.theta += samplers.steer();
        body.speed *= samplers.acceleration();
        body.x = wrap(body.x + body.speed * elapsed_ms * body.theta.cos(), 1.0);
        body.y = wrap(body.y + body.speed * elapsed_ms * body.theta.sin(), 1.0);
        Fate::Alive
    }

    pub fn is_alive(&self) -> bool {
        self.remaining_life > 0.0
    }

    pub fn remaining_life(&self) -> f64 {
        self.remaining_life
    }

    /// Drawable state, `None` for stillborn particles.
    pub fn kinetics(&self) -> Option<&Kinetics> {
        self.kinetics.as_ref()
    }
}
