//! The live particle collection and its renewal-process spawning.

use crate::constants::TARGET_POPULATION;
use crate::particle::{Fate, Firefly, Kinetics};
use crate::sampler::Samplers;

/// Owns every live firefly plus the countdown to the next birth. Birth gaps
/// are drawn with mean `lifespan / target population`, so the population
/// fluctuates around the target instead of growing or collapsing.
pub struct Population {
    fireflies: Vec<Firefly>,
    time_to_next_spawn: f64,
}

impl Population {
    /// Seed the steady state: a full target population of mid-life
    /// (uniformly thinned) fireflies and a first spawn-gap draw.
    pub fn seeded(samplers: &mut Samplers) -> Self {
        let fireflies = (0..TARGET_POPULATION)
            .map(|_| Firefly::seeded(samplers))
            .collect();
        Self {
            fireflies,
            time_to_next_spawn: samplers.spawn_gap(),
        }
    }

    /// One simulation step: deliver every spawn that came due during the
    /// last `elapsed_ms`, then advance all particles and drop the expired
    /// ones in place.
    ///
    /// Spawning runs to completion first, so a particle born this frame is
    /// advanced (and a stillborn one culled) in this same pass.
    pub fn tick(&mut self, elapsed_ms: f64, samplers: &mut Samplers) {
        self.time_to_next_spawn -= elapsed_ms;
        // A loop, not a conditional: a stalled frame can owe several births.
        while self.time_to_next_spawn <= 0.0 {
            let life_offset = self.time_to_next_spawn + elapsed_ms;
            self.fireflies.push(Firefly::spawned(life_offset, samplers));
            self.time_to_next_spawn += samplers.spawn_gap();
        }

        self.fireflies
            .retain_mut(|firefly| firefly.advance(elapsed_ms, samplers) == Fate::Alive);
    }

    pub fn len(&self) -> usize {
        self.fireflies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireflies.is_empty()
    }

    /// Drawable state of every non-stillborn firefly, in no particular order.
    pub fn live_bodies(&self) -> impl Iterator<Item = &Kinetics> {
        self.fireflies.iter().filter_map(Firefly::kinetics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SPAWN_MEAN_MS;

    #[test]
    fn seeding_fills_the_target_population() {
        let mut samplers = Samplers::seeded(1).unwrap();
        let population = Population::seeded(&mut samplers);
        assert_eq!(population.len(), TARGET_POPULATION);
        assert!(population.time_to_next_spawn > 0.0);
    }

    #[test]
    fn zero_elapsed_tick_spawns_nothing_and_holds_every_position() {
        let mut samplers = Samplers::seeded(9).unwrap();
        let mut population = Population::seeded(&mut samplers);
        let len = population.len();
        let countdown = population.time_to_next_spawn;
        let before: Vec<(f64, f64)> = population.live_bodies().map(|b| (b.x, b.y)).collect();

        population.tick(0.0, &mut samplers);

        assert_eq!(population.len(), len);
        assert_eq!(population.time_to_next_spawn, countdown);
        let after: Vec<(f64, f64)> = population.live_bodies().map(|b| (b.x, b.y)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn a_stalled_frame_delivers_every_owed_spawn_in_one_tick() {
        let mut samplers = Samplers::seeded(21).unwrap();
        let mut population = Population {
            fireflies: Vec::new(),
            time_to_next_spawn: samplers.spawn_gap(),
        };
        // Five mean gaps of elapsed time; each freshly spawned particle has
        // ~60s of life, so none of the births can expire this same tick.
        population.tick(5.0 * SPAWN_MEAN_MS, &mut samplers);
        assert!(
            population.len() >= 3,
            "expected a burst of births, got {}",
            population.len()
        );
    }

    #[test]
    fn spawn_timing_carries_across_ticks() {
        let mut samplers = Samplers::seeded(23).unwrap();
        let mut population = Population {
            fireflies: Vec::new(),
            time_to_next_spawn: 100.0,
        };
        population.tick(60.0, &mut samplers);
        assert_eq!(population.len(), 0);
        assert!((population.time_to_next_spawn - 40.0).abs() < 1e-9);

        population.tick(60.0, &mut samplers);
        assert_eq!(population.len(), 1);
        assert!(population.time_to_next_spawn > 0.0);
    }

    #[test]
    fn stillborn_spawns_are_culled_in_the_same_tick() {
        let mut samplers = Samplers::seeded(25).unwrap();
        // A countdown hugely in arrears makes the first owed spawn's life
        // offset (countdown + elapsed) negative beyond any lifespan draw.
        let mut population = Population {
            fireflies: Vec::new(),
            time_to_next_spawn: -10_000_000.0,
        };
        population.tick(1.0, &mut samplers);
        for body in population.live_bodies() {
            assert!(body.speed > 0.0);
        }
        // Every retained particle is alive; the stillborn ones are gone.
        assert!(population.fireflies.iter().all(Firefly::is_alive));
    }

    #[test]
    fn population_hovers_in_a_band_around_the_target_for_ten_minutes() {
        let mut samplers = Samplers::seeded(42).unwrap();
        let mut population = Population::seeded(&mut samplers);
        let frame_ms = 1_000.0 / 60.0;
        let frames = (10.0 * 60.0 * 1_000.0 / frame_ms) as usize;

        let mut min = population.len();
        let mut max = population.len();
        for _ in 0..frames {
            population.tick(frame_ms, &mut samplers);
            min = min.min(population.len());
            max = max.max(population.len());
        }

        assert!(min >= 5, "population collapsed to {min}");
        assert!(max <= 30, "population grew to {max}");
    }
}
