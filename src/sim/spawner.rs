//! Obstacle spawn scheduling
//!
//! Keeps a "next spawn tick" threshold. When the tick counter reaches it,
//! a uniformly random delay in `[min, max]` pushes the threshold forward.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Tick at or after which the next obstacle appears
    pub next_spawn_tick: u64,
    pub min_delay: u64,
    pub max_delay: u64,
}

impl Spawner {
    /// A fresh spawner fires on its first poll
    pub fn new(min_delay: u64, max_delay: u64) -> Self {
        Self {
            next_spawn_tick: 0,
            min_delay,
            max_delay: max_delay.max(min_delay),
        }
    }

    /// Returns true when an obstacle should spawn on `tick`, and schedules
    /// the following one.
    pub fn poll<R: Rng + ?Sized>(&mut self, tick: u64, rng: &mut R) -> bool {
        if tick < self.next_spawn_tick {
            return false;
        }
        let delay = rng.random_range(self.min_delay..=self.max_delay);
        self.next_spawn_tick = tick.saturating_add(delay);
        true
    }

    pub fn reset(&mut self) {
        self.next_spawn_tick = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_poll_spawns() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = Spawner::new(60, 150);
        assert!(spawner.poll(0, &mut rng));
        assert!((60..=150).contains(&spawner.next_spawn_tick));
    }

    #[test]
    fn test_delays_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut spawner = Spawner::new(60, 150);
        let mut last_spawn = None;

        for tick in 0..10_000u64 {
            if spawner.poll(tick, &mut rng) {
                if let Some(prev) = last_spawn {
                    let gap = tick - prev;
                    assert!((60..=150).contains(&gap), "gap {} out of range", gap);
                }
                last_spawn = Some(tick);
            }
        }
    }

    #[test]
    fn test_reset_allows_immediate_spawn() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawner = Spawner::new(60, 150);
        spawner.poll(0, &mut rng);
        assert!(!spawner.poll(1, &mut rng));

        spawner.reset();
        assert!(spawner.poll(0, &mut rng));
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut spawner = Spawner::new(90, 90);
        spawner.poll(10, &mut rng);
        assert_eq!(spawner.next_spawn_tick, 100);
    }
}
