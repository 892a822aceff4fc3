//! Per-level tuning: how many coins, how stubborn they are, how crowded the sky gets.

use rand::Rng;

use crate::enemy::Behavior;

/// Coins needed on the first level.
pub const BASE_COINS_NEEDED: u32 = 15;
const COINS_PER_LEVEL: u32 = 5;
const MAX_COINS_NEEDED: u32 = 60;
const MAX_HITS_REQUIRED: u32 = 5;
const MAX_ENEMIES_CAP: usize = 12;
const BASE_SPAWN_INTERVAL: f32 = 4.0;
const MIN_SPAWN_INTERVAL: f32 = 1.0;
const BASE_ENEMY_SPEED: f32 = 140.0;
/// Level at which behavior weights stop shifting.
const WEIGHT_RAMP_LEVELS: f32 = 9.0;

/// Relative odds of each steering behavior for newly spawned enemies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorWeights {
    pub idle: f32,
    pub patrol: f32,
    pub orbit: f32,
    pub avoid: f32,
}

impl BehaviorWeights {
    /// Roll a behavior. Weights need not sum to one.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Behavior {
        let total = self.idle + self.patrol + self.orbit + self.avoid;
        if total <= 0.0 {
            return Behavior::Idle;
        }
        let roll = rng.gen::<f32>() * total;
        if roll < self.idle {
            Behavior::Idle
        } else if roll < self.idle + self.patrol {
            Behavior::Patrol
        } else if roll < self.idle + self.patrol + self.orbit {
            Behavior::Orbit
        } else {
            Behavior::Avoid
        }
    }
}

/// Everything that changes from one level to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelParams {
    pub level: u32,
    pub coins_needed: u32,
    pub hits_required: u32,
    pub max_enemies: usize,
    pub spawn_interval: f32,
    pub enemy_speed: f32,
    pub behavior_weights: BehaviorWeights,
    /// Seconds allowed for the speed-run objective.
    pub time_limit: f32,
}

impl LevelParams {
    /// Parameters for level `level` (levels start at 1; 0 is treated as 1).
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        let n = level - 1;

        let coins_needed = (BASE_COINS_NEEDED + COINS_PER_LEVEL * n).min(MAX_COINS_NEEDED);
        let hits_required = (1 + n / 3).min(MAX_HITS_REQUIRED);
        let max_enemies = (2 + level as usize).min(MAX_ENEMIES_CAP);
        let spawn_interval = (BASE_SPAWN_INTERVAL - 0.3 * n as f32).max(MIN_SPAWN_INTERVAL);
        let enemy_speed = BASE_ENEMY_SPEED * (1.0 + 0.08 * n as f32);

        let t = (n as f32 / WEIGHT_RAMP_LEVELS).min(1.0);
        let behavior_weights = BehaviorWeights {
            idle: 0.3 - 0.2 * t,
            patrol: 0.5 - 0.2 * t,
            orbit: 0.15 + 0.25 * t,
            avoid: 0.05 + 0.15 * t,
        };

        // Roughly four seconds per required hit on each coin
        let time_limit = (coins_needed * hits_required) as f32 * 4.0;

        Self {
            level,
            coins_needed,
            hits_required,
            max_enemies,
            spawn_interval,
            enemy_speed,
            behavior_weights,
            time_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn level_one_matches_baseline() {
        let p = LevelParams::for_level(1);
        assert_eq!(p.coins_needed, 15);
        assert_eq!(p.hits_required, 1);
        assert_eq!(p.max_enemies, 3);
        assert_eq!(p.spawn_interval, BASE_SPAWN_INTERVAL);
    }

    #[test]
    fn level_zero_is_level_one() {
        assert_eq!(LevelParams::for_level(0), LevelParams::for_level(1));
    }

    #[test]
    fn difficulty_is_capped() {
        let p = LevelParams::for_level(500);
        assert_eq!(p.coins_needed, MAX_COINS_NEEDED);
        assert_eq!(p.hits_required, MAX_HITS_REQUIRED);
        assert_eq!(p.max_enemies, MAX_ENEMIES_CAP);
        assert_eq!(p.spawn_interval, MIN_SPAWN_INTERVAL);
    }

    #[test]
    fn hits_scale_every_third_level() {
        assert_eq!(LevelParams::for_level(3).hits_required, 1);
        assert_eq!(LevelParams::for_level(4).hits_required, 2);
        assert_eq!(LevelParams::for_level(7).hits_required, 3);
    }

    #[test]
    fn weights_shift_toward_orbit_and_avoid() {
        let early = LevelParams::for_level(1).behavior_weights;
        let late = LevelParams::for_level(10).behavior_weights;
        assert!(late.orbit > early.orbit);
        assert!(late.avoid > early.avoid);
        assert!(late.idle < early.idle);
    }

    #[test]
    fn zero_weights_pick_idle() {
        let w = BehaviorWeights { idle: 0.0, patrol: 0.0, orbit: 0.0, avoid: 0.0 };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(w.pick(&mut rng), Behavior::Idle);
    }

    #[test]
    fn single_weight_always_wins() {
        let w = BehaviorWeights { idle: 0.0, patrol: 0.0, orbit: 1.0, avoid: 0.0 };
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            assert_eq!(w.pick(&mut rng), Behavior::Orbit);
        }
    }
}
