//! Enemy and coin spawning.
//!
//! Enemies trickle in from the arena edge on a fixed interval until the
//! level's cap is reached. Coins are scattered all at once when a level
//! starts, kept clear of the player and of each other.

use engine_core::{Bounds, CircleCollider, Transform2D, Velocity};
use glam::Vec2;
use hecs::World;
use procgen::{scatter, PlacementRules};
use rand::prelude::*;

use crate::coin::{Coin, CoinKind};
use crate::enemy::{Behavior, Enemy};
use crate::level::LevelParams;

/// Enemy collision radius.
pub const ENEMY_RADIUS: f32 = 18.0;
/// Coins stay this far inside the arena edge.
const COIN_MARGIN: f32 = 60.0;
/// Edge points drawn per spawn; the one farthest from the player wins.
const EDGE_CANDIDATES: usize = 4;

/// Drips enemies into the world, one per interval, up to a cap.
pub struct EnemySpawner {
    /// Seconds between spawns.
    pub interval: f32,
    /// Accumulator for spawn timing.
    pub timer: f32,
    /// Max enemies alive at once.
    pub max_enemies: usize,
    pub enemy_speed: f32,
    params: LevelParams,
    /// Total spawned this level.
    pub spawned: u32,
    rng: StdRng,
}

impl EnemySpawner {
    pub fn new(params: &LevelParams, seed: u64) -> Self {
        Self {
            interval: params.spawn_interval,
            timer: 0.0,
            max_enemies: params.max_enemies,
            enemy_speed: params.enemy_speed,
            params: params.clone(),
            spawned: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of enemies currently in the world.
    pub fn alive(world: &World) -> usize {
        world.query::<&Enemy>().iter().count()
    }

    /// Advance the timer and spawn at most one enemy. Returns the new
    /// enemy's position and behavior.
    pub fn update(
        &mut self,
        world: &mut World,
        bounds: &Bounds,
        player: Vec2,
        dt: f32,
    ) -> Option<(Vec2, Behavior)> {
        self.timer += dt;
        if self.timer < self.interval {
            return None;
        }
        if Self::alive(world) >= self.max_enemies {
            // Hold the timer so the next free slot fills immediately
            self.timer = self.interval;
            return None;
        }
        self.timer -= self.interval;
        Some(self.spawn_one(world, bounds, player))
    }

    fn spawn_one(&mut self, world: &mut World, bounds: &Bounds, player: Vec2) -> (Vec2, Behavior) {
        let position = (0..EDGE_CANDIDATES)
            .map(|_| edge_point(&mut self.rng, bounds))
            .max_by(|a, b| {
                a.distance_squared(player)
                    .total_cmp(&b.distance_squared(player))
            })
            .unwrap_or(bounds.min);

        let behavior = self.params.behavior_weights.pick(&mut self.rng);
        let target = procgen::random_point(&mut self.rng, bounds);
        let phase = self.rng.gen::<f32>() * std::f32::consts::TAU;

        world.spawn((
            Transform2D::from_position(position),
            Velocity::default(),
            CircleCollider::new(ENEMY_RADIUS),
            Enemy::new(behavior, target, self.enemy_speed, phase),
        ));
        self.spawned += 1;
        log::debug!("Spawned {} enemy at ({:.0}, {:.0})", behavior.name(), position.x, position.y);
        (position, behavior)
    }

    /// Fresh patrol waypoint.
    pub fn waypoint(&mut self, bounds: &Bounds) -> Vec2 {
        procgen::random_point(&mut self.rng, bounds)
    }
}

/// Uniform point on the perimeter of `bounds`.
fn edge_point<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds) -> Vec2 {
    let size = bounds.size();
    let perimeter = 2.0 * (size.x + size.y);
    if perimeter <= 0.0 {
        return bounds.min;
    }
    let d = rng.gen::<f32>() * perimeter;
    if d < size.x {
        Vec2::new(bounds.min.x + d, bounds.min.y)
    } else if d < size.x + size.y {
        Vec2::new(bounds.max.x, bounds.min.y + (d - size.x))
    } else if d < 2.0 * size.x + size.y {
        Vec2::new(bounds.max.x - (d - size.x - size.y), bounds.max.y)
    } else {
        Vec2::new(bounds.min.x, bounds.max.y - (d - 2.0 * size.x - size.y))
    }
}

/// Scatter the level's coins. Returns how many placements fell back to an
/// unchecked position.
pub fn spawn_coins<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    params: &LevelParams,
    bounds: &Bounds,
    player: Vec2,
) -> usize {
    let area = bounds.inset(COIN_MARGIN);
    let placements = scatter(
        rng,
        &area,
        player,
        params.coins_needed as usize,
        &PlacementRules::default(),
    );

    let mut fallbacks = 0;
    for placement in placements {
        fallbacks += placement.fallback as usize;
        let kind = CoinKind::pick(rng);
        world.spawn((
            Transform2D::from_position(placement.position),
            CircleCollider::new(kind.radius()),
            Coin::new(kind, params.hits_required),
        ));
    }
    fallbacks
}

/// Despawn every enemy. Returns how many were removed.
pub fn clear_enemies(world: &mut World) -> usize {
    let doomed: Vec<hecs::Entity> = world.query::<&Enemy>().iter().map(|(e, _)| e).collect();
    for entity in &doomed {
        let _ = world.despawn(*entity);
    }
    doomed.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Bounds {
        Bounds::from_size(3000.0, 2000.0)
    }

    #[test]
    fn enemy_count_never_exceeds_cap() {
        let params = LevelParams::for_level(1);
        let mut spawner = EnemySpawner::new(&params, 7);
        let mut world = World::new();
        for _ in 0..10_000 {
            spawner.update(&mut world, &arena(), Vec2::new(1500.0, 1000.0), 0.1);
            assert!(EnemySpawner::alive(&world) <= params.max_enemies);
        }
        assert_eq!(EnemySpawner::alive(&world), params.max_enemies);
    }

    #[test]
    fn spawns_wait_for_interval() {
        let params = LevelParams::for_level(1);
        let mut spawner = EnemySpawner::new(&params, 1);
        let mut world = World::new();
        assert!(spawner.update(&mut world, &arena(), Vec2::ZERO, params.spawn_interval * 0.5).is_none());
        assert!(spawner.update(&mut world, &arena(), Vec2::ZERO, params.spawn_interval * 0.5).is_some());
    }

    #[test]
    fn enemies_spawn_on_the_edge() {
        let params = LevelParams::for_level(3);
        let mut spawner = EnemySpawner::new(&params, 3);
        let mut world = World::new();
        let bounds = arena();
        for _ in 0..params.max_enemies {
            let (pos, _) = spawner
                .update(&mut world, &bounds, bounds.center(), params.spawn_interval)
                .unwrap();
            let on_edge = pos.x <= bounds.min.x + 1e-2
                || pos.x >= bounds.max.x - 1e-2
                || pos.y <= bounds.min.y + 1e-2
                || pos.y >= bounds.max.y - 1e-2;
            assert!(on_edge, "{pos:?} not on edge");
        }
    }

    #[test]
    fn coins_match_level_and_clear_player() {
        let params = LevelParams::for_level(2);
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(11);
        let player = arena().center();
        let fallbacks = spawn_coins(&mut world, &mut rng, &params, &arena(), player);
        assert_eq!(fallbacks, 0);

        let coins: Vec<(Vec2, u32)> = world
            .query::<(&Transform2D, &Coin)>()
            .iter()
            .map(|(_, (t, c))| (t.position, c.required_hits))
            .collect();
        assert_eq!(coins.len(), params.coins_needed as usize);
        for (pos, hits) in coins {
            assert!(pos.distance(player) > 300.0);
            assert_eq!(hits, params.hits_required);
        }
    }

    #[test]
    fn clear_removes_only_enemies() {
        let params = LevelParams::for_level(1);
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(2);
        spawn_coins(&mut world, &mut rng, &params, &arena(), Vec2::ZERO);
        let mut spawner = EnemySpawner::new(&params, 2);
        spawner.update(&mut world, &arena(), Vec2::ZERO, 100.0);
        assert_eq!(clear_enemies(&mut world), 1);
        assert_eq!(EnemySpawner::alive(&world), 0);
        assert_eq!(world.query::<&Coin>().iter().count(), 15);
    }
}
