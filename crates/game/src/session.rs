//! One play session: owns the world and every gameplay system, advances them
//! each tick and queues events for the frontend.
//!
//! Phase flow:
//! ```text
//! Menu --start--> Playing <--toggle_pause--> Paused
//!                    |  \
//!       all coins    |   \  fuel or hull gone
//!                    v    v
//!         LevelComplete   GameOver --restart--> Playing (level 1)
//!                |
//!           next_level --> Playing (level n+1)
//! ```
//! Level completion and game over each happen once per level: both leave
//! `Playing`, and nothing but `Playing` advances the simulation.

use engine_core::{Bounds, CircleCollider, Transform2D, Velocity};
use glam::Vec2;
use hecs::{Entity, World};
use procgen::Starfield;
use rand::prelude::*;

use crate::achievements::{self, AchievementId, LevelClear, Progress};
use crate::bomb::{Bomb, BombError};
use crate::camera::{FollowCamera, ScreenShake};
use crate::coin::{Coin, CoinHit, CoinKind};
use crate::config::GameConfig;
use crate::effects::{Burst, ParticlePool};
use crate::enemy::{Enemy, SteeringParams};
use crate::events::GameEvent;
use crate::level::LevelParams;
use crate::messages::GameMessages;
use crate::missions::MissionLog;
use crate::player::Player;
use crate::save::{SaveError, SaveRecord, SaveStore};
use crate::scene::Scene;
use crate::spawner::{self, EnemySpawner};
use crate::state::{GameOverReason, GamePhase, PlayerInput};

/// How far a coin is knocked away from the player on a non-final hit.
const COIN_NUDGE: f32 = 60.0;
/// Coins are kept this far inside the arena when nudged.
const COIN_MARGIN: f32 = 60.0;

pub struct Session {
    config: GameConfig,
    seed: u64,
    rng: StdRng,
    world: World,
    phase: GamePhase,
    params: LevelParams,
    bounds: Bounds,
    player: Player,
    spawner: EnemySpawner,
    steering: SteeringParams,
    bomb: Bomb,
    particles: ParticlePool,
    shake: ScreenShake,
    camera: FollowCamera,
    messages: GameMessages,
    missions: MissionLog,
    starfield: Starfield,
    save: SaveRecord,
    store: Option<(SaveStore, u32)>,
    events: Vec<GameEvent>,
    /// Run score, carried across levels.
    score: u64,
    /// Coins collected on the current level.
    coins_collected: u32,
    /// Game clock in seconds; stops while paused.
    elapsed: f32,
    took_damage: bool,
    fuel_warned: bool,
    /// Bomb button state on the previous tick.
    bomb_held: bool,
}

impl Session {
    /// A session sitting in the menu, showing level 1's backdrop.
    pub fn new(config: GameConfig, save: SaveRecord, seed: u64) -> Self {
        let bounds = Bounds::from_size(config.arena_width, config.arena_height);
        let params = LevelParams::for_level(1);
        let level_seed = level_seed(seed, 1);
        let viewport = Vec2::from(config.viewport);
        let mut camera = FollowCamera::new(bounds.center(), viewport);
        camera.snap_to(bounds.center(), &bounds);

        Self {
            rng: StdRng::seed_from_u64(seed),
            world: World::new(),
            phase: GamePhase::Menu,
            player: Player::new(bounds.center(), config.player_speed, config.player_health),
            spawner: EnemySpawner::new(&params, level_seed),
            steering: SteeringParams::default(),
            bomb: Bomb::new(config.bomb_cooldown),
            particles: ParticlePool::new(config.particle_capacity),
            shake: ScreenShake::new(),
            camera,
            messages: GameMessages::new(),
            missions: MissionLog::for_level(&params),
            starfield: Starfield::generate(level_seed, bounds.size(), config.star_density),
            params,
            bounds,
            save,
            store: None,
            events: Vec::new(),
            score: 0,
            coins_collected: 0,
            elapsed: 0.0,
            took_damage: false,
            fuel_warned: false,
            bomb_held: false,
            seed,
            config,
        }
    }

    /// Autosave into `slot` of `store` at level end and game over.
    pub fn with_store(mut self, store: SaveStore, slot: u32) -> Self {
        self.store = Some((store, slot));
        self
    }

    // ── Phase transitions ───────────────────────────────────────────────

    /// Leave the menu and begin level 1.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            log::warn!("start() ignored in phase {:?}", self.phase);
            return;
        }
        self.begin_run();
    }

    /// Start a fresh run at level 1 from any phase.
    pub fn restart(&mut self) {
        self.begin_run();
    }

    /// Advance to the next level after a completed one.
    pub fn next_level(&mut self) {
        if self.phase != GamePhase::LevelComplete {
            log::warn!("next_level() ignored in phase {:?}", self.phase);
            return;
        }
        self.load_level(self.params.level + 1);
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    fn begin_run(&mut self) {
        self.score = 0;
        self.save.game_stats.games_played += 1;
        self.load_level(1);
    }

    fn load_level(&mut self, level: u32) {
        let seed = level_seed(self.seed, level);
        self.params = LevelParams::for_level(level);
        self.world.clear();
        self.player.reset(self.bounds.center());
        self.spawner = EnemySpawner::new(&self.params, seed);
        self.bomb.recharge();
        self.particles.clear();
        self.missions = MissionLog::for_level(&self.params);
        self.starfield = Starfield::generate(seed, self.bounds.size(), self.config.star_density);
        self.camera.snap_to(self.player.position(), &self.bounds);
        self.coins_collected = 0;
        self.took_damage = false;
        self.fuel_warned = false;

        let fallbacks = spawner::spawn_coins(
            &mut self.world,
            &mut self.rng,
            &self.params,
            &self.bounds,
            self.player.position(),
        );
        if fallbacks > 0 {
            log::debug!("{fallbacks} coins placed without spacing checks");
        }

        self.phase = GamePhase::Playing;
        log::info!(
            "Level {} in {}: {} coins, {} hit(s) each, up to {} enemies",
            level,
            self.starfield.name,
            self.params.coins_needed,
            self.params.hits_required,
            self.params.max_enemies
        );
        self.messages
            .info(format!("Level {} - {}", level, self.starfield.name));
        self.events.push(GameEvent::LevelStarted {
            level,
            sector: self.starfield.name.clone(),
        });
    }

    // ── Simulation ──────────────────────────────────────────────────────

    /// Advance by `dt` seconds. Outside `Playing` only cosmetic effects
    /// move; a paused session is frozen entirely.
    pub fn tick(&mut self, input: &PlayerInput, dt: f32) {
        let dt = dt.max(0.0);
        match self.phase {
            GamePhase::Paused => return,
            GamePhase::Playing => {}
            _ => {
                self.update_cosmetics(dt);
                return;
            }
        }

        self.elapsed += dt;
        self.save.game_stats.play_time_seconds += dt as f64;
        self.missions.tick(dt);

        if input.bomb && !self.bomb_held {
            // Failure is reported through events
            let _ = self.use_bomb();
        }
        self.bomb_held = input.bomb;

        self.player
            .apply_input(input, dt, &self.bounds, self.config.fuel_drain_per_second);
        if self.player.is_moving() {
            let heading = self.player.last_delta;
            self.particles
                .exhaust(&mut self.rng, self.player.position(), heading);
        }
        self.bomb.update(dt);

        if let Some((position, behavior)) =
            self.spawner
                .update(&mut self.world, &self.bounds, self.player.position(), dt)
        {
            self.events.push(GameEvent::EnemySpawned { position, behavior });
        }

        self.steer_enemies(dt);
        self.check_enemy_contact();
        self.check_coin_contact();
        self.check_fuel_warning();

        if self.coins_collected >= self.params.coins_needed {
            self.complete_level();
        } else if self.player.fuel.is_empty() {
            self.game_over(GameOverReason::OutOfFuel);
        } else if self.player.is_destroyed() {
            self.game_over(GameOverReason::Destroyed);
        }

        self.update_cosmetics(dt);
    }

    fn update_cosmetics(&mut self, dt: f32) {
        self.particles.update(dt);
        self.camera
            .update(self.player.position(), dt, &self.bounds);
        self.shake.update(dt, self.elapsed);
        self.messages.update(dt);
    }

    fn steer_enemies(&mut self, dt: f32) {
        let player = self.player.position();
        for (_, (transform, velocity, enemy)) in self
            .world
            .query_mut::<(&mut Transform2D, &mut Velocity, &mut Enemy)>()
        {
            if enemy.needs_new_target(transform.position, &self.steering) {
                enemy.target = self.spawner.waypoint(&self.bounds);
            }
            velocity.linear = enemy.steer(transform.position, player, self.elapsed, &self.steering);
            transform.translate(velocity.linear * dt);
            transform.position = self.bounds.clamp(transform.position);
            transform.face_towards(velocity.linear);
        }
    }

    fn check_enemy_contact(&mut self) {
        let position = self.player.position();
        let collider = self.player.collider;
        let touching = self
            .world
            .query::<(&Transform2D, &CircleCollider, &Enemy)>()
            .iter()
            .any(|(_, (t, c, _))| collider.overlaps(position, c, t.position));
        if !touching {
            return;
        }
        if !self
            .player
            .take_hit(self.config.enemy_contact_damage, self.config.hit_grace)
        {
            return;
        }

        self.took_damage = true;
        self.add_trauma(0.5);
        self.particles.burst(&mut self.rng, position, Burst::impact());
        let health = self.player.health.current;
        log::debug!("Player hit, hull at {health:.0}");
        self.events.push(GameEvent::PlayerHit { position, health });
    }

    fn check_coin_contact(&mut self) {
        let player = self.player.position();
        let collider = self.player.collider;
        let nudge_area = self.bounds.inset(COIN_MARGIN);
        let mut collected: Vec<(Entity, Vec2, CoinKind, u32)> = Vec::new();

        for (entity, (transform, coin_collider, coin)) in self
            .world
            .query_mut::<(&mut Transform2D, &CircleCollider, &mut Coin)>()
        {
            let touching = collider.overlaps(player, coin_collider, transform.position);
            match coin.register_contact(touching) {
                CoinHit::None => {}
                CoinHit::Hit { hits, required } => {
                    let position = transform.position;
                    let clearance = collider.radius + coin_collider.radius;
                    transform.position = nudge_clear(position, player, clearance, &nudge_area);
                    self.particles
                        .burst(&mut self.rng, position, Burst::sparkle(coin.kind.color()));
                    self.events.push(GameEvent::CoinHit { position, hits, required });
                }
                CoinHit::Collected { value } => {
                    collected.push((entity, transform.position, coin.kind, value));
                }
            }
        }

        for (entity, position, kind, value) in collected {
            let _ = self.world.despawn(entity);
            self.coins_collected += 1;
            self.score += value as u64;
            self.save.total_coins += 1;
            if kind == CoinKind::Comet {
                self.save.game_stats.comets_caught += 1;
                self.messages.success("Comet caught!");
            }
            self.player.refuel(self.config.fuel_per_coin);
            if self.player.fuel.percentage() > 0.25 {
                self.fuel_warned = false;
            }
            self.particles
                .burst(&mut self.rng, position, Burst::sparkle(kind.color()));
            self.add_trauma(0.1);
            self.events.push(GameEvent::CoinCollected { position, kind, value });
        }
        self.check_achievements(None);
    }

    fn check_fuel_warning(&mut self) {
        if self.fuel_warned || !self.player.fuel.is_low() || self.player.fuel.is_empty() {
            return;
        }
        self.fuel_warned = true;
        let fuel = self.player.fuel.level();
        self.messages.warning("Fuel low!");
        self.events.push(GameEvent::FuelLow { fuel });
    }

    fn complete_level(&mut self) {
        self.phase = GamePhase::LevelComplete;
        let level = self.params.level;
        let fuel_left = self.player.fuel.level();

        let mut bonus = 0;
        for objective in self.missions.complete(fuel_left) {
            bonus += objective.bonus();
            self.events.push(GameEvent::ObjectiveComplete {
                objective,
                bonus: objective.bonus(),
            });
        }
        self.score += bonus;

        if self.save.record_score(self.score) {
            self.messages.success(format!("New high score: {}", self.score));
        }
        self.save.record_level(level);
        self.save.game_stats.levels_completed += 1;
        self.check_achievements(Some(LevelClear {
            took_damage: self.took_damage,
            fuel_left,
        }));

        log::info!(
            "Level {} complete: score {} (+{} bonus), {}/{} objectives",
            level,
            self.score,
            bonus,
            self.missions.completed_count(),
            self.missions.objectives.len()
        );
        self.messages.success(format!("Level {level} complete!"));
        self.events.push(GameEvent::LevelComplete {
            level,
            score: self.score,
            bonus,
        });
        self.autosave();
    }

    fn game_over(&mut self, reason: GameOverReason) {
        self.phase = GamePhase::GameOver(reason);
        self.save.record_score(self.score);
        self.save.game_stats.deaths += 1;
        let position = self.player.position();
        self.particles.burst(&mut self.rng, position, Burst::explosion());
        self.add_trauma(1.0);

        log::info!(
            "Game over on level {} ({}), score {}",
            self.params.level,
            reason.describe(),
            self.score
        );
        self.messages.warning(reason.describe());
        self.events.push(GameEvent::GameOver {
            reason,
            score: self.score,
        });
        self.autosave();
    }

    /// Detonate the bomb: every enemy is removed and the player gets safe
    /// time. Returns how many enemies were cleared.
    pub fn use_bomb(&mut self) -> Result<usize, BombError> {
        if !self.phase.is_playing() {
            return Ok(0);
        }
        if let Err(e) = self.bomb.trigger() {
            let BombError::Cooling { remaining } = e;
            self.messages.warning("Bomb recharging");
            self.events.push(GameEvent::BombNotReady { remaining });
            return Err(e);
        }

        let cleared = spawner::clear_enemies(&mut self.world);
        self.player.grant_safe_time(self.config.safe_time);
        self.missions.record_bomb();
        let position = self.player.position();
        self.particles.burst(&mut self.rng, position, Burst::explosion());
        self.add_trauma(0.8);
        self.save.game_stats.bombs_used += 1;
        self.save.game_stats.enemies_cleared += cleared as u64;

        log::debug!("Bomb cleared {cleared} enemies");
        self.events.push(GameEvent::BombUsed { cleared });
        self.check_achievements(None);
        Ok(cleared)
    }

    fn add_trauma(&mut self, amount: f32) {
        if self.save.settings.screen_shake {
            self.shake.add_trauma(amount);
        }
    }

    fn check_achievements(&mut self, level_cleared: Option<LevelClear>) {
        let progress = Progress {
            lifetime_coins: self.save.total_coins,
            levels_completed: self.save.high_level,
            bombs_used: self.save.game_stats.bombs_used,
            comets_caught: self.save.game_stats.comets_caught,
            level_cleared,
        };
        for id in achievements::earned(&progress) {
            if self.save.unlock_achievement(id) {
                self.announce(id);
            }
        }
    }

    fn announce(&mut self, id: AchievementId) {
        log::info!("Achievement unlocked: {}", id.title());
        self.messages
            .success(format!("Achievement: {}", id.title()));
        self.events.push(GameEvent::AchievementUnlocked(id));
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Write the save record to the attached store, if any.
    pub fn persist(&self) -> Result<(), SaveError> {
        match &self.store {
            Some((store, slot)) => store.save(*slot, &self.save),
            None => Ok(()),
        }
    }

    fn autosave(&self) {
        if let Err(e) = self.persist() {
            log::error!("Autosave failed: {e}");
        }
    }

    // ── Output ──────────────────────────────────────────────────────────

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render-agnostic snapshot of the current frame.
    pub fn scene(&self) -> Scene {
        Scene::capture(self)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.params.level
    }

    pub fn params(&self) -> &LevelParams {
        &self.params
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn bomb(&self) -> &Bomb {
        &self.bomb
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn shake(&self) -> &ScreenShake {
        &self.shake
    }

    pub fn messages(&self) -> &GameMessages {
        &self.messages
    }

    pub fn missions(&self) -> &MissionLog {
        &self.missions
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn save(&self) -> &SaveRecord {
        &self.save
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn enemy_count(&self) -> usize {
        EnemySpawner::alive(&self.world)
    }
}

/// Knock a coin away from the player so the next touch is a new contact.
/// A coin pinned against the edge of `area` is moved toward its middle
/// instead.
fn nudge_clear(coin: Vec2, player: Vec2, clearance: f32, area: &Bounds) -> Vec2 {
    let away = (coin - player).normalize_or(Vec2::X);
    let nudged = area.clamp(coin + away * COIN_NUDGE);
    if nudged.distance(player) > clearance {
        return nudged;
    }
    let inward = (area.center() - player).normalize_or(Vec2::X);
    area.clamp(player + inward * (clearance + COIN_NUDGE))
}

/// Per-level seed so each level's layout is reproducible on its own.
fn level_seed(seed: u64, level: u32) -> u64 {
    seed ^ (level as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(GameConfig::default(), SaveRecord::default(), 42)
    }

    fn idle() -> PlayerInput {
        PlayerInput::default()
    }

    #[test]
    fn starts_in_menu_and_menu_is_inert() {
        let mut s = session();
        assert_eq!(s.phase(), GamePhase::Menu);
        s.tick(&idle(), 1.0);
        assert_eq!(s.player().fuel.level(), 100.0);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn start_spawns_level_one() {
        let mut s = session();
        s.start();
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.world().query::<&Coin>().iter().count(), 15);
        assert!(matches!(
            s.drain_events().as_slice(),
            [GameEvent::LevelStarted { level: 1, .. }]
        ));
        assert_eq!(s.save().game_stats.games_played, 1);
    }

    #[test]
    fn pause_freezes_the_clock() {
        let mut s = session();
        s.start();
        s.toggle_pause();
        s.tick(&idle(), 5.0);
        assert_eq!(s.elapsed(), 0.0);
        assert_eq!(s.player().fuel.level(), 100.0);
        s.toggle_pause();
        s.tick(&idle(), 1.0);
        assert_eq!(s.elapsed(), 1.0);
    }

    #[test]
    fn bomb_clears_enemies_and_grants_safe_time() {
        let mut s = session();
        s.start();
        for _ in 0..600 {
            s.tick(&idle(), 1.0 / 60.0);
        }
        assert!(s.enemy_count() > 0);
        let cleared = s.use_bomb().unwrap();
        assert!(cleared > 0);
        assert_eq!(s.enemy_count(), 0);
        assert!(s.player().is_invulnerable());
        assert!(s.save().has_achievement(AchievementId::Bomber));
        assert!(matches!(s.use_bomb(), Err(BombError::Cooling { .. })));
        let events = s.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::BombNotReady { .. })));
    }

    #[test]
    fn held_bomb_button_warns_once() {
        let mut s = session();
        s.start();
        s.use_bomb().unwrap();
        s.drain_events();
        let held = PlayerInput {
            bomb: true,
            ..Default::default()
        };
        for _ in 0..60 {
            s.tick(&held, 1.0 / 60.0);
        }
        let warnings = s
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::BombNotReady { .. }))
            .count();
        assert_eq!(warnings, 1);

        s.tick(&idle(), 1.0 / 60.0);
        s.tick(&held, 1.0 / 60.0);
        assert!(s
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::BombNotReady { .. })));
        let toasts: Vec<String> = s
            .messages()
            .visible()
            .iter()
            .filter(|m| m.text == "Bomb recharging")
            .map(|m| m.label())
            .collect();
        assert_eq!(toasts, ["Bomb recharging (x2)"]);
    }

    #[test]
    fn next_level_requires_completion() {
        let mut s = session();
        s.start();
        s.next_level();
        assert_eq!(s.level(), 1);
    }

    #[test]
    fn nudge_leaves_open_space_alone() {
        let area = Bounds::from_size(3000.0, 2000.0).inset(COIN_MARGIN);
        let coin = nudge_clear(Vec2::new(1010.0, 1000.0), Vec2::new(1000.0, 1000.0), 44.0, &area);
        assert!((coin - Vec2::new(1070.0, 1000.0)).length() < 1e-3);
    }

    #[test]
    fn nudge_off_the_edge_clears_the_player() {
        let area = Bounds::from_size(3000.0, 2000.0).inset(COIN_MARGIN);
        let player = Vec2::new(area.max.x - 0.1, 140.0);
        let coin = nudge_clear(Vec2::new(area.max.x, 140.0), player, 44.0, &area);
        assert!(coin.distance(player) > 44.0);
        assert!(area.contains(coin));

        let corner = nudge_clear(area.max, area.max, 44.0, &area);
        assert!(corner.distance(area.max) > 44.0);
    }

    #[test]
    fn multi_hit_coin_at_the_edge_can_be_finished() {
        let mut s = session();
        s.start();
        s.load_level(4);
        assert_eq!(s.params().hits_required, 2);
        s.world.clear();

        let edge = s.bounds().inset(COIN_MARGIN).max.x;
        s.player.transform.position = Vec2::new(edge - 0.1, 140.0);
        let coin = s.world.spawn((
            Transform2D::from_position(Vec2::new(edge, 140.0)),
            CircleCollider::new(CoinKind::Bronze.radius()),
            Coin::new(CoinKind::Bronze, 2),
        ));
        s.drain_events();

        s.tick(&idle(), 1.0 / 60.0);
        assert!(s
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::CoinHit { hits: 1, required: 2, .. })));
        let moved = s.world.get::<&Transform2D>(coin).unwrap().position;
        let player = s.player().position();
        assert!(!s.player().collider.overlaps(
            player,
            &CircleCollider::new(CoinKind::Bronze.radius()),
            moved
        ));

        // Contact ends, then a fresh touch lands the second hit
        s.tick(&idle(), 1.0 / 60.0);
        s.player.transform.position = moved;
        s.tick(&idle(), 1.0 / 60.0);
        assert_eq!(s.coins_collected(), 1);
        assert!(s.world.get::<&Coin>(coin).is_err());
    }

    #[test]
    fn level_seeds_differ() {
        assert_ne!(level_seed(1, 1), level_seed(1, 2));
        assert_eq!(level_seed(9, 3), level_seed(9, 3));
    }
}
