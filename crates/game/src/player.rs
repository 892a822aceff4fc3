//! Player craft: movement, fuel burn, hull and safe time.

use engine_core::{Bounds, CircleCollider, Fuel, Health, Transform2D, Vec2};

use crate::state::PlayerInput;

/// Hull collision radius.
pub const PLAYER_RADIUS: f32 = 24.0;

/// Player craft state.
#[derive(Debug, Clone)]
pub struct Player {
    pub transform: Transform2D,
    pub collider: CircleCollider,
    pub fuel: Fuel,
    pub health: Health,
    pub move_speed: f32,
    /// Seconds of invulnerability left (bomb safe time or post-hit grace).
    pub safe_time: f32,
    /// Displacement applied on the last tick.
    pub last_delta: Vec2,
}

impl Player {
    pub fn new(position: Vec2, move_speed: f32, max_health: f32) -> Self {
        Self {
            transform: Transform2D::from_position(position),
            collider: CircleCollider::new(PLAYER_RADIUS),
            fuel: Fuel::default(),
            health: Health::new(max_health),
            move_speed,
            safe_time: 0.0,
            last_delta: Vec2::ZERO,
        }
    }

    /// Move by the input axis, keep inside the arena, face the direction of
    /// travel, burn fuel and count down safe time.
    pub fn apply_input(&mut self, input: &PlayerInput, dt: f32, bounds: &Bounds, fuel_drain: f32) {
        let axis = input.movement.clamp_length_max(1.0);
        let before = self.transform.position;
        let wanted = before + axis * self.move_speed * dt;
        self.transform.position = bounds.clamp(wanted);
        self.last_delta = self.transform.position - before;
        self.transform.face_towards(self.last_delta);

        self.fuel.burn(fuel_drain * dt);
        self.safe_time = (self.safe_time - dt).max(0.0);
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn is_moving(&self) -> bool {
        self.last_delta.length_squared() > 1e-6
    }

    pub fn is_invulnerable(&self) -> bool {
        self.safe_time > 0.0
    }

    /// Extend invulnerability to at least `seconds`.
    pub fn grant_safe_time(&mut self, seconds: f32) {
        self.safe_time = self.safe_time.max(seconds);
    }

    /// Take a hit unless invulnerable. Returns whether damage was applied.
    pub fn take_hit(&mut self, damage: f32, grace: f32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.health.take_damage(damage);
        self.grant_safe_time(grace);
        true
    }

    /// Top up the tank, clamped to capacity.
    pub fn refuel(&mut self, amount: f32) {
        self.fuel.refuel(amount);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health.is_dead()
    }

    /// Back to full tank and hull at `position`.
    pub fn reset(&mut self, position: Vec2) {
        self.transform = Transform2D::from_position(position);
        self.fuel = Fuel::default();
        self.health.current = self.health.max;
        self.safe_time = 0.0;
        self.last_delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Bounds {
        Bounds::from_size(1000.0, 1000.0)
    }

    fn moving(x: f32, y: f32) -> PlayerInput {
        PlayerInput {
            movement: Vec2::new(x, y),
            ..Default::default()
        }
    }

    #[test]
    fn moves_and_faces_travel_direction() {
        let mut p = Player::new(Vec2::new(500.0, 500.0), 100.0, 100.0);
        p.apply_input(&moving(0.0, 1.0), 0.5, &arena(), 0.0);
        assert!((p.position() - Vec2::new(500.0, 550.0)).length() < 1e-3);
        assert!((p.transform.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn rotation_kept_when_idle() {
        let mut p = Player::new(Vec2::new(500.0, 500.0), 100.0, 100.0);
        p.apply_input(&moving(-1.0, 0.0), 0.1, &arena(), 0.0);
        let facing = p.transform.rotation;
        p.apply_input(&PlayerInput::default(), 0.1, &arena(), 0.0);
        assert_eq!(p.transform.rotation, facing);
        assert!(!p.is_moving());
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let mut p = Player::new(Vec2::new(500.0, 500.0), 100.0, 100.0);
        p.apply_input(&moving(1.0, 1.0), 1.0, &arena(), 0.0);
        assert!((p.last_delta.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn clamped_to_arena() {
        let mut p = Player::new(Vec2::new(990.0, 10.0), 100.0, 100.0);
        p.apply_input(&moving(1.0, -1.0), 1.0, &arena(), 0.0);
        assert!(arena().contains(p.position()));
    }

    #[test]
    fn fuel_never_negative() {
        let mut p = Player::new(Vec2::ZERO, 100.0, 100.0);
        for _ in 0..1000 {
            p.apply_input(&PlayerInput::default(), 1.0, &arena(), 7.0);
            assert!(p.fuel.level() >= 0.0 && p.fuel.level() <= 100.0);
        }
        assert!(p.fuel.is_empty());
    }

    #[test]
    fn grace_blocks_repeat_hits() {
        let mut p = Player::new(Vec2::ZERO, 100.0, 100.0);
        assert!(p.take_hit(20.0, 1.0));
        assert!(!p.take_hit(20.0, 1.0));
        assert_eq!(p.health.current, 80.0);
        p.apply_input(&PlayerInput::default(), 1.0, &arena(), 0.0);
        assert!(p.take_hit(20.0, 1.0));
    }
}
