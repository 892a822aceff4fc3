//! Computer pilot for headless runs and demos.
//!
//! Seeks the nearest uncollected coin, veers away from enemies inside a
//! danger radius and drops the bomb when boxed in.

use engine_core::Transform2D;
use glam::Vec2;

use crate::coin::Coin;
use crate::enemy::Enemy;
use crate::session::Session;
use crate::state::PlayerInput;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Enemies closer than this push the pilot away.
    pub danger_radius: f32,
    /// Strength of the push at point-blank range, relative to the coin pull.
    pub avoidance: f32,
    /// Inside this distance of the target coin enemies are ignored.
    pub commit_radius: f32,
    /// Enemies inside the danger radius needed to trigger the bomb.
    pub bomb_crowd: usize,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            danger_radius: 160.0,
            avoidance: 1.5,
            commit_radius: 120.0,
            bomb_crowd: 2,
        }
    }
}

impl Autopilot {
    pub fn decide(&self, session: &Session) -> PlayerInput {
        if !session.phase().is_playing() {
            return PlayerInput::default();
        }
        let world = session.world();
        let ship = session.player().transform;
        let me = ship.position;

        let target = world
            .query::<(&Transform2D, &Coin)>()
            .iter()
            .filter(|(_, (_, coin))| !coin.collected)
            .map(|(_, (t, _))| *t)
            .min_by(|a, b| ship.distance_to(a).total_cmp(&ship.distance_to(b)));

        let mut steer = target.map_or(Vec2::ZERO, |t| (t.position - me).normalize_or_zero());
        let committed = target.is_some_and(|t| ship.distance_to(&t) <= self.commit_radius);

        let mut crowd = 0;
        for (_, (t, _)) in world.query::<(&Transform2D, &Enemy)>().iter() {
            let away = me - t.position;
            let distance = away.length();
            if distance >= self.danger_radius {
                continue;
            }
            crowd += 1;
            if !committed && !session.player().is_invulnerable() {
                let push = (1.0 - distance / self.danger_radius) * self.avoidance;
                steer += away.normalize_or(Vec2::Y) * push;
            }
        }

        PlayerInput {
            movement: steer.clamp_length_max(1.0),
            bomb: crowd >= self.bomb_crowd && session.bomb().is_ready(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::save::SaveRecord;

    #[test]
    fn idle_outside_play() {
        let session = Session::new(GameConfig::default(), SaveRecord::default(), 1);
        assert_eq!(Autopilot::default().decide(&session), PlayerInput::default());
    }

    #[test]
    fn heads_for_nearest_coin() {
        let mut session = Session::new(GameConfig::default(), SaveRecord::default(), 1);
        session.start();
        let me = session.player().position();
        let nearest = session
            .world()
            .query::<(&Transform2D, &Coin)>()
            .iter()
            .map(|(_, (t, _))| t.position)
            .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)))
            .unwrap();
        let input = Autopilot::default().decide(&session);
        assert!(input.movement.dot((nearest - me).normalize()) > 0.99);
        assert!(!input.bomb);
    }
}
