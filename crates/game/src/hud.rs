//! HUD (Heads-Up Display) data gathered from the session each frame.
//! Score, level, fuel, hull, coin progress, bomb readiness, toasts and the
//! phase banner. Drawing is up to the frontend.

use crate::session::Session;

/// Fuel-bar colour ramp thresholds.
const FUEL_WARN: f32 = 0.5;
const FUEL_CRITICAL: f32 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveLine {
    pub label: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudData {
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub sector: String,
    /// Fuel as a 0..1 fraction.
    pub fuel: f32,
    pub health: f32,
    pub max_health: f32,
    pub coins_collected: u32,
    pub coins_needed: u32,
    pub bomb_ready: bool,
    /// Bomb recharge progress, 1.0 when ready.
    pub bomb_charge: f32,
    pub safe_time: f32,
    pub enemies: usize,
    pub toasts: Vec<Toast>,
    pub objectives: Vec<ObjectiveLine>,
    pub banner: Option<&'static str>,
    /// Reason line under the game-over banner.
    pub subtitle: Option<&'static str>,
}

impl HudData {
    pub fn gather(session: &Session) -> Self {
        let player = session.player();
        let phase = session.phase();
        let subtitle = match phase {
            crate::state::GamePhase::GameOver(reason) => Some(reason.describe()),
            _ => None,
        };
        Self {
            score: session.score(),
            high_score: session.save().high_score.max(session.score()),
            level: session.level(),
            sector: session.starfield().name.clone(),
            fuel: player.fuel.percentage(),
            health: player.health.current,
            max_health: player.health.max,
            coins_collected: session.coins_collected(),
            coins_needed: session.params().coins_needed,
            bomb_ready: session.bomb().is_ready(),
            bomb_charge: session.bomb().charge(),
            safe_time: player.safe_time,
            enemies: session.enemy_count(),
            toasts: session
                .messages()
                .visible()
                .iter()
                .map(|m| Toast {
                    text: m.label(),
                    color: m.color(),
                })
                .collect(),
            objectives: session
                .missions()
                .objectives
                .iter()
                .map(|o| ObjectiveLine {
                    label: o.label.clone(),
                    completed: o.completed,
                })
                .collect(),
            banner: phase.banner(),
            subtitle,
        }
    }

    /// Green, yellow, then red as the tank empties.
    pub fn fuel_color(&self) -> [f32; 4] {
        if self.fuel > FUEL_WARN {
            [0.3, 1.0, 0.3, 1.0]
        } else if self.fuel > FUEL_CRITICAL {
            [1.0, 0.9, 0.2, 1.0]
        } else {
            [1.0, 0.2, 0.1, 1.0]
        }
    }

    /// One-line summary for text frontends.
    pub fn status_line(&self) -> String {
        let bomb = if self.bomb_ready {
            "READY".to_string()
        } else {
            format!("{:.0}%", self.bomb_charge * 100.0)
        };
        format!(
            "LV {} {} | SCORE {} (HI {}) | FUEL {:.0}% | HULL {:.0} | COINS {}/{} | BOMB {}",
            self.level,
            self.sector,
            self.score,
            self.high_score,
            self.fuel * 100.0,
            self.health,
            self.coins_collected,
            self.coins_needed,
            bomb
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::save::SaveRecord;

    #[test]
    fn gathers_level_state() {
        let mut session = Session::new(GameConfig::default(), SaveRecord::default(), 3);
        session.start();
        let hud = HudData::gather(&session);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.coins_needed, 15);
        assert_eq!(hud.fuel, 1.0);
        assert!(hud.bomb_ready);
        assert_eq!(hud.objectives.len(), 4);
        assert_eq!(hud.banner, None);
        assert!(hud.status_line().contains("COINS 0/15"));
        assert!(hud.status_line().contains("BOMB READY"));
    }

    #[test]
    fn menu_shows_title_banner() {
        let session = Session::new(GameConfig::default(), SaveRecord::default(), 3);
        assert_eq!(HudData::gather(&session).banner, Some("INFINITE GALAXY"));
    }

    #[test]
    fn fuel_color_ramps() {
        let session = Session::new(GameConfig::default(), SaveRecord::default(), 3);
        let mut hud = HudData::gather(&session);
        assert_eq!(hud.fuel_color()[0], 0.3);
        hud.fuel = 0.1;
        assert_eq!(hud.fuel_color()[1], 0.2);
    }
}
