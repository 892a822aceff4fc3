//! Bomb: clears every enemy and grants safe time, then recharges.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BombError {
    #[error("bomb recharging ({remaining:.1}s left)")]
    Cooling { remaining: f32 },
}

/// Cooldown bookkeeping for the bomb. Clearing enemies and granting safe
/// time is up to the caller once `trigger` succeeds.
#[derive(Debug, Clone)]
pub struct Bomb {
    pub cooldown: f32,
    remaining: f32,
    pub uses: u32,
}

impl Bomb {
    /// A charged bomb that takes `cooldown` seconds to recharge after use.
    pub fn new(cooldown: f32) -> Self {
        Self {
            cooldown: cooldown.max(0.0),
            remaining: 0.0,
            uses: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds until ready.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Recharge progress, 1.0 when ready.
    pub fn charge(&self) -> f32 {
        if self.cooldown <= 0.0 {
            1.0
        } else {
            1.0 - (self.remaining / self.cooldown).clamp(0.0, 1.0)
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Fire the bomb if charged.
    pub fn trigger(&mut self) -> Result<(), BombError> {
        if !self.is_ready() {
            return Err(BombError::Cooling {
                remaining: self.remaining,
            });
        }
        self.remaining = self.cooldown;
        self.uses += 1;
        Ok(())
    }

    /// Fully recharge (new level).
    pub fn recharge(&mut self) {
        self.remaining = 0.0;
    }
}
