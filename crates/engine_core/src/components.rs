//! Common ECS components used across the game.

use glam::Vec2;

/// Velocity component for moving entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub linear: Vec2,
}

impl Velocity {
    pub fn new(linear: Vec2) -> Self {
        Self { linear }
    }
}

/// Health component for damageable entities.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.max
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Fuel tank. The level is always kept within `[0, capacity]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fuel {
    level: f32,
    capacity: f32,
}

impl Fuel {
    pub const DEFAULT_CAPACITY: f32 = 100.0;

    /// A full tank.
    pub fn full(capacity: f32) -> Self {
        let capacity = capacity.max(0.0);
        Self { level: capacity, capacity }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    /// Burn `amount` of fuel. Negative amounts are treated as zero.
    pub fn burn(&mut self, amount: f32) {
        self.level = (self.level - amount.max(0.0)).clamp(0.0, self.capacity);
    }

    /// Add `amount` of fuel, never above capacity.
    pub fn refuel(&mut self, amount: f32) {
        self.level = (self.level + amount.max(0.0)).clamp(0.0, self.capacity);
    }

    pub fn is_empty(&self) -> bool {
        self.level <= 0.0
    }

    /// Below a quarter tank.
    pub fn is_low(&self) -> bool {
        self.level < self.capacity * 0.25
    }

    pub fn percentage(&self) -> f32 {
        if self.capacity > 0.0 {
            self.level / self.capacity
        } else {
            0.0
        }
    }
}

impl Default for Fuel {
    fn default() -> Self {
        Self::full(Self::DEFAULT_CAPACITY)
    }
}

/// Countdown for short-lived things: particles, toasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
    /// Starting value of `remaining`.
    pub total: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        let seconds = seconds.max(0.0);
        Self {
            remaining: seconds,
            total: seconds,
        }
    }

    /// Count down by `dt`. Returns true once expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Share of the lifetime still left, 0 once expired.
    pub fn fraction(&self) -> f32 {
        if self.total > 0.0 {
            (self.remaining / self.total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Circular collision shape, centered on the entity's transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCollider {
    pub radius: f32,
}

impl CircleCollider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// True when two circles at `a` and `b` touch or intersect.
    pub fn overlaps(&self, a: Vec2, other: &CircleCollider, b: Vec2) -> bool {
        let reach = self.radius + other.radius;
        a.distance_squared(b) <= reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_stays_within_capacity() {
        let mut fuel = Fuel::full(100.0);
        fuel.burn(250.0);
        assert_eq!(fuel.level(), 0.0);
        assert!(fuel.is_empty());
        fuel.refuel(500.0);
        assert_eq!(fuel.level(), 100.0);
        fuel.burn(-10.0);
        assert_eq!(fuel.level(), 100.0);
    }

    #[test]
    fn fuel_low_threshold() {
        let mut fuel = Fuel::full(100.0);
        fuel.burn(80.0);
        assert!(fuel.is_low());
        assert!((fuel.percentage() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn health_clamps() {
        let mut h = Health::new(50.0);
        h.take_damage(80.0);
        assert!(h.is_dead());
        h.heal(500.0);
        assert_eq!(h.current, 50.0);
    }

    #[test]
    fn lifetime_counts_down_to_zero() {
        let mut life = Lifetime::new(1.0);
        assert!(!life.update(0.25));
        assert!((life.fraction() - 0.75).abs() < 1e-6);
        assert!(life.update(5.0));
        assert_eq!(life.remaining, 0.0);
        assert_eq!(life.fraction(), 0.0);
        assert!(Lifetime::new(-1.0).is_expired());
    }

    #[test]
    fn circle_overlap_is_inclusive() {
        let a = CircleCollider::new(1.0);
        let b = CircleCollider::new(2.0);
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(3.0, 0.0)));
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(3.1, 0.0)));
    }
}
