//! Axis-aligned play-area bounds.

use glam::Vec2;

/// Rectangular region in arena units, `min` inclusive to `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Bounds spanning `(0, 0)` to `(width, height)`.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    /// Shrink on every side by `margin`, collapsing to the center if the
    /// bounds are too small.
    pub fn inset(&self, margin: f32) -> Self {
        let half = self.size() * 0.5;
        let m = Vec2::splat(margin).min(half);
        Self::new(self.min + m, self.max - m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_corners() {
        let b = Bounds::new(Vec2::new(10.0, 10.0), Vec2::ZERO);
        assert_eq!(b.min, Vec2::ZERO);
        assert_eq!(b.max, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn inset_collapses_to_center() {
        let b = Bounds::from_size(10.0, 4.0).inset(3.0);
        assert_eq!(b.min.y, 2.0);
        assert_eq!(b.max.y, 2.0);
        assert_eq!(b.min.x, 3.0);
        assert!(b.contains(Vec2::new(5.0, 2.0)));
    }
}
