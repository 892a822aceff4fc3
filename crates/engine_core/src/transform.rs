//! Transform component and utilities for planar positioning.

use glam::Vec2;

/// A 2D transform: position in arena units, rotation in radians
/// (0 = facing +X, counter-clockwise positive) and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform2D {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Unit vector the transform is facing.
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.rotation)
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Rotate to face along `direction`. Near-zero directions keep the
    /// current rotation.
    pub fn face_towards(&mut self, direction: Vec2) {
        if direction.length_squared() > 1e-6 {
            self.rotation = direction.y.atan2(direction.x);
        }
    }

    /// Distance between two transforms' positions.
    pub fn distance_to(&self, other: &Transform2D) -> f32 {
        self.position.distance(other.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_towards_ignores_zero_direction() {
        let mut t = Transform2D::from_position_rotation(Vec2::ZERO, 1.0);
        t.face_towards(Vec2::ZERO);
        assert_eq!(t.rotation, 1.0);
        t.face_towards(Vec2::new(0.0, 2.0));
        assert!((t.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn translate_then_measure() {
        let mut a = Transform2D::from_position(Vec2::new(1.0, 1.0));
        a.translate(Vec2::new(3.0, 4.0));
        let b = Transform2D::from_position(Vec2::new(1.0, 1.0));
        assert_eq!(a.position, Vec2::new(4.0, 5.0));
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn forward_matches_rotation() {
        let t = Transform2D::from_position_rotation(Vec2::ZERO, std::f32::consts::PI);
        assert!((t.forward() - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }
}
