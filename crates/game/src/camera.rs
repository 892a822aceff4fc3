//! Follow camera with trauma-based screen shake.

use engine_core::Bounds;
use glam::Vec2;

/// Camera screen shake for impact feedback.
#[derive(Debug, Clone)]
pub struct ScreenShake {
    pub intensity: f32,
    pub decay_rate: f32,
    /// Largest offset at full trauma, in world units.
    pub max_offset: f32,
    pub offset: Vec2,
    pub trauma: f32,
}

impl ScreenShake {
    pub fn new() -> Self {
        Self { intensity: 0.0, decay_rate: 1.5, max_offset: 24.0, offset: Vec2::ZERO, trauma: 0.0 }
    }

    pub fn add_trauma(&mut self, amount: f32) {
        self.trauma = (self.trauma + amount).clamp(0.0, 1.0);
    }

    /// `time` is the game clock in seconds; the offset is a function of it
    /// so replays shake identically.
    pub fn update(&mut self, dt: f32, time: f32) {
        self.intensity = self.trauma * self.trauma;
        if self.intensity > 0.001 {
            let max_offset = self.intensity * self.max_offset;
            self.offset = Vec2::new(
                (time * 173.7).sin() * max_offset,
                (time * 259.3).cos() * max_offset,
            );
        } else {
            self.offset = Vec2::ZERO;
        }
        self.trauma = (self.trauma - self.decay_rate * dt).max(0.0);
    }
}

impl Default for ScreenShake {
    fn default() -> Self {
        Self::new()
    }
}

/// Smoothly tracks a target, keeping the viewport inside the arena.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    /// Center of the view in world units.
    pub center: Vec2,
    pub viewport: Vec2,
    /// Catch-up rate; higher is snappier.
    pub smoothing: f32,
}

impl FollowCamera {
    pub fn new(center: Vec2, viewport: Vec2) -> Self {
        Self { center, viewport, smoothing: 6.0 }
    }

    pub fn snap_to(&mut self, target: Vec2, arena: &Bounds) {
        self.center = self.clamp_center(target, arena);
    }

    pub fn update(&mut self, target: Vec2, dt: f32, arena: &Bounds) {
        let t = 1.0 - (-self.smoothing * dt).exp();
        let wanted = self.center.lerp(target, t);
        self.center = self.clamp_center(wanted, arena);
    }

    fn clamp_center(&self, center: Vec2, arena: &Bounds) -> Vec2 {
        let half = (self.viewport * 0.5).min(arena.size() * 0.5);
        center.clamp(arena.min + half, arena.max - half)
    }

    /// Top-left corner of the view, shake applied.
    pub fn view_origin(&self, shake: &ScreenShake) -> Vec2 {
        self.center - self.viewport * 0.5 + shake.offset
    }

    /// Horizontal position of `point` across the view, 0.0 (left) to 1.0 (right).
    pub fn pan_of(&self, point: Vec2) -> f32 {
        if self.viewport.x <= 0.0 {
            return 0.5;
        }
        ((point.x - self.center.x) / self.viewport.x + 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trauma_decays_to_rest() {
        let mut shake = ScreenShake::new();
        shake.add_trauma(5.0);
        assert_eq!(shake.trauma, 1.0);
        shake.update(0.1, 1.234);
        assert!(shake.offset.length() > 0.0);
        for i in 0..20 {
            shake.update(0.1, i as f32);
        }
        assert_eq!(shake.trauma, 0.0);
        shake.update(0.1, 9.0);
        assert_eq!(shake.offset, Vec2::ZERO);
    }

    #[test]
    fn camera_converges_on_target() {
        let arena = Bounds::from_size(4000.0, 4000.0);
        let mut cam = FollowCamera::new(Vec2::new(2000.0, 2000.0), Vec2::new(800.0, 600.0));
        for _ in 0..300 {
            cam.update(Vec2::new(2500.0, 1800.0), 1.0 / 60.0, &arena);
        }
        assert!((cam.center - Vec2::new(2500.0, 1800.0)).length() < 1.0);
    }

    #[test]
    fn camera_stays_inside_arena() {
        let arena = Bounds::from_size(2000.0, 1000.0);
        let mut cam = FollowCamera::new(Vec2::ZERO, Vec2::new(800.0, 600.0));
        cam.snap_to(Vec2::new(-500.0, 5000.0), &arena);
        assert_eq!(cam.center, Vec2::new(400.0, 700.0));
    }

    #[test]
    fn pan_tracks_screen_side() {
        let cam = FollowCamera::new(Vec2::new(500.0, 500.0), Vec2::new(1000.0, 600.0));
        assert_eq!(cam.pan_of(Vec2::new(0.0, 0.0)), 0.0);
        assert_eq!(cam.pan_of(Vec2::new(500.0, 0.0)), 0.5);
        assert_eq!(cam.pan_of(Vec2::new(5000.0, 0.0)), 1.0);
    }
}
