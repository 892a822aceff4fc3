//! Enemy steering behaviors.
//!
//! Each behavior is a pure function of position, target and elapsed time
//! that yields a velocity. Enemies ignore each other; there is no
//! pathfinding or obstacle model.

use glam::Vec2;

/// Named steering behavior carried by each enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Fly to a random waypoint, pick another on arrival.
    Patrol,
    /// Circle the player at a time-varying angle.
    Orbit,
    /// Keep away from the player when it comes close.
    Avoid,
    /// Drift in place.
    Idle,
}

impl Behavior {
    pub fn name(self) -> &'static str {
        match self {
            Behavior::Patrol => "patrol",
            Behavior::Orbit => "orbit",
            Behavior::Avoid => "avoid",
            Behavior::Idle => "idle",
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            Behavior::Patrol => [1.0, 0.35, 0.3, 1.0],
            Behavior::Orbit => [1.0, 0.2, 0.7, 1.0],
            Behavior::Avoid => [0.6, 0.4, 1.0, 1.0],
            Behavior::Idle => [0.7, 0.7, 0.7, 1.0],
        }
    }
}

/// Shape constants shared by all enemies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringParams {
    /// Patrol slows inside this radius and retargets once inside a quarter of it.
    pub arrive_radius: f32,
    pub orbit_radius: f32,
    /// Orbit angular speed (radians per second).
    pub orbit_rate: f32,
    /// Avoiders flee when the player is inside this radius.
    pub avoid_radius: f32,
    /// Idle jitter speed as a fraction of full speed.
    pub idle_jitter: f32,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            arrive_radius: 80.0,
            orbit_radius: 220.0,
            orbit_rate: 0.8,
            avoid_radius: 260.0,
            idle_jitter: 0.25,
        }
    }
}

/// Seek `target`, slowing linearly inside `arrive_radius`.
pub fn patrol(position: Vec2, target: Vec2, speed: f32, arrive_radius: f32) -> Vec2 {
    let to_target = target - position;
    let distance = to_target.length();
    if distance < 1e-3 {
        return Vec2::ZERO;
    }
    let scale = if arrive_radius > 0.0 {
        (distance / arrive_radius).min(1.0)
    } else {
        1.0
    };
    to_target / distance * speed * scale
}

/// Seek the point on a circle of `radius` around `center` at angle
/// `elapsed * rate + phase`. Speed is capped at `speed`.
pub fn orbit(
    position: Vec2,
    center: Vec2,
    elapsed: f32,
    phase: f32,
    speed: f32,
    radius: f32,
    rate: f32,
) -> Vec2 {
    let angle = elapsed * rate + phase;
    let slot = center + Vec2::from_angle(angle) * radius;
    (slot - position).clamp_length_max(speed)
}

/// Flee from `threat` at full speed while inside `radius`, otherwise hold still.
pub fn avoid(position: Vec2, threat: Vec2, speed: f32, radius: f32) -> Vec2 {
    let away = position - threat;
    let distance = away.length();
    if distance >= radius {
        return Vec2::ZERO;
    }
    if distance < 1e-3 {
        // Sitting exactly on the threat: any direction will do
        return Vec2::X * speed;
    }
    away / distance * speed
}

/// Small wandering motion around the current position.
pub fn idle(elapsed: f32, phase: f32, speed: f32, jitter: f32) -> Vec2 {
    Vec2::new(
        (elapsed * 3.0 + phase).sin(),
        (elapsed * 2.3 + phase * 1.7).cos(),
    ) * speed
        * jitter
}

/// Enemy component.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub behavior: Behavior,
    /// Patrol waypoint. Unused by the other behaviors.
    pub target: Vec2,
    pub speed: f32,
    /// Per-enemy offset so orbiters and idlers desynchronize.
    pub phase: f32,
}

impl Enemy {
    pub fn new(behavior: Behavior, target: Vec2, speed: f32, phase: f32) -> Self {
        Self {
            behavior,
            target,
            speed,
            phase,
        }
    }

    /// Velocity for this tick.
    pub fn steer(&self, position: Vec2, player: Vec2, elapsed: f32, params: &SteeringParams) -> Vec2 {
        match self.behavior {
            Behavior::Patrol => patrol(position, self.target, self.speed, params.arrive_radius),
            Behavior::Orbit => orbit(
                position,
                player,
                elapsed,
                self.phase,
                self.speed,
                params.orbit_radius,
                params.orbit_rate,
            ),
            Behavior::Avoid => avoid(position, player, self.speed, params.avoid_radius),
            Behavior::Idle => idle(elapsed, self.phase, self.speed, params.idle_jitter),
        }
    }

    /// True for a patroller close enough to its waypoint to pick a new one.
    pub fn needs_new_target(&self, position: Vec2, params: &SteeringParams) -> bool {
        self.behavior == Behavior::Patrol
            && position.distance(self.target) <= params.arrive_radius * 0.25
    }
}
