//! Particle effects: pickup sparkles, explosion bursts and engine exhaust.
//!
//! Particles live in a fixed-capacity pool. Dead slots are reused before
//! the pool grows, and once full the oldest emission slot is overwritten.

use engine_core::Lifetime;
use glam::Vec2;
use rand::Rng;

/// Velocity damping per second.
const DRAG: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub lifetime: Lifetime,
    pub size: f32,
    pub color: [f32; 4],
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        !self.lifetime.is_expired()
    }

    /// Color with alpha faded by remaining life.
    pub fn faded_color(&self) -> [f32; 4] {
        let t = self.lifetime.fraction();
        [self.color[0], self.color[1], self.color[2], self.color[3] * t]
    }
}

/// Parameters for a radial burst.
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    pub color: [f32; 4],
    pub speed: f32,
    pub life: f32,
    pub size: f32,
}

impl Burst {
    pub fn sparkle(color: [f32; 4]) -> Self {
        Self { count: 14, color, speed: 180.0, life: 0.5, size: 3.0 }
    }

    pub fn explosion() -> Self {
        Self { count: 60, color: [1.0, 0.55, 0.15, 1.0], speed: 420.0, life: 0.9, size: 5.0 }
    }

    pub fn impact() -> Self {
        Self { count: 20, color: [1.0, 0.25, 0.2, 1.0], speed: 220.0, life: 0.4, size: 4.0 }
    }
}

pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
    /// Next slot to overwrite when the pool is full.
    cursor: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn emit(&mut self, particle: Particle) {
        if self.capacity == 0 {
            return;
        }
        if let Some(slot) = self.particles.iter_mut().find(|p| !p.is_alive()) {
            *slot = particle;
            return;
        }
        if self.particles.len() < self.capacity {
            self.particles.push(particle);
            return;
        }
        self.particles[self.cursor] = particle;
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    /// Spray `burst.count` particles outward from `origin`.
    pub fn burst<R: Rng + ?Sized>(&mut self, rng: &mut R, origin: Vec2, burst: Burst) {
        for _ in 0..burst.count {
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let speed = burst.speed * (0.3 + rng.gen::<f32>() * 0.7);
            let life = burst.life * (0.6 + rng.gen::<f32>() * 0.4);
            self.emit(Particle {
                position: origin,
                velocity: Vec2::from_angle(angle) * speed,
                lifetime: Lifetime::new(life),
                size: burst.size * (0.5 + rng.gen::<f32>()),
                color: burst.color,
            });
        }
    }

    /// One exhaust puff trailing behind a craft heading along `heading`.
    pub fn exhaust<R: Rng + ?Sized>(&mut self, rng: &mut R, origin: Vec2, heading: Vec2) {
        let back = -heading.normalize_or_zero();
        let spread = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * 40.0;
        self.emit(Particle {
            position: origin + back * 20.0,
            velocity: back * 90.0 + spread,
            lifetime: Lifetime::new(0.35),
            size: 2.5,
            color: [0.5, 0.8, 1.0, 0.8],
        });
    }

    pub fn update(&mut self, dt: f32) {
        let damping = (1.0 - DRAG * dt).max(0.0);
        for p in self.particles.iter_mut().filter(|p| p.is_alive()) {
            p.position += p.velocity * dt;
            p.velocity *= damping;
            p.lifetime.update(dt);
        }
    }

    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pool_never_exceeds_capacity() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = ParticlePool::new(32);
        for _ in 0..5 {
            pool.burst(&mut rng, Vec2::ZERO, Burst::explosion());
        }
        assert_eq!(pool.alive_count(), 32);
        assert!(pool.particles.len() <= pool.capacity());
    }

    #[test]
    fn dead_slots_are_reused() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut pool = ParticlePool::new(100);
        pool.burst(&mut rng, Vec2::ZERO, Burst::sparkle([1.0; 4]));
        pool.update(1.0);
        assert_eq!(pool.alive_count(), 0);
        pool.burst(&mut rng, Vec2::ZERO, Burst::sparkle([1.0; 4]));
        assert_eq!(pool.particles.len(), 14);
        assert_eq!(pool.alive_count(), 14);
    }

    #[test]
    fn particles_move_and_fade() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = ParticlePool::new(10);
        pool.exhaust(&mut rng, Vec2::ZERO, Vec2::X);
        pool.update(0.1);
        let p = pool.alive().next().unwrap();
        assert!(p.position.x < -20.0);
        assert!(p.faded_color()[3] < 0.8);
    }

    #[test]
    fn zero_capacity_pool_is_inert() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut pool = ParticlePool::new(0);
        pool.burst(&mut rng, Vec2::ZERO, Burst::impact());
        assert_eq!(pool.alive_count(), 0);
    }
}
