//! Spawn placement by rejection sampling.
//!
//! Candidates are drawn uniformly from the arena and kept only if they are
//! far enough from the player and from everything already placed. After
//! `max_attempts` misses the last draw is used unchecked, so placement
//! always succeeds but may violate the spacing rules on crowded maps.

use engine_core::{Bounds, Vec2};
use rand::Rng;

/// Distance constraints for a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    /// Candidates must be strictly farther than this from the player.
    pub min_player_distance: f32,
    /// Candidates must be strictly farther than this from existing points.
    pub min_spacing: f32,
    /// Draws before giving up and using an unchecked position.
    pub max_attempts: u32,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            min_player_distance: 300.0,
            min_spacing: 150.0,
            max_attempts: 10,
        }
    }
}

/// Result of a single placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    /// True when no candidate satisfied the rules and the position is unchecked.
    pub fallback: bool,
}

/// Uniform random point inside `bounds`. Degenerate axes collapse to `min`.
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds) -> Vec2 {
    let axis = |rng: &mut R, lo: f32, hi: f32| -> f32 {
        if hi > lo {
            rng.gen_range(lo..hi)
        } else {
            lo
        }
    };
    let x = axis(rng, bounds.min.x, bounds.max.x);
    let y = axis(rng, bounds.min.y, bounds.max.y);
    Vec2::new(x, y)
}

/// True when `candidate` honours both distance rules.
pub fn is_clear(candidate: Vec2, player: Vec2, existing: &[Vec2], rules: &PlacementRules) -> bool {
    if candidate.distance(player) <= rules.min_player_distance {
        return false;
    }
    existing
        .iter()
        .all(|p| candidate.distance(*p) > rules.min_spacing)
}

/// Pick a position away from the player and existing points.
pub fn place_with_rejection<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &Bounds,
    player: Vec2,
    existing: &[Vec2],
    rules: &PlacementRules,
) -> Placement {
    for _ in 0..rules.max_attempts {
        let candidate = random_point(rng, bounds);
        if is_clear(candidate, player, existing, rules) {
            return Placement {
                position: candidate,
                fallback: false,
            };
        }
    }

    log::trace!(
        "placement gave up after {} attempts, using unchecked position",
        rules.max_attempts
    );
    Placement {
        position: random_point(rng, bounds),
        fallback: true,
    }
}

/// Place `count` points one after another, each checked against those
/// already placed.
pub fn scatter<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &Bounds,
    player: Vec2,
    count: usize,
    rules: &PlacementRules,
) -> Vec<Placement> {
    let mut placed: Vec<Vec2> = Vec::with_capacity(count);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let p = place_with_rejection(rng, bounds, player, &placed, rules);
        placed.push(p.position);
        out.push(p);
    }
    let fallbacks = out.iter().filter(|p| p.fallback).count();
    if fallbacks > 0 {
        log::debug!("scatter: {fallbacks}/{count} placements fell back");
    }
    out
}
