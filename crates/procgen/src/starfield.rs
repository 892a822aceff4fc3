//! Starfield generation: the decorative backdrop behind each level.

use glam::Vec2;
use noise::{NoiseFn, Perlin};
use rand::prelude::*;

/// Parallax factor per star layer (0 = farthest). Lower layers scroll slower.
pub const LAYER_PARALLAX: [f32; 3] = [0.15, 0.4, 0.75];

/// Coarse grid spacing for nebula sampling, in arena units.
const NEBULA_CELL: f32 = 220.0;
/// Noise value above which a nebula patch is placed.
const NEBULA_THRESHOLD: f64 = 0.3;

/// A single background star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vec2,
    /// Index into [`LAYER_PARALLAX`].
    pub layer: usize,
    pub size: f32,
    pub brightness: f32,
    /// Phase offset so stars don't twinkle in lockstep.
    pub twinkle_phase: f32,
}

impl Star {
    /// Brightness at time `t` seconds, a slow sine around the base value.
    pub fn brightness_at(&self, t: f32) -> f32 {
        (self.brightness * (0.8 + 0.2 * (t * 2.3 + self.twinkle_phase).sin())).clamp(0.0, 1.0)
    }
}

/// Soft coloured gas cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct Nebula {
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Distant decorative planet.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
    pub ringed: bool,
}

/// The full decorated backdrop for one level.
#[derive(Debug, Clone)]
pub struct Starfield {
    pub seed: u64,
    pub name: String,
    pub size: Vec2,
    pub stars: Vec<Star>,
    pub nebulae: Vec<Nebula>,
    pub planets: Vec<Planet>,
}

impl Starfield {
    /// Generate a starfield covering `size` with roughly `density` stars per
    /// million square units. Same seed, same field.
    pub fn generate(seed: u64, size: Vec2, density: f32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let area = (size.x.max(0.0) * size.y.max(0.0)) / 1_000_000.0;
        let star_count = (area * density.max(0.0)).round() as usize;

        let stars = (0..star_count)
            .map(|_| {
                // Far layer is the most populated
                let roll = rng.gen::<f32>();
                let layer = if roll < 0.55 {
                    0
                } else if roll < 0.85 {
                    1
                } else {
                    2
                };
                Star {
                    position: Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y),
                    layer,
                    size: 0.6 + layer as f32 * 0.6 + rng.gen::<f32>() * 0.8,
                    brightness: 0.35 + rng.gen::<f32>() * 0.65,
                    twinkle_phase: rng.gen::<f32>() * std::f32::consts::TAU,
                }
            })
            .collect();

        let nebulae = generate_nebulae(seed, size, &mut rng);

        let planet_count = rng.gen_range(1..=3usize);
        let planets = (0..planet_count)
            .map(|_| Planet {
                center: Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y),
                radius: 30.0 + rng.gen::<f32>() * 90.0,
                color: hsv_to_rgba(rng.gen::<f32>(), 0.45, 0.8, 1.0),
                ringed: rng.gen_bool(0.3),
            })
            .collect();

        let name = sector_name(seed);
        log::debug!(
            "Generated starfield '{}' ({} stars, {} nebulae, {} planets)",
            name,
            star_count,
            nebulae.len(),
            planet_count
        );

        Self {
            seed,
            name,
            size,
            stars,
            nebulae,
            planets,
        }
    }

    /// Screen-space offset for a layer given the camera position.
    pub fn layer_offset(camera: Vec2, layer: usize) -> Vec2 {
        let factor = LAYER_PARALLAX.get(layer).copied().unwrap_or(1.0);
        -camera * factor
    }

    /// Stars in a given layer.
    pub fn stars_in_layer(&self, layer: usize) -> impl Iterator<Item = &Star> {
        self.stars.iter().filter(move |s| s.layer == layer)
    }
}

/// Sample Perlin noise on a coarse grid and drop a nebula wherever it peaks.
fn generate_nebulae(seed: u64, size: Vec2, rng: &mut StdRng) -> Vec<Nebula> {
    let perlin = Perlin::new(seed as u32);
    let hue_base = rng.gen::<f32>();
    let cols = (size.x / NEBULA_CELL).ceil().max(0.0) as usize;
    let rows = (size.y / NEBULA_CELL).ceil().max(0.0) as usize;

    let mut nebulae = Vec::new();
    for gy in 0..rows {
        for gx in 0..cols {
            let value = perlin.get([gx as f64 * 0.37, gy as f64 * 0.37]);
            if value <= NEBULA_THRESHOLD {
                continue;
            }
            let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * NEBULA_CELL;
            let center = Vec2::new(
                (gx as f32 + 0.5) * NEBULA_CELL,
                (gy as f32 + 0.5) * NEBULA_CELL,
            ) + jitter;
            let strength = ((value - NEBULA_THRESHOLD) / (1.0 - NEBULA_THRESHOLD)) as f32;
            let hue = (hue_base + rng.gen::<f32>() * 0.15).fract();
            nebulae.push(Nebula {
                center,
                radius: NEBULA_CELL * (0.6 + strength),
                color: hsv_to_rgba(hue, 0.6, 0.5, 0.08 + strength * 0.2),
            });
        }
    }
    nebulae
}

fn hsv_to_rgba(h: f32, s: f32, v: f32, a: f32) -> [f32; 4] {
    let h = h.rem_euclid(1.0) * 6.0;
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m, a]
}

/// Generate a sector name shown in the level banner.
pub fn sector_name(seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(42));

    if rng.gen_bool(0.35) {
        let sector_style = [
            "Sector", "Drift", "Zone", "Quadrant", "Reach", "Expanse",
            "Outer Rim", "Inner Rim", "Core", "Fringe", "Frontier",
        ];
        let style = sector_style[rng.gen_range(0..sector_style.len())];
        let num = rng.gen_range(1..=99);
        return format!("{} {}", style, num);
    }

    let prefixes = [
        "Sol", "Alp", "Bet", "Gam", "Del", "Eps", "Zet", "Eta",
        "The", "Iot", "Kap", "Lam", "Sig", "Tau", "Ups", "Phi",
        "Chi", "Psi", "Ome", "Rig", "Veg", "Pro", "Arc", "Sir",
    ];
    let middles = [
        "ar", "el", "an", "or", "en", "al", "ir", "ul",
        "ax", "on", "is", "us", "em", "os", "in", "at",
    ];
    let suffixes = ["a", "us", "is", "i", "ae", "ix", "on", "um"];

    let mut name = String::new();
    name.push_str(prefixes[rng.gen_range(0..prefixes.len())]);
    name.push_str(middles[rng.gen_range(0..middles.len())]);
    if rng.gen_bool(0.5) {
        name.push_str(suffixes[rng.gen_range(0..suffixes.len())]);
    }
    if rng.gen_bool(0.25) {
        name.push_str(&format!("-{}", rng.gen_range(1..999)));
    }
    name
}
