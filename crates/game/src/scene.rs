//! Render-agnostic frame snapshot.
//!
//! Positions are in view space: world position minus the camera's view
//! origin (shake included), so (0, 0) is the top-left of the viewport.
//! Background layers use their parallax factor instead and wrap around the
//! starfield.

use engine_core::{CircleCollider, Transform2D};
use glam::Vec2;
use procgen::Starfield;

use crate::coin::Coin;
use crate::enemy::Enemy;
use crate::hud::HudData;
use crate::session::Session;

/// Sprites this far outside the viewport are still emitted.
const CULL_MARGIN: f32 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Nebula,
    Planet,
    Star,
    Particle,
    Coin,
    Enemy,
    Player,
}

impl SpriteKind {
    fn glyph(self) -> Option<char> {
        match self {
            SpriteKind::Nebula => None,
            SpriteKind::Planet => Some('O'),
            SpriteKind::Star => Some('.'),
            SpriteKind::Particle => Some('\''),
            SpriteKind::Coin => Some('$'),
            SpriteKind::Enemy => Some('x'),
            SpriteKind::Player => Some('@'),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub position: Vec2,
    pub rotation: f32,
    /// Radius in world units.
    pub scale: f32,
    pub color: [f32; 4],
}

/// Everything a frontend needs to draw one frame, back to front.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Top-left of the view in world space.
    pub view_origin: Vec2,
    pub viewport: Vec2,
    pub sprites: Vec<Sprite>,
    pub hud: HudData,
}

impl Scene {
    pub fn capture(session: &Session) -> Self {
        let camera = session.camera();
        let origin = camera.view_origin(session.shake());
        let viewport = camera.viewport;
        let elapsed = session.elapsed();
        let mut sprites = Vec::new();

        background(session.starfield(), origin, viewport, elapsed, &mut sprites);

        let visible = |p: Vec2| {
            p.x >= -CULL_MARGIN
                && p.y >= -CULL_MARGIN
                && p.x <= viewport.x + CULL_MARGIN
                && p.y <= viewport.y + CULL_MARGIN
        };
        let mut push = |kind, at: Vec2, rotation, scale, color| {
            let position = at - origin;
            if visible(position) {
                sprites.push(Sprite { kind, position, rotation, scale, color });
            }
        };

        for p in session.particles().alive() {
            push(SpriteKind::Particle, p.position, 0.0, p.size, p.faded_color());
        }

        let world = session.world();
        for (_, (t, c, coin)) in world.query::<(&Transform2D, &CircleCollider, &Coin)>().iter() {
            // Coins brighten as hits land
            let mut color = coin.kind.color();
            color[3] = 0.6 + 0.4 * coin.progress();
            push(SpriteKind::Coin, t.position, elapsed * 2.0, c.radius, color);
        }
        for (_, (t, c, enemy)) in world.query::<(&Transform2D, &CircleCollider, &Enemy)>().iter() {
            push(SpriteKind::Enemy, t.position, t.rotation, c.radius, enemy.behavior.color());
        }

        let player = session.player();
        let mut color = [0.4, 0.8, 1.0, 1.0];
        if player.is_invulnerable() {
            // Blink while safe
            color[3] = if (elapsed * 10.0).sin() > 0.0 { 1.0 } else { 0.35 };
        }
        push(
            SpriteKind::Player,
            player.position(),
            player.transform.rotation,
            player.collider.radius,
            color,
        );

        Self {
            view_origin: origin,
            viewport,
            sprites,
            hud: HudData::gather(session),
        }
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }

    /// Coarse text rendering: `cols` × `rows` cells, later sprites on top,
    /// followed by the HUD status line, toasts and banner.
    pub fn ascii(&self, cols: usize, rows: usize) -> String {
        let mut grid = vec![vec![' '; cols]; rows];
        if cols > 0 && rows > 0 && self.viewport.x > 0.0 && self.viewport.y > 0.0 {
            for sprite in &self.sprites {
                let Some(glyph) = sprite.kind.glyph() else {
                    continue;
                };
                let cx = sprite.position.x / self.viewport.x * cols as f32;
                let cy = sprite.position.y / self.viewport.y * rows as f32;
                if cx < 0.0 || cy < 0.0 {
                    continue;
                }
                let (cx, cy) = (cx as usize, cy as usize);
                if cx < cols && cy < rows {
                    grid[cy][cx] = glyph;
                }
            }
        }

        let mut out = String::with_capacity((cols + 1) * (rows + 4));
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out.push_str(&self.hud.status_line());
        out.push('\n');
        for toast in &self.hud.toasts {
            out.push_str("  > ");
            out.push_str(&toast.text);
            out.push('\n');
        }
        if let Some(banner) = self.hud.banner {
            out.push_str("*** ");
            out.push_str(banner);
            if let Some(subtitle) = self.hud.subtitle {
                out.push_str(": ");
                out.push_str(subtitle);
            }
            out.push_str(" ***\n");
        }
        out
    }
}

fn background(field: &Starfield, origin: Vec2, viewport: Vec2, elapsed: f32, out: &mut Vec<Sprite>) {
    let wrap = |p: Vec2| {
        if field.size.x > 0.0 && field.size.y > 0.0 {
            Vec2::new(p.x.rem_euclid(field.size.x), p.y.rem_euclid(field.size.y))
        } else {
            p
        }
    };
    let in_view = |p: Vec2, r: f32| {
        p.x >= -r && p.y >= -r && p.x <= viewport.x + r && p.y <= viewport.y + r
    };

    // Nebulae and planets sit on the farthest layer
    let far = Starfield::layer_offset(origin, 0);
    for nebula in &field.nebulae {
        let p = wrap(nebula.center + far);
        if in_view(p, nebula.radius) {
            out.push(Sprite {
                kind: SpriteKind::Nebula,
                position: p,
                rotation: 0.0,
                scale: nebula.radius,
                color: nebula.color,
            });
        }
    }
    for planet in &field.planets {
        let p = wrap(planet.center + far);
        if in_view(p, planet.radius) {
            out.push(Sprite {
                kind: SpriteKind::Planet,
                position: p,
                rotation: if planet.ringed { 0.4 } else { 0.0 },
                scale: planet.radius,
                color: planet.color,
            });
        }
    }
    for star in &field.stars {
        let p = wrap(star.position + Starfield::layer_offset(origin, star.layer));
        if in_view(p, star.size) {
            let b = star.brightness_at(elapsed);
            out.push(Sprite {
                kind: SpriteKind::Star,
                position: p,
                rotation: 0.0,
                scale: star.size,
                color: [b, b, b, 1.0],
            });
        }
    }
}
