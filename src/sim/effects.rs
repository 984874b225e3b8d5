//! Visual effect particles
//!
//! Explosions and trails are tinted, fading sprites. Debris and fire are
//! quarters of a destroyed sprite flung out under gravity and drag. None of
//! them affect gameplay, but they share the entity store and the per-frame
//! sweep with everything else.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geometry::Rect;
use super::state::{Entity, ParticleKey, ShardKey};
use super::store::EntityList;
use crate::consts::FPS;
use crate::renderer::SpriteHandle;

/// Pixel jitter applied around an explosion's centre
pub const EXPLOSION_SPREAD: i32 = 32;
/// Explosion fade counters start in `0..EXPLOSION_FADE_STEPS * 3`
pub const EXPLOSION_FADE_STEPS: i32 = FPS;
/// Trail fade scale (shorter than explosions)
pub const TRAIL_FADE_SCALE: f32 = 1.85;
/// Downward acceleration on debris and fire, per frame
pub const SHARD_GRAVITY: f32 = 0.25;
/// Horizontal drag on debris and fire, per frame
pub const SHARD_DRAG: f32 = 0.35;
pub const SHARD_LIFE: i32 = FPS * 2;

/// Symmetric jitter in `-(n - 1)..=(n - 1)`, weighted toward zero
fn spread(rng: &mut Pcg32, n: i32) -> i32 {
    rng.random_range(0..n) - rng.random_range(0..n)
}

/// RGB colour modulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fire palette: red, orange, yellow, white
    pub fn flame(roll: u32) -> Self {
        match roll % 4 {
            0 => Tint::new(255, 0, 0),
            1 => Tint::new(255, 128, 0),
            2 => Tint::new(255, 255, 0),
            _ => Tint::new(255, 255, 255),
        }
    }
}

/// A fading, tinted sprite (explosions, engine trails)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: Tint,
    /// Fade counter, doubles as draw alpha
    pub alpha: i32,
}

impl Particle {
    /// Move and fade one frame. Returns true once fully faded.
    ///
    /// Positive `vel.y` drifts upward.
    pub fn advance(&mut self) -> bool {
        self.pos.x += self.vel.x;
        self.pos.y -= self.vel.y;
        self.alpha -= 1;
        self.alpha <= 0
    }

    /// Alpha for blending, saturated to a byte
    pub fn draw_alpha(&self) -> u8 {
        self.alpha.clamp(0, 255) as u8
    }
}

/// A quarter of a destroyed sprite (debris, fire)
#[derive(Debug, Clone, PartialEq)]
pub struct Shard {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sub-rectangle of `sprite` to draw
    pub region: Rect,
    pub sprite: SpriteHandle,
    /// Remaining frames
    pub life: i32,
}

impl Shard {
    /// Move one frame under gravity and drag. Returns true when expired.
    pub fn advance(&mut self) -> bool {
        self.pos += self.vel;
        self.vel.y += SHARD_GRAVITY;
        self.vel.x -= SHARD_DRAG;
        self.life -= 1;
        self.life <= 0
    }
}

/// The four effect collections
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub explosions: EntityList<ParticleKey, Particle>,
    pub debris: EntityList<ShardKey, Shard>,
    pub trails: EntityList<ParticleKey, Particle>,
    pub fire: EntityList<ShardKey, Shard>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.explosions.clear();
        self.debris.clear();
        self.trails.clear();
        self.fire.clear();
    }

    /// Total live effect particles
    pub fn len(&self) -> usize {
        self.explosions.len() + self.debris.len() + self.trails.len() + self.fire.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Burst of `count` explosion particles jittered around `center`
    pub fn add_explosions(&mut self, rng: &mut Pcg32, center: Vec2, count: u32) {
        for _ in 0..count {
            let jitter = Vec2::new(
                spread(rng, EXPLOSION_SPREAD) as f32,
                spread(rng, EXPLOSION_SPREAD) as f32,
            );
            let vel = Vec2::new(
                spread(rng, 10) as f32 / 10.0,
                spread(rng, 10) as f32 / 10.0,
            );
            let tint = Tint::flame(rng.random_range(0..4));
            let alpha = rng.random_range(0..EXPLOSION_FADE_STEPS) * 3;
            self.explosions.spawn(Particle {
                pos: center + jitter,
                vel,
                tint,
                alpha,
            });
        }
    }

    /// One engine-trail particle at `at`
    pub fn add_trail(&mut self, rng: &mut Pcg32, at: Vec2) {
        let vel = Vec2::new(0.0, spread(rng, 5) as f32 / 5.0);
        let tint = Tint::flame(rng.random_range(0..4));
        let alpha = (rng.random_range(0..FPS) as f32 * TRAIL_FADE_SCALE) as i32;
        self.trails.spawn(Particle {
            pos: at,
            vel,
            tint,
            alpha,
        });
    }

    /// Four debris quarters of `source`'s own sprite
    pub fn add_debris(&mut self, rng: &mut Pcg32, source: &Entity) {
        let center = source.center();
        for region in Rect::quadrants(source.w, source.h) {
            let vel = Vec2::new(
                (-5 - rng.random_range(0..5)) as f32,
                (-5 - rng.random_range(0..6)) as f32,
            );
            self.debris.spawn(Shard {
                pos: center,
                vel,
                region,
                sprite: source.sprite,
                life: SHARD_LIFE,
            });
        }
    }

    /// Four fire quarters shaped like `source`, drawn from the fire texture
    pub fn add_fire(&mut self, rng: &mut Pcg32, source: &Entity, fire: SpriteHandle) {
        let center = source.center();
        for region in Rect::quadrants(source.w, source.h) {
            let vel = Vec2::new(
                (-5 - rng.random_range(0..5)) as f32,
                -(5 + rng.random_range(0..16)) as f32,
            );
            self.fire.spawn(Shard {
                pos: center,
                vel,
                region,
                sprite: fire,
                life: SHARD_LIFE,
            });
        }
    }

    pub fn advance_explosions(&mut self) -> usize {
        self.explosions.sweep(|_, p| p.advance())
    }

    pub fn advance_debris(&mut self) -> usize {
        self.debris.sweep(|_, d| d.advance())
    }

    pub fn advance_trails(&mut self) -> usize {
        self.trails.sweep(|_, t| t.advance())
    }

    pub fn advance_fire(&mut self) -> usize {
        self.fire.sweep(|_, f| f.advance())
    }

    /// Advance all four collections in frame order
    pub fn advance(&mut self) {
        self.advance_explosions();
        self.advance_debris();
        self.advance_trails();
        self.advance_fire();
    }
}
