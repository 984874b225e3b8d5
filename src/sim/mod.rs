//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical frame per tick
//! - Seeded RNG only
//! - Stable iteration order (collection link order)
//! - No rendering, audio or platform calls; outward signals are queued events

pub mod backdrop;
pub mod bounds;
pub mod combat;
pub mod effects;
pub mod enemy;
pub mod geometry;
pub mod hud;
pub mod orbs;
pub mod player;
pub mod projectile;
pub mod state;
pub mod store;
pub mod tick;

pub use backdrop::{Backdrop, Star};
pub use combat::{Combat, Hit};
pub use effects::{Effects, Particle, Shard, Tint};
pub use geometry::{Rect, direction, overlaps};
pub use hud::Hud;
pub use state::{
    BulletKey, Entity, FighterKey, OrbKey, ParticleKey, ShardKey, Side, Stage, StageEvent,
    StagePhase,
};
pub use store::{EntityList, Link, LinkError};
pub use tick::{TickInput, tick};
