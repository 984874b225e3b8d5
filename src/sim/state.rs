//! Stage state and core simulation types
//!
//! [`Stage`] is the whole simulation context: the seven entity
//! collections, the player alias, timers, score and the seeded RNG. Every
//! system takes it by `&mut`; nothing lives in statics.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use super::backdrop::Backdrop;
use super::effects::Effects;
use super::geometry::Rect;
use super::hud::{Hud, health_tint};
use super::store::EntityList;
use crate::audio::{Channel, SoundEffect};
use crate::renderer::{Sprite, SpriteHandle, StageSprites};
use crate::tuning::Tuning;

new_key_type! {
    /// Slot in the fighters collection (player and enemies)
    pub struct FighterKey;
    pub struct BulletKey;
    pub struct OrbKey;
    /// Slot in the explosion or trail collection
    pub struct ParticleKey;
    /// Slot in the debris or fire collection
    pub struct ShardKey;
}

/// Allegiance; bullets only hurt the opposite side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Fighters, bullets and points-orbs share this shape
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub w: i32,
    pub h: i32,
    /// Hit points for fighters, lifetime for orbs; <= 0 means dead
    pub health: i32,
    /// Frames until the next shot
    pub reload: i32,
    pub side: Side,
    pub sprite: SpriteHandle,
}

impl Entity {
    pub fn new(side: Side, sprite: SpriteHandle, size: (i32, i32), pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            w: size.0,
            h: size.1,
            health: 1,
            reload: 0,
            side,
            sprite,
        }
    }

    /// Entity sized from a loaded sprite
    pub fn from_sprite(side: Side, sprite: Sprite, pos: Vec2) -> Self {
        Self::new(side, sprite.handle, sprite.size(), pos)
    }

    /// Swap art, taking on the new hit box size
    pub fn set_sprite(&mut self, sprite: Sprite) {
        self.sprite = sprite.handle;
        (self.w, self.h) = sprite.size();
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.w as f32 / 2.0, self.h as f32 / 2.0)
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.rect().overlaps(&other.rect())
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Macro state of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePhase {
    /// Player alive
    Active,
    /// Player gone, counting down to the end of the episode
    GameOver { remaining: i32 },
    /// Episode over and reported; the stage no longer advances
    Ended,
}

/// Outward signals produced by a tick, drained by the scene layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    Sound {
        effect: SoundEffect,
        channel: Channel,
    },
    /// The player's fighter was freed by the death sweep
    PlayerDied,
    /// Reset countdown elapsed; carries the final score
    EpisodeEnded { score: u32 },
}

impl StageEvent {
    pub fn sound(effect: SoundEffect, channel: Channel) -> Self {
        StageEvent::Sound { effect, channel }
    }
}

/// Complete stage state
#[derive(Debug, Clone)]
pub struct Stage {
    pub tuning: Tuning,
    pub sprites: StageSprites,
    pub fighters: EntityList<FighterKey, Entity>,
    pub bullets: EntityList<BulletKey, Entity>,
    pub orbs: EntityList<OrbKey, Entity>,
    pub effects: Effects,
    /// Non-owning alias into `fighters`; only the fighter sweep frees it
    pub player: Option<FighterKey>,
    pub score: u32,
    /// Best score known to the leaderboard, for the HUD
    pub best_score: u32,
    pub enemy_spawn_timer: i32,
    pub phase: StagePhase,
    /// Logical frame counter, advanced once per tick
    pub frame: u64,
    pub backdrop: Backdrop,
    pub rng: Pcg32,
    pub(crate) events: Vec<StageEvent>,
}

impl Stage {
    /// Create a stage with a fresh player
    pub fn new(tuning: Tuning, sprites: StageSprites) -> Self {
        let mut rng = Pcg32::seed_from_u64(tuning.seed);
        let backdrop = Backdrop::new(&mut rng);
        let mut stage = Self {
            tuning,
            sprites,
            fighters: EntityList::new(),
            bullets: EntityList::new(),
            orbs: EntityList::new(),
            effects: Effects::new(),
            player: None,
            score: 0,
            best_score: 0,
            enemy_spawn_timer: 0,
            phase: StagePhase::Active,
            frame: 0,
            backdrop,
            rng,
            events: Vec::new(),
        };
        stage.reset();
        stage
    }

    /// Drain every collection and start over with a fresh player.
    ///
    /// The RNG stream continues, so consecutive episodes differ.
    pub fn reset(&mut self) {
        log::info!("Resetting stage");

        self.fighters.clear();
        self.bullets.clear();
        self.orbs.clear();
        self.effects.clear();
        self.events.clear();

        let mut player =
            Entity::from_sprite(Side::Player, self.sprites.player, self.tuning.player_start);
        player.health = self.tuning.player_health;
        self.player = Some(self.fighters.spawn(player));

        self.score = 0;
        self.enemy_spawn_timer = 0;
        self.phase = StagePhase::Active;
        self.frame = 0;
    }

    /// The live player fighter, if any
    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|key| self.fighters.get(key))
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.player.and_then(|key| self.fighters.get_mut(key))
    }

    pub fn player_alive(&self) -> bool {
        self.player().is_some()
    }

    pub fn is_ended(&self) -> bool {
        self.phase == StagePhase::Ended
    }

    /// Number of enemy fighters currently alive in the collection
    pub fn enemy_count(&self) -> usize {
        self.fighters
            .iter()
            .filter(|&(key, _)| Some(key) != self.player)
            .count()
    }

    pub fn set_best_score(&mut self, best: u32) {
        self.best_score = best;
    }

    pub(crate) fn emit(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot for HUD collaborators
    pub fn hud(&self) -> Hud {
        let health = self.player().map_or(0, |p| p.health.max(0));
        Hud {
            score: self.score,
            health,
            health_tint: health_tint(health),
            best_score: self.best_score.max(self.score),
        }
    }
}
