//! Fixed timestep simulation tick
//!
//! One call advances the stage by exactly one logical frame, running every
//! system in a fixed order.

use super::bounds::{check_player_enemy_collisions, clip_enemies, clip_player};
use super::enemy::{enemies_fire, spawn_enemies, weave_velocity};
use super::orbs::advance_orbs;
use super::player::control_player;
use super::projectile::advance_bullets;
use super::state::{Stage, StageEvent, StagePhase};
use crate::platform::{Key, KeyState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    /// Sample the held keys once, before the update runs
    pub fn from_keys(keys: &impl KeyState) -> Self {
        Self {
            up: keys.is_key_held(Key::Up),
            down: keys.is_key_held(Key::Down),
            left: keys.is_key_held(Key::Left),
            right: keys.is_key_held(Key::Right),
            fire: keys.is_key_held(Key::Fire),
        }
    }
}

/// Advance the stage by one frame
pub fn tick(stage: &mut Stage, input: &TickInput) {
    if stage.is_ended() {
        return;
    }

    stage.frame += 1;
    stage.backdrop.advance();

    control_player(stage, input);
    enemies_fire(stage);
    advance_fighters(stage);
    advance_orbs(stage);
    advance_bullets(stage);

    // Cosmetic particles, back to front
    stage.effects.advance_explosions();
    stage.effects.advance_debris();
    stage.effects.advance_trails();
    stage.effects.advance_fire();

    spawn_enemies(stage);
    clip_player(stage);
    clip_enemies(stage);
    check_player_enemy_collisions(stage);

    update_phase(stage);
}

/// Move fighters, free the dead, and apply the formation weave to survivors.
///
/// This sweep is the only place the player's fighter is freed; the alias is
/// cleared here and the stage drops into its game over countdown.
fn advance_fighters(stage: &mut Stage) {
    let weave = weave_velocity(
        stage.frame,
        stage.tuning.weave_rate,
        stage.tuning.weave_amplitude,
    );
    let player = stage.player;
    let mut player_freed = false;

    let freed = stage.fighters.sweep(|key, e| {
        e.pos += e.vel;
        let is_player = Some(key) == player;

        if !is_player && e.pos.x < -e.w as f32 {
            e.health = 0;
        }
        if e.is_dead() {
            player_freed |= is_player;
            return true;
        }
        if !is_player {
            e.vel.y = weave;
        }
        false
    });

    if freed > 0 {
        log::trace!("{} fighters freed", freed);
    }

    if player_freed {
        stage.player = None;
        stage.phase = StagePhase::GameOver {
            remaining: stage.tuning.reset_delay,
        };
        stage.emit(StageEvent::PlayerDied);
        log::info!("Player destroyed with score {}", stage.score);
    }

    debug_assert!(
        stage.player.is_none_or(|key| stage.fighters.contains(key)),
        "player alias outlived its fighter"
    );
}

/// Run the game over countdown and report the end of the episode once
fn update_phase(stage: &mut Stage) {
    if let StagePhase::GameOver { remaining } = stage.phase {
        let remaining = remaining - 1;
        if remaining > 0 {
            stage.phase = StagePhase::GameOver { remaining };
            return;
        }
        stage.phase = StagePhase::Ended;
        stage.emit(StageEvent::EpisodeEnded { score: stage.score });
        log::info!("Episode ended, final score {}", stage.score);
    }
}
