//! Voidfighter - a side-scrolling arcade shooter's simulation core
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (entities, combat, particles)
//! - `renderer`: Draw-layer ordering over a collaborator-provided canvas
//! - `scene`: Title / stage / high score state machine
//! - `audio`, `platform`: Collaborator contracts for sound and input
//! - `highscores`: Leaderboard that receives finished runs
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod sim;
pub mod tuning;

#[cfg(test)]
pub(crate) mod testing;

pub use highscores::{HighScores, ScoreRecorder};
pub use scene::{App, Scene};
pub use tuning::{RewardMode, Tuning, TuningError};

/// Screen layout constants
pub mod consts {
    /// Logical frames per second (one simulation step per frame)
    pub const FPS: i32 = 60;

    /// Full window size, HUD strip included
    pub const SCREEN_WIDTH: i32 = 1024;
    pub const HUD_HEIGHT: i32 = 128;
    pub const SCREEN_HEIGHT: i32 = 768 + HUD_HEIGHT;
    /// Area above the HUD strip where the action happens
    pub const PLAYFIELD_HEIGHT: i32 = SCREEN_HEIGHT - HUD_HEIGHT;
    pub const SCREEN_BOUNDS: i32 = 16;

    /// Inset playable rectangle (inside the HUD frame)
    pub const HUDSCREEN_X: i32 = 32;
    pub const HUDSCREEN_Y: i32 = 32;
    pub const HUDSCREEN_WIDTH: i32 = 928;
    pub const HUDSCREEN_HEIGHT: i32 = 672;

    /// The player may not cross the middle of the screen
    pub const PLAYER_MAX_X: i32 = SCREEN_WIDTH / 2 - SCREEN_BOUNDS * 4;

    /// Cell size of the bitmap font
    pub const GLYPH_WIDTH: i32 = 18;
    pub const GLYPH_HEIGHT: i32 = 28;

    /// HUD text anchors
    pub const HUD_TEXT_X: i32 = 10;
    pub const HUD_HEALTH_Y: i32 = SCREEN_HEIGHT - 35;
    pub const HUD_SCORE_Y: i32 = SCREEN_HEIGHT - 75;
    pub const HUD_HIGHSCORE_Y: i32 = SCREEN_HEIGHT - 115;
}

/// Convert seconds to a frame count at the fixed logical rate
#[inline]
pub const fn seconds_to_frames(seconds: i32) -> i32 {
    seconds * consts::FPS
}
