//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. The
//! defaults are the shipped balance; a JSON document may override any
//! subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::FPS;
use crate::seconds_to_frames;

/// What a destroyed enemy is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardMode {
    /// Instant score only
    Score,
    /// Drop a points-orb; score arrives on pickup
    Orb,
    /// Instant score and an orb
    #[default]
    ScoreAndOrb,
}

impl RewardMode {
    pub fn awards_score(self) -> bool {
        matches!(self, RewardMode::Score | RewardMode::ScoreAndOrb)
    }

    pub fn drops_orb(self) -> bool {
        matches!(self, RewardMode::Orb | RewardMode::ScoreAndOrb)
    }
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// RNG seed for the run
    pub seed: u64,
    pub reward_mode: RewardMode,
    /// Score per enemy kill when the reward mode awards score
    pub kill_reward: u32,

    // === Player ===
    pub player_health: i32,
    pub player_start: Vec2,
    /// Pixels per frame on any held direction
    pub player_speed: f32,
    /// Extra forward speed while moving right
    pub afterburner: f32,
    /// Constant leftward drift per frame (scroll pressure)
    pub pushback: f32,
    pub player_bullet_speed: f32,
    /// Frames between player shots
    pub fire_cooldown: i32,

    // === Enemies ===
    pub enemy_bullet_speed: f32,
    /// Peak vertical speed of the formation weave
    pub weave_amplitude: f32,
    /// Weave phase advance per logical frame (radians)
    pub weave_rate: f32,
    /// Slowest leftward enemy speed
    pub enemy_min_speed: i32,
    /// Number of extra speed steps above the minimum
    pub enemy_speed_steps: i32,
    /// Initial reload is `FPS * (1..=enemy_reload_seconds)`
    pub enemy_reload_seconds: i32,
    /// Re-arm delay after a shot is `rearm_step * (0..rearm_steps)`
    pub enemy_rearm_steps: i32,
    pub enemy_rearm_step: i32,
    /// Spawn countdown is `spawn_base + (0..spawn_jitter)`
    pub spawn_base: i32,
    pub spawn_jitter: i32,

    // === Effects ===
    /// Explosion particles per bullet hit
    pub hit_explosion: u32,
    pub hit_fire_bursts: u32,
    pub hit_debris_bursts: u32,
    /// Player-enemy ram: `ram_waves` bursts of `ram_particles`
    pub ram_waves: u32,
    pub ram_particles: u32,

    // === Orbs ===
    /// Orb lifetime in frames; also selects the reward tier
    pub orb_lifetime: i32,

    // === Stage ===
    /// Frames between the player's death and the end of the episode
    pub reset_delay: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0x5eed_f00d,
            reward_mode: RewardMode::default(),
            kill_reward: 1,

            player_health: 25,
            player_start: Vec2::new(100.0, 384.0),
            player_speed: 4.0,
            afterburner: 2.5,
            pushback: 1.0,
            player_bullet_speed: 8.0,
            fire_cooldown: 30,

            enemy_bullet_speed: 18.0,
            weave_amplitude: 2.0,
            // One radian every 120 ms of game time
            weave_rate: 1000.0 / FPS as f32 / 120.0,
            enemy_min_speed: 2,
            enemy_speed_steps: 4,
            enemy_reload_seconds: 3,
            enemy_rearm_steps: FPS,
            enemy_rearm_step: 2,
            spawn_base: 30,
            spawn_jitter: FPS,

            hit_explosion: 32,
            hit_fire_bursts: 3,
            hit_debris_bursts: 2,
            // ~77 frames of average human reaction time, 4 particles each
            ram_waves: 77,
            ram_particles: 4,

            orb_lifetime: seconds_to_frames(10),

            reset_delay: seconds_to_frames(3),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON override from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Tuning with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if self.player_health <= 0 {
            return invalid("player_health", "must be positive");
        }
        if !self.player_start.is_finite() {
            return invalid("player_start", "must be finite");
        }
        let speeds = [
            ("player_speed", self.player_speed),
            ("afterburner", self.afterburner),
            ("pushback", self.pushback),
            ("player_bullet_speed", self.player_bullet_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("weave_amplitude", self.weave_amplitude),
            ("weave_rate", self.weave_rate),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return invalid(field, "must be finite and non-negative");
            }
        }
        if self.fire_cooldown < 0 {
            return invalid("fire_cooldown", "must not be negative");
        }
        // Random ranges below are half-open, so their widths must be positive
        let widths = [
            ("enemy_speed_steps", self.enemy_speed_steps),
            ("enemy_reload_seconds", self.enemy_reload_seconds),
            ("enemy_rearm_steps", self.enemy_rearm_steps),
            ("spawn_jitter", self.spawn_jitter),
        ];
        for (field, value) in widths {
            if value <= 0 {
                return invalid(field, "must be positive");
            }
        }
        if self.enemy_min_speed < 0 || self.enemy_rearm_step < 0 || self.spawn_base < 0 {
            return invalid("enemy timing", "must not be negative");
        }
        if self.orb_lifetime <= 0 {
            return invalid("orb_lifetime", "must be positive");
        }
        if self.reset_delay <= 0 {
            return invalid("reset_delay", "must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().orb_lifetime, 600);
        assert_eq!(Tuning::default().reset_delay, 180);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "seed": 7, "reward_mode": "orb" }"#).unwrap();
        assert_eq!(tuning.seed, 7);
        assert_eq!(tuning.reward_mode, RewardMode::Orb);
        assert_eq!(tuning.fire_cooldown, Tuning::default().fire_cooldown);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("voidfighter-tuning-{}.json", std::process::id()));
        let json = Tuning::default().with_seed(42).to_json().unwrap();
        std::fs::write(&path, json).unwrap();

        let loaded = Tuning::load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.unwrap().seed, 42);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/nonexistent/voidfighter.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "reset_delay": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "reset_delay",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "spawn_jitter": -1 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_reward_mode_flags() {
        assert!(RewardMode::Score.awards_score() && !RewardMode::Score.drops_orb());
        assert!(!RewardMode::Orb.awards_score() && RewardMode::Orb.drops_orb());
        assert!(RewardMode::ScoreAndOrb.awards_score() && RewardMode::ScoreAndOrb.drops_orb());
    }
}
