//! Sound effect identifiers and the audio collaborator contract
//!
//! The simulation never touches an audio device. It queues sound events and
//! the scene layer forwards them to whatever implements [`Audio`].

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player cannon shot
    PlayerFire,
    /// Enemy aimed shot
    EnemyFire,
    /// Player hit, or player rammed by an enemy
    PlayerDie,
    /// Enemy destroyed by a player bullet
    EnemyDie,
    /// Points-orb collected
    Points,
}

/// Mixer channel a sound is routed to. A dedicated channel cuts off its
/// previous sound; `Any` picks a free one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Any,
    Player,
    EnemyFire,
    Points,
}

/// Fire-and-forget sound playback
pub trait Audio {
    fn play(&mut self, effect: SoundEffect, channel: Channel);
}

/// Audio sink that drops everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl Audio for SilentAudio {
    fn play(&mut self, effect: SoundEffect, channel: Channel) {
        log::trace!("muted {:?} on {:?}", effect, channel);
    }
}
