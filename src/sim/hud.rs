//! HUD snapshot: what the score/health strip shows this frame

use super::effects::Tint;

/// Read-only view handed to HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    /// Player health, 0 once the player is gone
    pub health: i32,
    pub health_tint: Tint,
    pub best_score: u32,
}

/// Health readout colour, white at full health fading through red to black.
/// First row whose threshold the health reaches wins.
const HEALTH_TINTS: [(i32, Tint); 11] = [
    (25, Tint::new(255, 255, 255)),
    (21, Tint::new(255, 223, 225)),
    (16, Tint::new(255, 170, 174)),
    (11, Tint::new(255, 117, 124)),
    (6, Tint::new(255, 64, 73)),
    (5, Tint::new(237, 28, 36)),
    (4, Tint::new(197, 16, 26)),
    (3, Tint::new(148, 12, 18)),
    (2, Tint::new(99, 7, 12)),
    (1, Tint::new(50, 3, 5)),
    (i32::MIN, Tint::new(0, 0, 0)),
];

pub fn health_tint(health: i32) -> Tint {
    HEALTH_TINTS
        .iter()
        .find(|(threshold, _)| health >= *threshold)
        .map_or(Tint::default(), |&(_, tint)| tint)
}
