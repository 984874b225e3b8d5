//! Rendering contracts and draw-layer ordering
//!
//! The core does not own a graphics pipeline. It walks its collections
//! back to front and issues immediate, frame-scoped calls on a [`Canvas`]
//! provided by the platform layer.

pub mod layers;
pub mod sprites;

pub use layers::{draw_high_scores, draw_name_input, draw_stage, draw_title};
pub use sprites::{Sprite, SpriteHandle, SpriteLibrary, StageSprites};

use crate::sim::Rect;
use crate::sim::effects::Tint;

/// Horizontal anchoring for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Immediate-mode drawing surface
pub trait Canvas {
    /// Draw a whole sprite with its top-left corner at `(x, y)`
    fn draw_sprite(&mut self, sprite: SpriteHandle, x: i32, y: i32);
    /// Draw the `region` sub-rectangle of a sprite at `(x, y)`
    fn draw_sprite_region(&mut self, sprite: SpriteHandle, region: Rect, x: i32, y: i32);
    /// Draw a sprite with additive blending, colour- and alpha-modulated
    fn draw_sprite_tinted(&mut self, sprite: SpriteHandle, tint: Tint, alpha: u8, x: i32, y: i32);
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Tint);
    /// Solid rectangle (text cursor)
    fn fill_rect(&mut self, rect: Rect, color: Tint);
    /// Glyph rasterization lives with the collaborator
    fn draw_text(&mut self, x: i32, y: i32, color: Tint, align: TextAlign, text: &str);
}

/// Colors for HUD and menu text
pub mod colors {
    use crate::sim::effects::Tint;

    pub const WHITE: Tint = Tint::new(255, 255, 255);
    pub const GREEN: Tint = Tint::new(0, 255, 0);
    pub const HEADLINE: Tint = Tint::new(255, 55, 255);
    pub const NAME_ENTRY: Tint = Tint::new(128, 255, 128);
    /// Highlight for the most recent leaderboard entry
    pub const RECENT: Tint = Tint::new(255, 255, 0);
}
