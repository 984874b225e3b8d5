//! In-memory collaborators for running without a window
//!
//! Nothing is decoded or drawn. Sprites get sequential handles and the pixel
//! sizes of the shipped art, and the canvas just counts calls.

use std::collections::HashMap;

use crate::renderer::{Canvas, SpriteHandle, SpriteLibrary, TextAlign};
use crate::sim::{Rect, Tint};

/// Pixel sizes of the shipped art
const SPRITE_SIZES: &[(&str, (i32, i32))] = &[
    ("gfx/player.png", (48, 32)),
    ("gfx/enemy.png", (48, 48)),
    ("gfx/playerBullet.png", (16, 8)),
    ("gfx/enemyBullet.png", (16, 16)),
    ("gfx/explosion.png", (96, 96)),
    ("gfx/trail.png", (48, 32)),
    ("gfx/fire.png", (48, 32)),
    ("gfx/background.png", (1024, 768)),
    ("gfx/hud.png", (1024, 896)),
    ("gfx/hudeffects.png", (1024, 128)),
    ("gfx/voidfighter_title.png", (512, 256)),
];

/// Orbs and anything unlisted
const DEFAULT_SIZE: (i32, i32) = (32, 32);

#[derive(Debug, Clone, Default)]
pub struct HeadlessSprites {
    names: Vec<String>,
    handles: HashMap<String, SpriteHandle>,
}

impl HeadlessSprites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct textures loaded so far
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl SpriteLibrary for HeadlessSprites {
    fn load_sprite(&mut self, name: &str) -> SpriteHandle {
        if let Some(&handle) = self.handles.get(name) {
            return handle;
        }
        let handle = SpriteHandle(self.names.len() as u32);
        self.names.push(name.to_string());
        self.handles.insert(name.to_string(), handle);
        log::debug!("Registered {} as {:?}", name, handle);
        handle
    }

    fn sprite_size(&self, sprite: SpriteHandle) -> (i32, i32) {
        self.names
            .get(sprite.0 as usize)
            .and_then(|name| SPRITE_SIZES.iter().find(|(n, _)| n == name))
            .map_or(DEFAULT_SIZE, |&(_, size)| size)
    }
}

/// Canvas that counts what would have been drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawTally {
    pub sprites: usize,
    pub lines: usize,
    pub rects: usize,
    pub texts: usize,
}

impl DrawTally {
    pub fn total(&self) -> usize {
        self.sprites + self.lines + self.rects + self.texts
    }
}

impl Canvas for DrawTally {
    fn draw_sprite(&mut self, _sprite: SpriteHandle, _x: i32, _y: i32) {
        self.sprites += 1;
    }

    fn draw_sprite_region(&mut self, _sprite: SpriteHandle, _region: Rect, _x: i32, _y: i32) {
        self.sprites += 1;
    }

    fn draw_sprite_tinted(
        &mut self,
        _sprite: SpriteHandle,
        _tint: Tint,
        _alpha: u8,
        _x: i32,
        _y: i32,
    ) {
        self.sprites += 1;
    }

    fn draw_line(&mut self, _from: (i32, i32), _to: (i32, i32), _color: Tint) {
        self.lines += 1;
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Tint) {
        self.rects += 1;
    }

    fn draw_text(&mut self, _x: i32, _y: i32, _color: Tint, _align: TextAlign, _text: &str) {
        self.texts += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::StageSprites;

    #[test]
    fn test_handles_are_stable_per_name() {
        let mut lib = HeadlessSprites::new();
        let a = lib.load_sprite("gfx/player.png");
        let b = lib.load_sprite("gfx/enemy.png");
        assert_ne!(a, b);
        assert_eq!(lib.load_sprite("gfx/player.png"), a);
        assert_eq!(lib.len(), 2);
        assert_eq!(lib.sprite_size(a), (48, 32));
        assert_eq!(lib.sprite_size(SpriteHandle(99)), DEFAULT_SIZE);
    }

    #[test]
    fn test_stage_sprites_get_distinct_handles() {
        let mut lib = HeadlessSprites::new();
        let sprites = StageSprites::load(&mut lib);
        // 12 named textures plus 10 orb tiers
        assert_eq!(lib.len(), 22);
        assert_eq!(sprites.orb_tier(3).size(), DEFAULT_SIZE);
        assert_eq!(sprites.hud.size(), (1024, 896));
    }
}
