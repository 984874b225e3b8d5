//! Shared fixtures and recording collaborators for unit tests

use glam::Vec2;

use crate::audio::{Audio, Channel, SoundEffect};
use crate::highscores::ScoreRecorder;
use crate::platform::HeadlessSprites;
use crate::renderer::{Canvas, SpriteHandle, StageSprites, TextAlign};
use crate::sim::{Entity, FighterKey, Rect, Side, Stage, Tint};
use crate::tuning::Tuning;

pub(crate) fn test_sprites() -> StageSprites {
    StageSprites::load(&mut HeadlessSprites::new())
}

pub(crate) fn test_stage(seed: u64) -> Stage {
    Stage::new(Tuning::default().with_seed(seed), test_sprites())
}

pub(crate) fn test_stage_with(configure: impl FnOnce(&mut Tuning)) -> Stage {
    let mut tuning = Tuning::default();
    configure(&mut tuning);
    Stage::new(tuning, test_sprites())
}

/// One-hit enemy that will not fire during a test
pub(crate) fn spawn_enemy_at(stage: &mut Stage, pos: Vec2) -> FighterKey {
    let mut enemy = Entity::from_sprite(Side::Enemy, stage.sprites.enemy, pos);
    enemy.reload = 1000;
    stage.fighters.spawn(enemy)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DrawCall {
    Sprite {
        sprite: SpriteHandle,
        x: i32,
        y: i32,
    },
    Region {
        sprite: SpriteHandle,
        region: Rect,
        x: i32,
        y: i32,
    },
    Tinted {
        sprite: SpriteHandle,
        tint: Tint,
        alpha: u8,
        x: i32,
        y: i32,
    },
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Tint,
    },
    Fill {
        rect: Rect,
        color: Tint,
    },
    Text {
        x: i32,
        y: i32,
        color: Tint,
        align: TextAlign,
        text: String,
    },
}

#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_sprite(&mut self, sprite: SpriteHandle, x: i32, y: i32) {
        self.calls.push(DrawCall::Sprite { sprite, x, y });
    }

    fn draw_sprite_region(&mut self, sprite: SpriteHandle, region: Rect, x: i32, y: i32) {
        self.calls.push(DrawCall::Region { sprite, region, x, y });
    }

    fn draw_sprite_tinted(&mut self, sprite: SpriteHandle, tint: Tint, alpha: u8, x: i32, y: i32) {
        self.calls.push(DrawCall::Tinted {
            sprite,
            tint,
            alpha,
            x,
            y,
        });
    }

    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Tint) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Tint) {
        self.calls.push(DrawCall::Fill { rect, color });
    }

    fn draw_text(&mut self, x: i32, y: i32, color: Tint, align: TextAlign, text: &str) {
        self.calls.push(DrawCall::Text {
            x,
            y,
            color,
            align,
            text: text.to_string(),
        });
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingAudio {
    pub played: Vec<(SoundEffect, Channel)>,
}

impl Audio for RecordingAudio {
    fn play(&mut self, effect: SoundEffect, channel: Channel) {
        self.played.push((effect, channel));
    }
}

#[derive(Debug, Default)]
pub(crate) struct CountingRecorder {
    pub scores: Vec<u32>,
}

impl ScoreRecorder for CountingRecorder {
    fn record_score(&mut self, score: u32) {
        self.scores.push(score);
    }
}
