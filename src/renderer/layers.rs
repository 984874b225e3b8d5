//! Back-to-front draw passes for each scene

use super::colors;
use super::{Canvas, StageSprites, TextAlign};
use crate::consts::{
    GLYPH_HEIGHT, GLYPH_WIDTH, HUD_HEALTH_Y, HUD_HEIGHT, HUD_HIGHSCORE_Y, HUD_SCORE_Y, HUD_TEXT_X,
    SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::highscores::HighScores;
use crate::sim::backdrop::{Backdrop, STAR_LENGTH};
use crate::sim::{Hud, Rect, Stage};

/// Top edge of the title art
const TITLE_Y: i32 = 100;
const PROMPT_Y: i32 = 600;
/// Prompt blink period in frames; visible for the first half
const PROMPT_BLINK: i32 = 40;
const NAME_Y: i32 = 360;

pub fn draw_backdrop(canvas: &mut impl Canvas, sprites: &StageSprites, backdrop: &Backdrop) {
    let mut x = backdrop.offset;
    while x < SCREEN_WIDTH {
        canvas.draw_sprite(sprites.background.handle, x, 0);
        x += SCREEN_WIDTH;
    }

    for star in &backdrop.stars {
        canvas.draw_line((star.x, star.y), (star.x + STAR_LENGTH, star.y), star.tint());
    }
}

/// HUD frame plus the effects strip along the bottom
fn draw_hud_frame(canvas: &mut impl Canvas, sprites: &StageSprites) {
    canvas.draw_sprite(sprites.hud.handle, 0, 0);
    canvas.draw_sprite(sprites.hud_effects.handle, 0, SCREEN_HEIGHT - HUD_HEIGHT);
}

fn draw_hud_text(canvas: &mut impl Canvas, hud: &Hud) {
    canvas.draw_text(
        HUD_TEXT_X,
        HUD_SCORE_Y,
        colors::WHITE,
        TextAlign::Left,
        &format!("SCORE: {:03}", hud.score),
    );
    canvas.draw_text(
        HUD_TEXT_X,
        HUD_HEALTH_Y,
        hud.health_tint,
        TextAlign::Left,
        &format!("HEALTH: {:03}", hud.health),
    );
    let best_color = if hud.score > 0 {
        colors::GREEN
    } else {
        colors::WHITE
    };
    canvas.draw_text(
        HUD_TEXT_X,
        HUD_HIGHSCORE_Y,
        best_color,
        TextAlign::Left,
        &format!("HIGH SCORE: {:03}", hud.best_score),
    );
}

/// Draw a stage: background, stars, orbs, fighters, debris, explosions,
/// trails, fire, bullets, then the HUD on top
pub fn draw_stage(canvas: &mut impl Canvas, stage: &Stage) {
    let sprites = &stage.sprites;
    draw_backdrop(canvas, sprites, &stage.backdrop);

    for orb in stage.orbs.values() {
        canvas.draw_sprite(orb.sprite, orb.pos.x as i32, orb.pos.y as i32);
    }
    for fighter in stage.fighters.values() {
        canvas.draw_sprite(fighter.sprite, fighter.pos.x as i32, fighter.pos.y as i32);
    }

    let fx = &stage.effects;
    for d in fx.debris.values() {
        canvas.draw_sprite_region(d.sprite, d.region, d.pos.x as i32, d.pos.y as i32);
    }
    for e in fx.explosions.values() {
        canvas.draw_sprite_tinted(
            sprites.explosion.handle,
            e.tint,
            e.draw_alpha(),
            e.pos.x as i32,
            e.pos.y as i32,
        );
    }
    for t in fx.trails.values() {
        canvas.draw_sprite_tinted(
            sprites.trail.handle,
            t.tint,
            t.draw_alpha(),
            t.pos.x as i32,
            t.pos.y as i32,
        );
    }
    for f in fx.fire.values() {
        canvas.draw_sprite_region(f.sprite, f.region, f.pos.x as i32, f.pos.y as i32);
    }

    for b in stage.bullets.values() {
        canvas.draw_sprite(b.sprite, b.pos.x as i32, b.pos.y as i32);
    }

    canvas.draw_sprite(sprites.hud.handle, 0, 0);
    draw_hud_text(canvas, &stage.hud());
    canvas.draw_sprite(sprites.hud_effects.handle, 0, SCREEN_HEIGHT - HUD_HEIGHT);
}

/// Title art revealed `reveal` rows deep, with a blinking prompt
pub fn draw_title(
    canvas: &mut impl Canvas,
    sprites: &StageSprites,
    backdrop: &Backdrop,
    reveal: i32,
    timeout: i32,
) {
    draw_backdrop(canvas, sprites, backdrop);
    draw_hud_frame(canvas, sprites);

    let title = sprites.title;
    let region = Rect::new(0, 0, title.w, reveal.clamp(0, title.h));
    canvas.draw_sprite_region(title.handle, region, SCREEN_WIDTH / 2 - title.w / 2, TITLE_Y);

    if timeout.rem_euclid(PROMPT_BLINK) < PROMPT_BLINK / 2 {
        canvas.draw_text(
            SCREEN_WIDTH / 2,
            PROMPT_Y,
            colors::WHITE,
            TextAlign::Center,
            "PRESS FIRE TO PLAY!",
        );
    }
}

/// Leaderboard, most recent run highlighted
pub fn draw_high_scores(
    canvas: &mut impl Canvas,
    sprites: &StageSprites,
    backdrop: &Backdrop,
    table: &HighScores,
) {
    draw_backdrop(canvas, sprites, backdrop);
    draw_hud_frame(canvas, sprites);

    canvas.draw_text(450, 240, colors::HEADLINE, TextAlign::Left, "HIGHSCORES");

    let mut y = 290;
    for (i, entry) in table.entries.iter().enumerate() {
        let color = if entry.recent {
            colors::RECENT
        } else {
            colors::WHITE
        };
        canvas.draw_text(
            300,
            y,
            color,
            TextAlign::Left,
            &format!("#{}. {:<15} {:03}", i + 1, entry.name, entry.score),
        );
        y += 40;
    }

    canvas.draw_text(
        SCREEN_WIDTH / 2,
        PROMPT_Y,
        colors::WHITE,
        TextAlign::Center,
        "PRESS FIRE TO PLAY!",
    );
}

/// Name entry for a fresh leaderboard entry, with a block cursor after
/// the text while `cursor_visible`
pub fn draw_name_input(
    canvas: &mut impl Canvas,
    sprites: &StageSprites,
    backdrop: &Backdrop,
    name: &str,
    cursor_visible: bool,
) {
    draw_backdrop(canvas, sprites, backdrop);
    draw_hud_frame(canvas, sprites);

    canvas.draw_text(408, 240, colors::HEADLINE, TextAlign::Left, "NEW HIGHSCORE!");
    canvas.draw_text(392, 300, colors::WHITE, TextAlign::Left, "ENTER YOUR NAME:");
    canvas.draw_text(SCREEN_WIDTH / 2, NAME_Y, colors::NAME_ENTRY, TextAlign::Center, name);

    if cursor_visible {
        let x = SCREEN_WIDTH / 2 + name.len() as i32 * GLYPH_WIDTH / 2 + 5;
        canvas.fill_rect(Rect::new(x, NAME_Y, GLYPH_WIDTH, GLYPH_HEIGHT), colors::GREEN);
    }

    canvas.draw_text(355, 448, colors::WHITE, TextAlign::Left, "HIT ENTER WHEN DONE.");
}
