//! Playfield boundaries and player-enemy rams

use super::state::{Entity, Stage, StageEvent};
use crate::audio::{Channel, SoundEffect};
use crate::consts::{HUDSCREEN_HEIGHT, HUDSCREEN_WIDTH, HUDSCREEN_X, HUDSCREEN_Y, PLAYER_MAX_X};

/// Clamp a player position into the left half of the inset playfield
pub fn clip_player_entity(player: &mut Entity) {
    player.pos.x = player.pos.x.clamp(HUDSCREEN_X as f32, PLAYER_MAX_X as f32);
    player.pos.y = player
        .pos
        .y
        .clamp(HUDSCREEN_Y as f32, HUDSCREEN_HEIGHT as f32);
}

pub fn clip_player(stage: &mut Stage) {
    if let Some(player) = stage.player_mut() {
        clip_player_entity(player);
    }
}

/// Keep enemies on screen vertically and on the right. Crossing the left
/// edge is how an enemy leaves play, so that side is a kill line.
pub fn clip_enemies(stage: &mut Stage) {
    let player = stage.player;
    stage.fighters.for_each_mut(|key, e| {
        if Some(key) == player {
            return;
        }
        if e.pos.x < HUDSCREEN_X as f32 {
            e.health = 0;
        }
        e.pos.y = e.pos.y.clamp(HUDSCREEN_Y as f32, HUDSCREEN_HEIGHT as f32);
        e.pos.x = e.pos.x.min(HUDSCREEN_WIDTH as f32);
    });
}

/// Any enemy touching the player destroys both. Every ram gets the full
/// explosion burst; the death sound plays once per frame at most.
///
/// Returns the number of enemies that rammed the player.
pub fn check_player_enemy_collisions(stage: &mut Stage) -> usize {
    let Stage {
        tuning,
        fighters,
        effects,
        rng,
        player,
        events,
        ..
    } = stage;

    let Some(player_key) = *player else {
        return 0;
    };
    let Some(player_rect) = fighters.get(player_key).map(Entity::rect) else {
        return 0;
    };

    let mut rams = 0;
    fighters.for_each_mut(|key, e| {
        if key == player_key || !e.rect().overlaps(&player_rect) {
            return;
        }
        e.health = 0;
        rams += 1;
        let center = e.center();
        for _ in 0..tuning.ram_waves {
            effects.add_explosions(rng, center, tuning.ram_particles);
        }
    });

    if rams > 0 {
        if let Some(p) = fighters.get_mut(player_key) {
            p.health = 0;
        }
        events.push(StageEvent::sound(SoundEffect::PlayerDie, Channel::Any));
        log::info!("player rammed by {} enemies", rams);
    }
    rams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spawn_enemy_at, test_stage};
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_enemy_leaving_left_dies() {
        let mut stage = test_stage(1);
        let gone = spawn_enemy_at(&mut stage, Vec2::new(31.0, 300.0));
        let kept = spawn_enemy_at(&mut stage, Vec2::new(32.0, 300.0));
        clip_enemies(&mut stage);
        assert_eq!(stage.fighters.get(gone).unwrap().health, 0);
        assert_eq!(stage.fighters.get(kept).unwrap().health, 1);
    }

    #[test]
    fn test_enemy_clamped_top_bottom_right() {
        let mut stage = test_stage(1);
        let high = spawn_enemy_at(&mut stage, Vec2::new(990.0, 0.0));
        let low = spawn_enemy_at(&mut stage, Vec2::new(500.0, 700.0));
        clip_enemies(&mut stage);

        let high = stage.fighters.get(high).unwrap();
        assert_eq!(high.pos, Vec2::new(HUDSCREEN_WIDTH as f32, HUDSCREEN_Y as f32));
        let low = stage.fighters.get(low).unwrap();
        assert_eq!(low.pos.y, HUDSCREEN_HEIGHT as f32);
    }

    #[test]
    fn test_clip_enemies_skips_player() {
        let mut stage = test_stage(1);
        stage.player_mut().unwrap().pos.x = 0.0;
        clip_enemies(&mut stage);
        assert_eq!(stage.player().unwrap().health, 25);
    }

    #[test]
    fn test_ram_destroys_both_with_one_sound() {
        let mut stage = test_stage(1);
        let at = stage.player().unwrap().pos;
        let a = spawn_enemy_at(&mut stage, at);
        let b = spawn_enemy_at(&mut stage, at + Vec2::new(4.0, 4.0));

        assert_eq!(check_player_enemy_collisions(&mut stage), 2);
        assert_eq!(stage.player().unwrap().health, 0);
        assert_eq!(stage.fighters.get(a).unwrap().health, 0);
        assert_eq!(stage.fighters.get(b).unwrap().health, 0);
        assert_eq!(stage.effects.explosions.len(), 2 * 77 * 4);
        assert_eq!(
            stage.drain_events(),
            vec![StageEvent::sound(SoundEffect::PlayerDie, Channel::Any)]
        );
    }

    #[test]
    fn test_no_ram_without_overlap() {
        let mut stage = test_stage(1);
        spawn_enemy_at(&mut stage, Vec2::new(800.0, 100.0));
        assert_eq!(check_player_enemy_collisions(&mut stage), 0);
        assert_eq!(stage.player().unwrap().health, 25);
        assert!(stage.drain_events().is_empty());
    }

    proptest! {
        #[test]
        fn prop_player_clamp_holds(
            x in -5000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            vx in -6.5f32..6.5,
            vy in -4.0f32..4.0,
        ) {
            let mut stage = test_stage(1);
            let p = stage.player_mut().unwrap();
            p.pos = Vec2::new(x, y) + Vec2::new(vx, vy);
            clip_player(&mut stage);

            let p = stage.player().unwrap();
            prop_assert!((HUDSCREEN_X as f32..=PLAYER_MAX_X as f32).contains(&p.pos.x));
            prop_assert!((HUDSCREEN_Y as f32..=HUDSCREEN_HEIGHT as f32).contains(&p.pos.y));
        }
    }
}
