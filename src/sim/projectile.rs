//! Bullet advancement and culling

use super::combat::Combat;
use super::state::{Entity, Stage};
use crate::consts::{PLAYFIELD_HEIGHT, SCREEN_WIDTH};

/// True once a bullet has fully left the playfield
pub fn off_screen(bullet: &Entity) -> bool {
    bullet.pos.x < -bullet.w as f32
        || bullet.pos.y < -bullet.h as f32
        || bullet.pos.x > SCREEN_WIDTH as f32
        || bullet.pos.y > PLAYFIELD_HEIGHT as f32
}

/// Move every bullet, resolve hits, and free spent or escaped bullets.
///
/// Returns the number of hits registered this frame.
pub fn advance_bullets(stage: &mut Stage) -> usize {
    let (mut combat, bullets) = Combat::split(stage);
    let mut hits = 0;

    bullets.sweep(|_, bullet| {
        bullet.pos += bullet.vel;
        let hit = combat.resolve_bullet(bullet);
        if let Some(hit) = hit {
            hits += 1;
            if hit.fatal {
                log::debug!("{:?} destroyed (player: {})", hit.target, hit.on_player);
            }
        }
        hit.is_some() || off_screen(bullet)
    });

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Channel, SoundEffect};
    use crate::sim::state::{Side, StageEvent};
    use crate::testing::{spawn_enemy_at, test_stage};
    use glam::Vec2;

    fn fire(stage: &mut Stage, side: Side, pos: Vec2, vel: Vec2) {
        let sprite = stage.sprites.player_bullet;
        let mut bullet = Entity::from_sprite(side, sprite, pos);
        bullet.vel = vel;
        stage.bullets.spawn(bullet);
    }

    #[test]
    fn test_bullet_moves() {
        let mut stage = test_stage(1);
        fire(&mut stage, Side::Player, Vec2::new(600.0, 100.0), Vec2::new(8.0, 0.0));
        assert_eq!(advance_bullets(&mut stage), 0);
        let bullet = stage.bullets.values().next().unwrap();
        assert_eq!(bullet.pos, Vec2::new(608.0, 100.0));
    }

    #[test]
    fn test_culls_off_screen_bullets() {
        let mut stage = test_stage(1);
        fire(&mut stage, Side::Player, Vec2::new(1020.0, 100.0), Vec2::new(8.0, 0.0));
        fire(&mut stage, Side::Enemy, Vec2::new(600.0, 765.0), Vec2::new(0.0, 18.0));
        fire(&mut stage, Side::Enemy, Vec2::new(-10.0, 100.0), Vec2::new(-18.0, 0.0));
        fire(&mut stage, Side::Enemy, Vec2::new(600.0, -10.0), Vec2::new(0.0, -18.0));
        fire(&mut stage, Side::Player, Vec2::new(600.0, 300.0), Vec2::new(8.0, 0.0));

        advance_bullets(&mut stage);
        assert_eq!(stage.bullets.len(), 1);
        assert_eq!(stage.bullets.check_links(), Ok(()));
    }

    #[test]
    fn test_hit_removes_bullet_and_damages_target() {
        let mut stage = test_stage(1);
        let enemy = spawn_enemy_at(&mut stage, Vec2::new(500.0, 300.0));
        fire(&mut stage, Side::Player, Vec2::new(497.0, 305.0), Vec2::new(8.0, 0.0));

        assert_eq!(advance_bullets(&mut stage), 1);
        assert!(stage.bullets.is_empty());
        assert_eq!(stage.fighters.get(enemy).unwrap().health, 0);
        assert_eq!(stage.score, 1);
        assert_eq!(stage.effects.explosions.len(), 32);
    }

    #[test]
    fn test_two_bullets_one_enemy_single_kill() {
        let mut stage = test_stage(1);
        spawn_enemy_at(&mut stage, Vec2::new(500.0, 300.0));
        fire(&mut stage, Side::Player, Vec2::new(497.0, 305.0), Vec2::new(8.0, 0.0));
        fire(&mut stage, Side::Player, Vec2::new(497.0, 306.0), Vec2::new(8.0, 0.0));

        // Both bullets spend themselves on the wreck; only the kill scores
        assert_eq!(advance_bullets(&mut stage), 2);
        assert_eq!(stage.score, 1);
        assert!(stage.bullets.is_empty());
    }

    #[test]
    fn test_dying_player_takes_every_overlapping_bullet() {
        let mut stage = test_stage(1);
        stage.player_mut().unwrap().health = 1;
        let at = stage.player().unwrap().pos;
        fire(&mut stage, Side::Enemy, at, Vec2::ZERO);
        fire(&mut stage, Side::Enemy, at, Vec2::ZERO);

        assert_eq!(advance_bullets(&mut stage), 2);
        assert!(stage.bullets.is_empty());
        assert_eq!(stage.player().unwrap().health, -1);
        let deaths = stage
            .drain_events()
            .into_iter()
            .filter(|e| *e == StageEvent::sound(SoundEffect::PlayerDie, Channel::Player))
            .count();
        assert_eq!(deaths, 2);
    }
}
