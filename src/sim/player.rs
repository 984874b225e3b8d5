//! Player controller: held keys to velocity, trails and shots

use glam::Vec2;

use super::state::{Entity, Side, Stage, StageEvent};
use super::tick::TickInput;
use crate::audio::{Channel, SoundEffect};

/// Apply one frame of input to the player. No-op once the player is gone.
///
/// Velocity is rebuilt from scratch every frame; the pushback drift is
/// applied to the position directly so it acts even with no input.
pub fn control_player(stage: &mut Stage, input: &TickInput) {
    let Stage {
        tuning,
        sprites,
        fighters,
        bullets,
        effects,
        rng,
        player,
        events,
        ..
    } = stage;

    let Some(p) = player.and_then(|key| fighters.get_mut(key)) else {
        return;
    };

    p.vel = Vec2::ZERO;
    p.pos.x -= tuning.pushback;

    if p.reload > 0 {
        p.reload -= 1;
    }

    if input.up {
        p.vel.y = -tuning.player_speed;
    }
    if input.down {
        p.vel.y = tuning.player_speed;
    }
    if input.left {
        p.vel.x = -tuning.player_speed;
    }
    if input.right {
        p.vel.x = tuning.player_speed + tuning.afterburner;
        effects.add_trail(rng, Vec2::new(p.pos.x - 1.0, p.pos.y));
    }

    if input.fire && p.reload <= 0 {
        let shot = sprites.player_bullet;
        let nose = Vec2::new(
            p.pos.x + p.w as f32,
            p.pos.y + (p.h / 2 - shot.h / 2) as f32,
        );
        let mut bullet = Entity::from_sprite(Side::Player, shot, nose);
        bullet.vel.x = tuning.player_bullet_speed;
        bullets.spawn(bullet);

        events.push(StageEvent::sound(SoundEffect::PlayerFire, Channel::Player));
        p.reload = tuning.fire_cooldown;
        log::trace!("player fired from {:?}", nose);
    }
}
