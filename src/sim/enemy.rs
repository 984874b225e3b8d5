//! Enemy AI and spawner

use glam::Vec2;
use rand::Rng;

use super::geometry::direction;
use super::state::{Entity, Side, Stage, StageEvent};
use crate::audio::{Channel, SoundEffect};
use crate::consts::{FPS, HUDSCREEN_HEIGHT, HUDSCREEN_WIDTH};

/// Vertical weave speed shared by every enemy at logical frame `frame`
pub fn weave_velocity(frame: u64, rate: f32, amplitude: f32) -> f32 {
    ((frame as f64 * rate as f64).sin() as f32) * amplitude
}

/// Tick every enemy's reload and fire aimed shots at the player.
///
/// Reloads keep counting down while the player is gone, but nobody fires.
pub fn enemies_fire(stage: &mut Stage) {
    let Stage {
        tuning,
        sprites,
        fighters,
        bullets,
        rng,
        player,
        events,
        ..
    } = stage;

    let player_key = *player;
    let target = player_key
        .and_then(|key| fighters.get(key))
        .map(Entity::center);
    let shot = sprites.enemy_bullet;

    fighters.for_each_mut(|key, e| {
        if Some(key) == player_key {
            return;
        }
        e.reload -= 1;
        let Some(target) = target else {
            return;
        };
        if e.reload > 0 {
            return;
        }

        let origin = e.center();
        let pos = origin - Vec2::new((shot.w / 2) as f32, (shot.h / 2) as f32);
        let mut bullet = Entity::from_sprite(Side::Enemy, shot, pos);
        bullet.vel = direction(origin, target) * tuning.enemy_bullet_speed;
        bullets.spawn(bullet);

        events.push(StageEvent::sound(SoundEffect::EnemyFire, Channel::EnemyFire));
        e.reload = tuning.enemy_rearm_step * rng.random_range(0..tuning.enemy_rearm_steps);
    });
}

/// Count down the shared spawn timer and bring in one enemy when it runs out
pub fn spawn_enemies(stage: &mut Stage) {
    stage.enemy_spawn_timer -= 1;
    if stage.enemy_spawn_timer > 0 {
        return;
    }

    let tuning = &stage.tuning;
    let rng = &mut stage.rng;

    let y = rng.random_range(0..HUDSCREEN_HEIGHT);
    let mut enemy = Entity::from_sprite(
        Side::Enemy,
        stage.sprites.enemy,
        Vec2::new(HUDSCREEN_WIDTH as f32, y as f32),
    );
    let speed = tuning.enemy_min_speed + rng.random_range(0..tuning.enemy_speed_steps);
    enemy.vel = Vec2::new(
        -speed as f32,
        rng.random_range(-100..100) as f32 / 100.0,
    );
    enemy.health = 1;
    enemy.reload = FPS * (1 + rng.random_range(0..tuning.enemy_reload_seconds));

    stage.enemy_spawn_timer = tuning.spawn_base + rng.random_range(0..tuning.spawn_jitter);
    log::debug!(
        "enemy spawned at y={} speed={} next in {}",
        y,
        speed,
        stage.enemy_spawn_timer
    );
    stage.fighters.spawn(enemy);
}
