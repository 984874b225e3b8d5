//! Points-orbs dropped by destroyed enemies
//!
//! An orb bounces around the inset playfield until the player touches it
//! or its lifetime runs out. The lifetime doubles as the reward: the
//! sooner it is collected, the higher the tier.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Entity, OrbKey, Side, Stage, StageEvent};
use super::store::EntityList;
use crate::audio::{Channel, SoundEffect};
use crate::consts::{HUDSCREEN_HEIGHT, HUDSCREEN_WIDTH, HUDSCREEN_X, HUDSCREEN_Y};
use crate::renderer::{Sprite, StageSprites};

/// Lifetime above which the tier applies, highest tier first
const TIER_THRESHOLDS: [(i32, u32); 9] = [
    (540, 10),
    (480, 9),
    (420, 8),
    (360, 7),
    (300, 6),
    (240, 5),
    (180, 4),
    (120, 3),
    (60, 2),
];

/// Lifetime at or below which the orb flashes its expiring sprite
pub const EXPIRING_LIFETIME: i32 = 30;

/// Reward tier for an orb with `lifetime` frames left, in `1..=10`
pub fn reward_tier(lifetime: i32) -> u32 {
    TIER_THRESHOLDS
        .iter()
        .find(|(threshold, _)| lifetime > *threshold)
        .map_or(1, |&(_, tier)| tier)
}

/// Sprite that shows the orb's current worth
pub fn orb_sprite(sprites: &StageSprites, lifetime: i32) -> Sprite {
    if lifetime <= EXPIRING_LIFETIME {
        sprites.orb_expiring
    } else {
        sprites.orb_tier(reward_tier(lifetime))
    }
}

/// Drop an orb centred on `center`, drifting left and down
pub fn spawn_orb(
    orbs: &mut EntityList<OrbKey, Entity>,
    sprites: &StageSprites,
    lifetime: i32,
    rng: &mut Pcg32,
    center: Vec2,
) -> OrbKey {
    let sprite = orb_sprite(sprites, lifetime);
    let pos = center - Vec2::new((sprite.w / 2) as f32, (sprite.h / 2) as f32);
    let mut orb = Entity::from_sprite(Side::Enemy, sprite, pos);
    orb.vel = Vec2::new(
        -(rng.random_range(0..5) as f32),
        rng.random_range(0..5) as f32,
    );
    orb.health = lifetime;
    orbs.spawn(orb)
}

/// Keep an orb inside the inset playfield, flipping velocity on contact.
/// Returns true if any wall was touched.
fn reflect(orb: &mut Entity) -> bool {
    let min_x = HUDSCREEN_X as f32;
    let max_x = (HUDSCREEN_WIDTH - orb.w) as f32;
    let min_y = HUDSCREEN_Y as f32;
    let max_y = (HUDSCREEN_HEIGHT - orb.h) as f32;
    let mut bounced = false;

    if orb.pos.x < min_x {
        orb.pos.x = min_x;
        orb.vel.x = -orb.vel.x;
        bounced = true;
    }
    if orb.pos.x > max_x {
        orb.pos.x = max_x;
        orb.vel.x = -orb.vel.x;
        bounced = true;
    }
    if orb.pos.y < min_y {
        orb.pos.y = min_y;
        orb.vel.y = -orb.vel.y;
        bounced = true;
    }
    if orb.pos.y > max_y {
        orb.pos.y = max_y;
        orb.vel.y = -orb.vel.y;
        bounced = true;
    }
    bounced
}

/// Move, bounce, collect and age every orb
pub fn advance_orbs(stage: &mut Stage) {
    let Stage {
        sprites,
        fighters,
        orbs,
        player,
        score,
        events,
        ..
    } = stage;

    let catcher = player.and_then(|key| fighters.get(key)).map(Entity::rect);

    orbs.sweep(|_, orb| {
        orb.pos += orb.vel;
        reflect(orb);

        if catcher.is_some_and(|rect| orb.rect().overlaps(&rect)) {
            let tier = reward_tier(orb.health);
            *score += tier;
            orb.health = 0;
            events.push(StageEvent::sound(SoundEffect::Points, Channel::Points));
            log::debug!("orb collected for {} points", tier);
        }

        orb.health -= 1;
        if orb.health > 0 {
            orb.set_sprite(orb_sprite(sprites, orb.health));
        }
        orb.is_dead()
    });
}
