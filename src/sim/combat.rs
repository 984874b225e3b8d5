//! Bullet-versus-fighter combat resolution
//!
//! Runs from inside the bullet sweep, so it cannot borrow the whole
//! [`Stage`]. [`Combat`] bundles the disjoint pieces a hit can touch.

use rand_pcg::Pcg32;

use super::effects::Effects;
use super::orbs::spawn_orb;
use super::state::{BulletKey, Entity, FighterKey, OrbKey, Stage, StageEvent};
use super::store::EntityList;
use crate::audio::{Channel, SoundEffect};
use crate::renderer::StageSprites;
use crate::tuning::Tuning;

/// Outcome of a registered hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub target: FighterKey,
    /// The target was the player
    pub on_player: bool,
    /// The hit took the target's last hit point
    pub fatal: bool,
}

/// Everything a bullet hit may mutate, borrowed out of a [`Stage`]
pub struct Combat<'a> {
    pub tuning: &'a Tuning,
    pub sprites: &'a StageSprites,
    pub fighters: &'a mut EntityList<FighterKey, Entity>,
    pub orbs: &'a mut EntityList<OrbKey, Entity>,
    pub effects: &'a mut Effects,
    pub rng: &'a mut Pcg32,
    pub score: &'a mut u32,
    pub events: &'a mut Vec<StageEvent>,
    pub player: Option<FighterKey>,
}

impl<'a> Combat<'a> {
    /// Split a stage into a combat context plus its bullet list
    pub fn split(stage: &'a mut Stage) -> (Self, &'a mut EntityList<BulletKey, Entity>) {
        let Stage {
            tuning,
            sprites,
            fighters,
            bullets,
            orbs,
            effects,
            rng,
            score,
            events,
            player,
            ..
        } = stage;
        let combat = Combat {
            tuning,
            sprites,
            fighters,
            orbs,
            effects,
            rng,
            score,
            events,
            player: *player,
        };
        (combat, bullets)
    }

    /// Resolve one bullet against the fighters.
    ///
    /// The first fighter of the opposing side (collection order) whose hit
    /// box overlaps the bullet takes the hit; at most one per call. Wrecks
    /// still awaiting the sweep absorb bullets but only the killing hit
    /// rewards.
    pub fn resolve_bullet(&mut self, bullet: &mut Entity) -> Option<Hit> {
        let target_key = self
            .fighters
            .find(|_, f| f.side != bullet.side && bullet.overlaps(f))?;
        let target = self.fighters.get_mut(target_key)?;

        bullet.health = 0;
        let was_alive = !target.is_dead();
        target.health -= 1;
        let target = target.clone();
        let fatal = was_alive && target.is_dead();

        self.effects
            .add_explosions(self.rng, target.center(), self.tuning.hit_explosion);
        for _ in 0..self.tuning.hit_fire_bursts {
            self.effects
                .add_fire(self.rng, &target, self.sprites.fire.handle);
        }
        for _ in 0..self.tuning.hit_debris_bursts {
            self.effects.add_debris(self.rng, &target);
        }

        let on_player = Some(target_key) == self.player;
        if on_player {
            self.events
                .push(StageEvent::sound(SoundEffect::PlayerDie, Channel::Player));
            log::debug!("player hit, health now {}", target.health);
        } else {
            if fatal {
                self.reward_kill(&target);
            }
            self.events
                .push(StageEvent::sound(SoundEffect::EnemyDie, Channel::Any));
        }

        Some(Hit {
            target: target_key,
            on_player,
            fatal,
        })
    }

    fn reward_kill(&mut self, target: &Entity) {
        let mode = self.tuning.reward_mode;
        if mode.awards_score() {
            *self.score += self.tuning.kill_reward;
        }
        if mode.drops_orb() {
            spawn_orb(
                self.orbs,
                self.sprites,
                self.tuning.orb_lifetime,
                self.rng,
                target.center(),
            );
        }
        log::debug!("enemy hit, score {}", self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use crate::testing::{spawn_enemy_at, test_stage, test_stage_with};
    use crate::tuning::RewardMode;
    use glam::Vec2;

    fn bullet(stage: &Stage, side: Side, pos: Vec2) -> Entity {
        let sprite = match side {
            Side::Player => stage.sprites.player_bullet,
            Side::Enemy => stage.sprites.enemy_bullet,
        };
        Entity::from_sprite(side, sprite, pos)
    }

    #[test]
    fn test_player_bullet_kills_enemy() {
        let mut stage = test_stage(1);
        let enemy = spawn_enemy_at(&mut stage, Vec2::new(500.0, 300.0));
        let mut shot = bullet(&stage, Side::Player, Vec2::new(505.0, 305.0));

        let (mut combat, _) = Combat::split(&mut stage);
        let hit = combat.resolve_bullet(&mut shot).unwrap();

        assert_eq!(hit.target, enemy);
        assert!(hit.fatal && !hit.on_player);
        assert_eq!(shot.health, 0);
        assert_eq!(stage.fighters.get(enemy).unwrap().health, 0);
        assert_eq!(stage.score, 1);
        assert_eq!(stage.orbs.len(), 1);
        assert_eq!(stage.effects.explosions.len(), 32);
        assert_eq!(stage.effects.fire.len(), 3 * 4);
        assert_eq!(stage.effects.debris.len(), 2 * 4);
        assert_eq!(
            stage.drain_events(),
            vec![StageEvent::sound(SoundEffect::EnemyDie, Channel::Any)]
        );
    }

    #[test]
    fn test_same_side_is_immune() {
        let mut stage = test_stage(1);
        let at = stage.player().unwrap().pos;
        let mut friendly = bullet(&stage, Side::Player, at);

        let (mut combat, _) = Combat::split(&mut stage);
        assert!(combat.resolve_bullet(&mut friendly).is_none());
        assert_eq!(friendly.health, 1);
        assert_eq!(stage.player().unwrap().health, 25);
        assert!(stage.effects.is_empty());
    }

    #[test]
    fn test_enemy_bullet_hurts_player() {
        let mut stage = test_stage(1);
        let at = stage.player().unwrap().pos;
        let mut shot = bullet(&stage, Side::Enemy, at);

        let (mut combat, _) = Combat::split(&mut stage);
        let hit = combat.resolve_bullet(&mut shot).unwrap();

        assert!(hit.on_player && !hit.fatal);
        assert_eq!(stage.player().unwrap().health, 24);
        assert_eq!(stage.score, 0);
        assert!(stage.orbs.is_empty());
        assert_eq!(
            stage.drain_events(),
            vec![StageEvent::sound(SoundEffect::PlayerDie, Channel::Player)]
        );
    }

    #[test]
    fn test_one_hit_per_bullet_first_match_wins() {
        let mut stage = test_stage(1);
        let first = spawn_enemy_at(&mut stage, Vec2::new(500.0, 300.0));
        let second = spawn_enemy_at(&mut stage, Vec2::new(502.0, 302.0));
        let mut shot = bullet(&stage, Side::Player, Vec2::new(506.0, 306.0));

        let (mut combat, _) = Combat::split(&mut stage);
        let hit = combat.resolve_bullet(&mut shot).unwrap();

        assert_eq!(hit.target, first);
        assert_eq!(stage.fighters.get(first).unwrap().health, 0);
        assert_eq!(stage.fighters.get(second).unwrap().health, 1);
        assert_eq!(stage.score, 1);
        assert_eq!(stage.effects.explosions.len(), 32);
    }

    #[test]
    fn test_wreck_absorbs_bullet_without_reward() {
        let mut stage = test_stage(1);
        let enemy = spawn_enemy_at(&mut stage, Vec2::new(500.0, 300.0));
        stage.fighters.get_mut(enemy).unwrap().health = 0;
        let mut shot = bullet(&stage, Side::Player, Vec2::new(505.0, 305.0));

        let (mut combat, _) = Combat::split(&mut stage);
        let hit = combat.resolve_bullet(&mut shot).unwrap();

        assert_eq!(hit.target, enemy);
        assert!(!hit.fatal);
        assert_eq!(shot.health, 0);
        assert_eq!(stage.score, 0);
        assert!(stage.orbs.is_empty());
        assert_eq!(
            stage.drain_events(),
            vec![StageEvent::sound(SoundEffect::EnemyDie, Channel::Any)]
        );
    }

    #[test]
    fn test_every_bullet_on_dying_player_sounds() {
        let mut stage = test_stage(1);
        stage.player_mut().unwrap().health = 1;
        let at = stage.player().unwrap().pos;
        let mut first = bullet(&stage, Side::Enemy, at);
        let mut second = bullet(&stage, Side::Enemy, at);

        let (mut combat, _) = Combat::split(&mut stage);
        let fatal = combat.resolve_bullet(&mut first).unwrap();
        let again = combat.resolve_bullet(&mut second).unwrap();

        assert!(fatal.on_player && fatal.fatal);
        assert!(again.on_player && !again.fatal);
        assert_eq!((first.health, second.health), (0, 0));
        assert_eq!(
            stage.drain_events(),
            vec![StageEvent::sound(SoundEffect::PlayerDie, Channel::Player); 2]
        );
    }

    #[test]
    fn test_reward_modes() {
        for (mode, score, orbs) in [
            (RewardMode::Score, 1, 0),
            (RewardMode::Orb, 0, 1),
            (RewardMode::ScoreAndOrb, 1, 1),
        ] {
            let mut stage = test_stage_with(|t| t.reward_mode = mode);
            spawn_enemy_at(&mut stage, Vec2::new(500.0, 300.0));
            let mut shot = bullet(&stage, Side::Player, Vec2::new(505.0, 305.0));

            let (mut combat, _) = Combat::split(&mut stage);
            combat.resolve_bullet(&mut shot);

            assert_eq!(stage.score, score, "{:?}", mode);
            assert_eq!(stage.orbs.len(), orbs, "{:?}", mode);
        }
    }
}
