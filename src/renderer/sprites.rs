//! Sprite handles and the sprite-library collaborator
//!
//! Textures are decoded and cached outside the core. The core only keeps
//! opaque handles plus the pixel size queried once at load time, which is
//! all entity creation needs.

/// Opaque texture handle, stable for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

/// Texture cache owned by the platform layer
pub trait SpriteLibrary {
    /// Load (or fetch from cache) the texture registered under `name`
    fn load_sprite(&mut self, name: &str) -> SpriteHandle;
    /// Pixel size of a loaded texture
    fn sprite_size(&self, sprite: SpriteHandle) -> (i32, i32);
}

/// Handle plus its queried size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub handle: SpriteHandle,
    pub w: i32,
    pub h: i32,
}

impl Sprite {
    pub fn load(library: &mut impl SpriteLibrary, name: &str) -> Self {
        let handle = library.load_sprite(name);
        let (w, h) = library.sprite_size(handle);
        Self { handle, w, h }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }
}

/// Orb sprites, lowest reward tier first
const ORB_TIER_SPRITES: [&str; 10] = [
    "gfx/points2.png",
    "gfx/points3.png",
    "gfx/points4.png",
    "gfx/points5.png",
    "gfx/points6.png",
    "gfx/points7.png",
    "gfx/points8.png",
    "gfx/points9.png",
    "gfx/points10.png",
    "gfx/points.png",
];

/// Every texture the title, stage and high score scenes draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSprites {
    pub player: Sprite,
    pub enemy: Sprite,
    pub player_bullet: Sprite,
    pub enemy_bullet: Sprite,
    pub explosion: Sprite,
    pub trail: Sprite,
    pub fire: Sprite,
    pub orb_tiers: [Sprite; 10],
    /// Shown during an orb's last half second
    pub orb_expiring: Sprite,
    pub background: Sprite,
    pub hud: Sprite,
    pub hud_effects: Sprite,
    pub title: Sprite,
}

impl StageSprites {
    pub fn load(library: &mut impl SpriteLibrary) -> Self {
        let orb_tiers = ORB_TIER_SPRITES.map(|name| Sprite::load(library, name));
        let sprites = Self {
            player: Sprite::load(library, "gfx/player.png"),
            enemy: Sprite::load(library, "gfx/enemy.png"),
            player_bullet: Sprite::load(library, "gfx/playerBullet.png"),
            enemy_bullet: Sprite::load(library, "gfx/enemyBullet.png"),
            explosion: Sprite::load(library, "gfx/explosion.png"),
            trail: Sprite::load(library, "gfx/trail.png"),
            fire: Sprite::load(library, "gfx/fire.png"),
            orb_tiers,
            orb_expiring: Sprite::load(library, "gfx/points1.png"),
            background: Sprite::load(library, "gfx/background.png"),
            hud: Sprite::load(library, "gfx/hud.png"),
            hud_effects: Sprite::load(library, "gfx/hudeffects.png"),
            title: Sprite::load(library, "gfx/voidfighter_title.png"),
        };
        log::info!("Loaded stage sprites");
        sprites
    }

    /// Sprite for a reward tier in `1..=10`
    pub fn orb_tier(&self, tier: u32) -> Sprite {
        let index = (tier.clamp(1, 10) - 1) as usize;
        self.orb_tiers[index]
    }
}
