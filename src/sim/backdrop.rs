//! Scrolling background and parallax starfield

use rand::Rng;
use rand_pcg::Pcg32;

use super::effects::Tint;
use crate::consts::{PLAYFIELD_HEIGHT, SCREEN_WIDTH};

pub const STAR_COUNT: usize = 500;
pub const MAX_STAR_SPEED: i32 = 8;
/// Drawn length of a star streak
pub const STAR_LENGTH: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    /// Pixels per frame, `1..=MAX_STAR_SPEED`
    pub speed: i32,
}

impl Star {
    /// Faster stars are brighter
    pub fn tint(&self) -> Tint {
        let c = (32 * self.speed).clamp(0, 255) as u8;
        Tint::new(c, c, c)
    }
}

#[derive(Debug, Clone)]
pub struct Backdrop {
    /// Horizontal offset of the tiled background, in `(-SCREEN_WIDTH, 0]`
    pub offset: i32,
    pub stars: Vec<Star>,
}

impl Backdrop {
    pub fn new(rng: &mut Pcg32) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random_range(0..SCREEN_WIDTH),
                y: rng.random_range(0..PLAYFIELD_HEIGHT),
                speed: rng.random_range(1..=MAX_STAR_SPEED),
            })
            .collect();
        Self { offset: 0, stars }
    }

    pub fn advance(&mut self) {
        self.offset -= 1;
        if self.offset < -SCREEN_WIDTH {
            self.offset = 0;
        }

        for star in &mut self.stars {
            star.x -= star.speed;
            if star.x < 0 {
                star.x += SCREEN_WIDTH;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_starfield_init() {
        let backdrop = Backdrop::new(&mut Pcg32::seed_from_u64(1));
        assert_eq!(backdrop.stars.len(), STAR_COUNT);
        for star in &backdrop.stars {
            assert!((0..SCREEN_WIDTH).contains(&star.x));
            assert!((0..PLAYFIELD_HEIGHT).contains(&star.y));
            assert!((1..=MAX_STAR_SPEED).contains(&star.speed));
        }
    }

    #[test]
    fn test_background_wraps() {
        let mut backdrop = Backdrop::new(&mut Pcg32::seed_from_u64(1));
        backdrop.offset = -SCREEN_WIDTH;
        backdrop.advance();
        assert_eq!(backdrop.offset, 0);
    }

    #[test]
    fn test_stars_wrap_horizontally() {
        let mut backdrop = Backdrop {
            offset: 0,
            stars: vec![Star { x: 3, y: 10, speed: 5 }],
        };
        backdrop.advance();
        assert_eq!(backdrop.stars[0].x, SCREEN_WIDTH - 2);
        assert_eq!(backdrop.stars[0].tint(), Tint::new(160, 160, 160));
    }
}
