//! Procedural content generation
//!
//! Every random draw the simulation makes goes through `Generator`, which
//! wraps a seeded PCG stream so runs are reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Enemy, Facing, Platform, PlatformKind, Spring};
use crate::consts::*;

/// Weighted platform table: (kind, weight out of 100)
const KIND_WEIGHTS: [(PlatformKind, u32); 3] = [
    (PlatformKind::Normal, 80),
    (PlatformKind::MOVING, 15),
    (PlatformKind::BREAKABLE, 5),
];

/// Seeded source for platform, spring and enemy placement
#[derive(Debug, Clone)]
pub struct Generator {
    rng: Pcg32,
}

impl Generator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pick a platform kind from the 80/15/5 weight table
    pub fn platform_kind(&mut self) -> PlatformKind {
        let total: u32 = KIND_WEIGHTS.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.random_range(0..total);
        for (kind, weight) in KIND_WEIGHTS {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        PlatformKind::Normal
    }

    /// Random left edge that keeps a platform fully on screen
    pub fn platform_x(&mut self) -> f32 {
        let max_x = (SCREEN_WIDTH - PLATFORM_WIDTH) as u32;
        self.rng.random_range(0..=max_x) as f32
    }

    /// Vertical distance between consecutive platforms
    pub fn platform_gap(&mut self) -> f32 {
        self.rng.random_range(PLATFORM_GAP_MIN..=PLATFORM_GAP_MAX) as f32
    }

    /// Fill upward from the anchor altitude until the cursor clears the top of the screen
    pub fn populate(&mut self, platforms: &mut Vec<Platform>) {
        let mut y = ANCHOR_PLATFORM_Y;
        while y > INITIAL_FILL_TOP {
            let kind = self.platform_kind();
            let x = self.platform_x();
            platforms.push(Platform::new(x, y, kind));
            y -= self.platform_gap();
        }
    }

    /// A new platform placed one random gap above `highest_y`
    pub fn next_platform(&mut self, highest_y: f32) -> Platform {
        let kind = self.platform_kind();
        let x = self.platform_x();
        let y = highest_y - self.platform_gap();
        Platform::new(x, y, kind)
    }

    /// Independent spring and enemy rolls for a freshly placed platform.
    /// Only normal platforms can carry either.
    pub fn decorate(&mut self, platform: &Platform) -> (Option<Spring>, Option<Enemy>) {
        if !platform.kind.is_normal() {
            return (None, None);
        }
        let Platform { pos, .. } = platform;

        let spring = (self.spawn_roll() > SPRING_ROLL_THRESHOLD)
            .then(|| Spring::new(pos.x, pos.y - PLATFORM_HEIGHT));

        let enemy = if self.spawn_roll() > ENEMY_ROLL_THRESHOLD {
            let heading = if self.rng.random_bool(0.5) {
                Facing::Right
            } else {
                Facing::Left
            };
            Some(Enemy::new(pos.x, pos.y - ENEMY_SIZE, heading))
        } else {
            None
        };

        (spring, enemy)
    }

    fn spawn_roll(&mut self) -> u32 {
        self.rng.random_range(0..=SPAWN_ROLL_MAX)
    }
}
