//! Collision detection and response
//!
//! Everything is an axis-aligned box. Landing is one-way: only a falling
//! player whose top is above a platform's top can land on it.

use glam::Vec2;

use super::state::{
    Enemy, Facing, GameEvent, Platform, PlatformKind, Player, Projectile, Spring,
};
use crate::consts::*;

/// Axis-aligned bounding box (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

/// Land the player on platforms and advance moving platforms.
///
/// Normal and breakable platforms bounce the player. Moving platforms only
/// turn toward the right when landed on.
pub fn resolve_platforms(
    player: &mut Player,
    platforms: &mut [Platform],
    events: &mut Vec<GameEvent>,
) {
    let player_box = player.hitbox();

    for platform in platforms.iter_mut() {
        let landed = platform.hitbox().overlaps(&player_box)
            && player.is_falling()
            && player.pos.y < platform.pos.y;

        if landed {
            match &mut platform.kind {
                PlatformKind::Moving { heading } => {
                    *heading = Facing::Right;
                    events.push(GameEvent::MovingPlatformActivated);
                }
                PlatformKind::Breakable { broken } => {
                    *broken = true;
                    player.bounce();
                    events.push(GameEvent::Bounce);
                }
                PlatformKind::Normal => {
                    player.bounce();
                    events.push(GameEvent::Bounce);
                }
            }
        }

        platform.advance();
    }
}

/// Super-bounce off springs the player falls onto.
///
/// Each trigger also pulls the camera up by a fixed amount of extra scroll.
pub fn resolve_springs(
    player: &mut Player,
    springs: &mut [Spring],
    camera_y: &mut f32,
    events: &mut Vec<GameEvent>,
) {
    let player_box = player.hitbox();

    for spring in springs.iter_mut() {
        if spring.hitbox().overlaps(&player_box) && player.is_falling() {
            player.jump = SPRING_IMPULSE;
            *camera_y -= SPRING_CAMERA_KICK;
            spring.used = true;
            events.push(GameEvent::SpringBoost);
        }
    }
}

/// Move enemies, check them against the player and trade them for projectiles.
///
/// Each enemy is removed by at most one projectile per frame (the first one,
/// in projectile order). Returns true if any enemy touched the player.
pub fn resolve_enemies(
    player: &Player,
    enemies: &mut Vec<Enemy>,
    projectiles: &mut Vec<Projectile>,
    score: &mut u64,
    events: &mut Vec<GameEvent>,
) -> bool {
    let player_box = player.hitbox();
    let mut player_hit = false;
    let mut spent = vec![false; projectiles.len()];

    enemies.retain_mut(|enemy| {
        enemy.advance();
        let enemy_box = enemy.hitbox();

        if enemy_box.overlaps(&player_box) {
            player_hit = true;
        }

        let hit = projectiles
            .iter()
            .enumerate()
            .find(|(i, p)| !spent[*i] && p.hitbox().overlaps(&enemy_box))
            .map(|(i, _)| i);

        match hit {
            Some(i) => {
                spent[i] = true;
                *score += SCORE_PER_ENEMY;
                events.push(GameEvent::EnemyKilled { score: *score });
                false
            }
            None => true,
        }
    });

    let mut spent = spent.into_iter();
    projectiles.retain(|_| !spent.next().unwrap_or(false));

    player_hit
}
