//! Camera follow and world streaming
//!
//! The camera only moves up. Platforms that scroll off the bottom are
//! replaced one-for-one by fresh platforms above the highest one.

use super::state::{GameEvent, GameState, Player, Projectile};
use crate::consts::*;

/// Chase the player upward once they climb within `CAMERA_THRESHOLD` of the
/// top edge, never overshooting past `player.y - CAMERA_THRESHOLD`.
pub fn follow_camera(player: &Player, camera_y: &mut f32) {
    if player.pos.y - *camera_y < CAMERA_THRESHOLD {
        *camera_y = (*camera_y - CAMERA_STEP).max(player.pos.y - CAMERA_THRESHOLD);
    }
}

/// Replace every platform below the visible window with a newly generated one.
///
/// Replacement is in place, so the platform count never changes. Each
/// recycle scores `SCORE_PER_PLATFORM` and may spawn a spring and/or enemy.
pub fn recycle_platforms(state: &mut GameState) {
    for i in 0..state.platforms.len() {
        if state.platforms[i].pos.y - state.camera_y <= SCREEN_HEIGHT {
            continue;
        }

        let highest_y = state.highest_platform_y();
        let fresh = state.generator.next_platform(highest_y);
        let (spring, enemy) = state.generator.decorate(&fresh);

        if let Some(spring) = spring {
            state.springs.push(spring);
        }
        if let Some(enemy) = enemy {
            log::debug!("Enemy spawned at ({}, {})", enemy.pos.x, enemy.pos.y);
            state.enemies.push(enemy);
        }

        state.score += SCORE_PER_PLATFORM;
        state.events.push(GameEvent::PlatformRecycled { kind: fresh.kind });
        state.platforms[i] = fresh;
    }
}

/// Move projectiles up and drop those well above the camera
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, camera_y: f32) {
    for projectile in projectiles.iter_mut() {
        projectile.pos.y -= projectile.speed;
    }
    projectiles.retain(|p| p.pos.y >= camera_y - PROJECTILE_DESPAWN_MARGIN);
}
