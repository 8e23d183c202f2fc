//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, one frame per
//! call. No delta-time scaling: every constant is a per-frame amount.

use super::collision::{resolve_enemies, resolve_platforms, resolve_springs};
use super::physics::resolve_player;
use super::scroller::{advance_projectiles, follow_camera, recycle_platforms};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Steer left (held)
    pub left: bool,
    /// Steer right (held)
    pub right: bool,
    /// Fire a projectile this frame
    pub shoot: bool,
    /// Start a new session (only honored after game over)
    pub restart: bool,
    /// Demo mode - the autopilot plays the game
    pub autopilot: bool,
}

/// Advance the game state by one fixed step.
///
/// Order within a playing frame: streaming pass (recycle + springs), player
/// physics, camera follow, platform landings, enemies vs player/projectiles,
/// projectile flight, then shooting.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    let input = if input.autopilot {
        autopilot(state, input)
    } else {
        *input
    };

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        }
        return;
    }

    if state.player_fell() {
        end_session(state);
        return;
    }

    state.time_ticks += 1;

    recycle_platforms(state);
    resolve_springs(
        &mut state.player,
        &mut state.springs,
        &mut state.camera_y,
        &mut state.events,
    );

    resolve_player(&mut state.player, input.left, input.right);
    follow_camera(&state.player, &mut state.camera_y);

    resolve_platforms(&mut state.player, &mut state.platforms, &mut state.events);
    let touched_enemy = resolve_enemies(
        &state.player,
        &mut state.enemies,
        &mut state.projectiles,
        &mut state.score,
        &mut state.events,
    );

    advance_projectiles(&mut state.projectiles, state.camera_y);
    if input.shoot {
        state.spawn_projectile();
    }

    if touched_enemy {
        end_session(state);
    }
}

fn end_session(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over after {} ticks, score {}",
        state.time_ticks,
        state.score
    );
}

/// Horizontal dead zone for autopilot steering
const AUTOPILOT_DEAD_ZONE: f32 = 8.0;
/// How far above the player the autopilot looks for a next platform
const AUTOPILOT_LOOKAHEAD: f32 = 160.0;

/// Synthesize input for demo mode.
///
/// Falling: steer over the closest platform below. Rising: line up under the
/// nearest reachable platform above. Shoots at enemies stacked above and
/// restarts immediately on game over.
pub fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut out = *input;

    if state.phase == GamePhase::GameOver {
        out.restart = true;
        return out;
    }

    let player = &state.player;
    let feet = player.pos.y + PLAYER_HEIGHT;
    let center = player.center_x();

    let target = if player.is_jumping() {
        state
            .platforms
            .iter()
            .filter(|p| p.pos.y < player.pos.y && p.pos.y > player.pos.y - AUTOPILOT_LOOKAHEAD)
            .min_by(|a, b| {
                let da = (a.pos.x + PLATFORM_WIDTH / 2.0 - center).abs();
                let db = (b.pos.x + PLATFORM_WIDTH / 2.0 - center).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    } else {
        state
            .platforms
            .iter()
            .filter(|p| p.pos.y >= feet && p.kind.is_normal())
            .min_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    };

    if let Some(platform) = target {
        let dx = platform.pos.x + PLATFORM_WIDTH / 2.0 - center;
        out.right = dx > AUTOPILOT_DEAD_ZONE;
        out.left = dx < -AUTOPILOT_DEAD_ZONE;
    }

    out.shoot = state.enemies.iter().any(|e| {
        let dx = e.pos.x + ENEMY_SIZE / 2.0 - center;
        dx.abs() < ENEMY_SIZE / 2.0 && e.pos.y < player.pos.y && e.pos.y > state.camera_y
    });

    out
}
