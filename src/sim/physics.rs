//! Player motion: jump/gravity integration, horizontal ramping and screen wrap

use super::state::{Facing, Player};
use crate::consts::*;

/// Advance the player by one fixed step.
///
/// Vertical: a positive jump impulse is consumed first; once spent, gravity
/// accumulates without a terminal velocity. Horizontal: speed ramps toward
/// the held direction (right wins if both are held) and decays to zero
/// without overshoot when released. Position wraps around the screen edges.
pub fn resolve_player(player: &mut Player, move_left: bool, move_right: bool) {
    if player.is_jumping() {
        player.pos.y -= player.jump;
        player.jump -= JUMP_DECAY;
        if player.jump <= 0.0 {
            player.jump = 0.0;
        }
    } else {
        player.pos.y += player.gravity;
        player.gravity += GRAVITY_STEP;
    }

    if move_right {
        player.vel_x = (player.vel_x + MOVE_ACCEL).min(MAX_MOVE_SPEED);
        player.facing = Facing::Right;
    } else if move_left {
        player.vel_x = (player.vel_x - MOVE_ACCEL).max(-MAX_MOVE_SPEED);
        player.facing = Facing::Left;
    } else if player.vel_x > 0.0 {
        player.vel_x = (player.vel_x - MOVE_ACCEL).max(0.0);
    } else if player.vel_x < 0.0 {
        player.vel_x = (player.vel_x + MOVE_ACCEL).min(0.0);
    }

    player.pos.x += player.vel_x;
    wrap_horizontal(player);
}

fn wrap_horizontal(player: &mut Player) {
    if player.pos.x > SCREEN_WIDTH {
        player.pos.x = -PLAYER_WIDTH;
    } else if player.pos.x < -PLAYER_WIDTH {
        player.pos.x = SCREEN_WIDTH;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_gravity_accumulates_without_cap() {
        let mut player = Player::default();
        let start_y = player.pos.y;
        for _ in 0..200 {
            resolve_player(&mut player, false, false);
        }
        assert_eq!(player.gravity, 200.0 * GRAVITY_STEP);
        // Sum of 0, 0.5, ..., 99.5
        assert_eq!(player.pos.y, start_y + 0.5 * (199.0 * 200.0 / 2.0));
    }

    #[test]
    fn test_jump_is_consumed_then_gravity_resumes() {
        let mut player = Player::default();
        player.bounce();
        let start_y = player.pos.y;

        // 15, 14.5, ..., 0.5 -> 30 frames of ascent
        for _ in 0..30 {
            resolve_player(&mut player, false, false);
        }
        assert_eq!(player.jump, 0.0);
        assert_eq!(player.gravity, 0.0);
        assert_eq!(player.pos.y, start_y - 232.5);

        resolve_player(&mut player, false, false);
        assert_eq!(player.gravity, GRAVITY_STEP);
    }

    #[test]
    fn test_horizontal_ramp_and_cap() {
        let mut player = Player::default();
        for _ in 0..40 {
            resolve_player(&mut player, false, true);
        }
        assert_eq!(player.vel_x, MAX_MOVE_SPEED);
        assert_eq!(player.facing, Facing::Right);

        resolve_player(&mut player, true, false);
        assert_eq!(player.vel_x, MAX_MOVE_SPEED - MOVE_ACCEL);
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn test_right_wins_when_both_held() {
        let mut player = Player::default();
        resolve_player(&mut player, true, true);
        assert_eq!(player.vel_x, MOVE_ACCEL);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_release_decays_to_zero_without_overshoot() {
        let mut player = Player {
            vel_x: -1.25,
            ..Default::default()
        };
        resolve_player(&mut player, false, false);
        assert_eq!(player.vel_x, -0.75);
        resolve_player(&mut player, false, false);
        resolve_player(&mut player, false, false);
        assert_eq!(player.vel_x, 0.0);
        resolve_player(&mut player, false, false);
        assert_eq!(player.vel_x, 0.0);
    }

    #[test]
    fn test_wraps_right_edge_to_left() {
        let mut player = Player {
            pos: Vec2::new(SCREEN_WIDTH - 2.0, 300.0),
            vel_x: 5.0,
            ..Default::default()
        };
        resolve_player(&mut player, false, true);
        assert_eq!(player.pos.x, -PLAYER_WIDTH);
    }

    #[test]
    fn test_wraps_left_edge_to_right() {
        let mut player = Player {
            pos: Vec2::new(-PLAYER_WIDTH + 1.0, 300.0),
            vel_x: -5.0,
            ..Default::default()
        };
        resolve_player(&mut player, true, false);
        assert_eq!(player.pos.x, SCREEN_WIDTH);
    }
}
