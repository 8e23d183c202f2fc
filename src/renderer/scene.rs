//! Frame composition: turn a `GameState` into a draw list

use super::commands::{DrawCommand, colors};
use crate::Settings;
use crate::assets::SpriteId;
use crate::consts::*;
use crate::sim::{Facing, GamePhase, GameState, PlatformKind, Player};

/// Background grid spacing (px)
const GRID_SPACING: usize = 12;
const SCORE_TEXT_SIZE: f32 = 25.0;

/// Build the draw list for one frame. `fps` is shown only when enabled in settings.
pub fn build_frame(state: &GameState, settings: &Settings, fps: Option<u32>) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(256);
    commands.push(DrawCommand::Clear(colors::BACKGROUND));

    if state.phase == GamePhase::GameOver {
        game_over_overlay(state.score, &mut commands);
        return commands;
    }

    if settings.show_grid {
        grid(&mut commands);
    }

    let cam = state.camera_y;

    for platform in &state.platforms {
        let id = match platform.kind {
            PlatformKind::Normal => SpriteId::PlatformNormal,
            PlatformKind::Moving { .. } => SpriteId::PlatformMoving,
            PlatformKind::Breakable { broken: false } => SpriteId::PlatformBreakable,
            PlatformKind::Breakable { broken: true } => SpriteId::PlatformBroken,
        };
        commands.push(sprite(id, platform.pos.x, platform.pos.y - cam));
    }

    for spring in &state.springs {
        let id = if spring.used {
            SpriteId::SpringUsed
        } else {
            SpriteId::Spring
        };
        commands.push(sprite(id, spring.pos.x, spring.pos.y - cam));
    }

    for enemy in &state.enemies {
        commands.push(sprite(SpriteId::Enemy, enemy.pos.x, enemy.pos.y - cam));
    }

    for projectile in &state.projectiles {
        commands.push(DrawCommand::Rect {
            x: projectile.pos.x,
            y: projectile.pos.y - cam,
            w: PROJECTILE_WIDTH,
            h: PROJECTILE_HEIGHT,
            color: colors::PROJECTILE,
        });
    }

    let player = &state.player;
    commands.push(sprite(player_sprite(player), player.pos.x, player.pos.y - cam));

    commands.push(DrawCommand::Text {
        text: format!("Score: {}", state.score),
        x: 25.0,
        y: 25.0,
        size: SCORE_TEXT_SIZE,
        color: colors::SCORE_TEXT,
    });

    if let (true, Some(fps)) = (settings.show_fps, fps) {
        commands.push(DrawCommand::Text {
            text: format!("{} FPS", fps),
            x: SCREEN_WIDTH - 120.0,
            y: 25.0,
            size: SCORE_TEXT_SIZE,
            color: colors::SCORE_TEXT,
        });
    }

    commands
}

/// Sprite variant for the player's facing and jump state
pub fn player_sprite(player: &Player) -> SpriteId {
    match (player.facing, player.is_jumping()) {
        (Facing::Right, false) => SpriteId::PlayerRight,
        (Facing::Right, true) => SpriteId::PlayerRightJump,
        (Facing::Left, false) => SpriteId::PlayerLeft,
        (Facing::Left, true) => SpriteId::PlayerLeftJump,
    }
}

fn sprite(id: SpriteId, x: f32, y: f32) -> DrawCommand {
    let size = id.size();
    DrawCommand::Sprite {
        id,
        x,
        y,
        w: size.x,
        h: size.y,
    }
}

fn grid(commands: &mut Vec<DrawCommand>) {
    for x in (0..SCREEN_WIDTH as usize).step_by(GRID_SPACING) {
        let x = x as f32;
        commands.push(DrawCommand::Line {
            from: [x, 0.0],
            to: [x, SCREEN_HEIGHT],
            color: colors::GRID,
        });
    }
    for y in (0..SCREEN_HEIGHT as usize).step_by(GRID_SPACING) {
        let y = y as f32;
        commands.push(DrawCommand::Line {
            from: [0.0, y],
            to: [SCREEN_WIDTH, y],
            color: colors::GRID,
        });
    }
}

fn game_over_overlay(score: u64, commands: &mut Vec<DrawCommand>) {
    let x = SCREEN_WIDTH / 2.0 - 100.0;
    let y = SCREEN_HEIGHT / 2.0;
    commands.push(DrawCommand::Text {
        text: format!("Game Over! Score: {}", score),
        x,
        y: y - 50.0,
        size: SCORE_TEXT_SIZE,
        color: colors::GAME_OVER_TEXT,
    });
    commands.push(DrawCommand::Text {
        text: "Tap to Restart".to_string(),
        x,
        y,
        size: SCORE_TEXT_SIZE,
        color: colors::PROMPT_TEXT,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_playing_frame_layout() {
        let state = GameState::new(8);
        let settings = Settings::default();
        let commands = build_frame(&state, &settings, None);

        assert_eq!(commands[0], DrawCommand::Clear(colors::BACKGROUND));
        let lines = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 100 + 67);

        let platforms = commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::Sprite {
                        id: SpriteId::PlatformNormal
                            | SpriteId::PlatformMoving
                            | SpriteId::PlatformBreakable
                            | SpriteId::PlatformBroken,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(platforms, state.platforms.len());

        assert_eq!(texts(&commands), vec!["Score: 0"]);
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Text { x, y, .. }) if *x == 25.0 && *y == 25.0
        ));
    }

    #[test]
    fn test_positions_are_camera_relative() {
        let mut state = GameState::new(8);
        state.camera_y = -300.0;
        let settings = Settings {
            show_grid: false,
            ..Default::default()
        };
        let commands = build_frame(&state, &settings, None);

        let player = commands.iter().find_map(|c| match c {
            DrawCommand::Sprite { id: SpriteId::PlayerRight, x, y, .. } => Some((*x, *y)),
            _ => None,
        });
        assert_eq!(player, Some((PLAYER_SPAWN_X, PLAYER_SPAWN_Y + 300.0)));
    }

    #[test]
    fn test_game_over_frame() {
        let mut state = GameState::new(8);
        state.phase = GamePhase::GameOver;
        state.score = 1_300;
        let commands = build_frame(&state, &Settings::default(), Some(60));
        assert_eq!(texts(&commands), vec!["Game Over! Score: 1300", "Tap to Restart"]);
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn test_fps_overlay_toggle() {
        let state = GameState::new(8);
        let mut settings = Settings {
            show_grid: false,
            show_fps: true,
            ..Default::default()
        };
        assert!(texts(&build_frame(&state, &settings, Some(59))).contains(&"59 FPS"));
        settings.show_fps = false;
        assert!(!texts(&build_frame(&state, &settings, Some(59))).contains(&"59 FPS"));
    }

    #[test]
    fn test_player_sprite_variants() {
        let mut player = Player::default();
        assert_eq!(player_sprite(&player), SpriteId::PlayerRight);
        player.bounce();
        assert_eq!(player_sprite(&player), SpriteId::PlayerRightJump);
        player.facing = Facing::Left;
        assert_eq!(player_sprite(&player), SpriteId::PlayerLeftJump);
        player.jump = 0.0;
        assert_eq!(player_sprite(&player), SpriteId::PlayerLeft);
    }
}
