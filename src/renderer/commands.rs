//! Draw command types shared by every backend

use crate::assets::SpriteId;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS color string for canvas backends
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }

    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(255, 255, 255);
    pub const GRID: Color = Color::rgb(222, 222, 222);
    pub const PROJECTILE: Color = Color::rgb(0, 0, 255);
    pub const SCORE_TEXT: Color = Color::rgb(0, 0, 0);
    pub const GAME_OVER_TEXT: Color = Color::rgb(255, 0, 0);
    pub const PROMPT_TEXT: Color = Color::rgb(0, 0, 0);

    // Placeholder sprite colors
    pub const PLAYER: Color = Color::rgb(255, 0, 0);
    pub const PLATFORM_NORMAL: Color = Color::rgb(0, 255, 0);
    pub const PLATFORM_MOVING: Color = Color::rgb(0, 120, 255);
    pub const PLATFORM_BREAKABLE: Color = Color::rgb(255, 140, 0);
    pub const PLATFORM_BROKEN: Color = Color::rgb(140, 30, 0);
    pub const SPRING: Color = Color::rgb(128, 128, 128);
    pub const SPRING_USED: Color = Color::rgb(80, 80, 80);
    pub const ENEMY: Color = Color::rgb(255, 0, 255);
}

/// A single screen-space drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole frame
    Clear(Color),
    Line {
        from: [f32; 2],
        to: [f32; 2],
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    /// Sprite scaled to `w`×`h` with its top-left corner at (`x`, `y`)
    Sprite {
        id: SpriteId,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
}

/// A backend that can execute draw commands
pub trait Renderer {
    fn draw(&mut self, command: &DrawCommand);

    /// Finish the frame
    fn present(&mut self);

    /// Draw a whole frame and present it
    fn render_frame(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
        self.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color() {
        assert_eq!(colors::GRID.to_css(), "rgba(222, 222, 222, 1.000)");
        assert_eq!(Color { a: 0, ..colors::PLAYER }.to_css(), "rgba(255, 0, 0, 0.000)");
    }

    #[derive(Default)]
    struct Recorder {
        drawn: usize,
        presented: usize,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, _command: &DrawCommand) {
            self.drawn += 1;
        }

        fn present(&mut self) {
            self.presented += 1;
        }
    }

    #[test]
    fn test_render_frame_presents_once() {
        let mut recorder = Recorder::default();
        recorder.render_frame(&[
            DrawCommand::Clear(colors::BACKGROUND),
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                w: 5.0,
                h: 10.0,
                color: colors::PROJECTILE,
            },
        ]);
        assert_eq!(recorder.drawn, 2);
        assert_eq!(recorder.presented, 1);
    }
}
