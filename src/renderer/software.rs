//! CPU rasterizer for native/headless runs
//!
//! Draws into an `RgbaImage` so frames can be inspected or saved as PNG.
//! Text is not rasterized; it is captured per frame instead.

use image::{Rgba, RgbaImage};

use super::commands::{Color, DrawCommand, Renderer};
use crate::assets::{SpriteCatalog, SpriteSource};

pub struct SoftwareRenderer {
    frame: RgbaImage,
    sprites: SpriteCatalog<RgbaImage>,
    /// Text drawn during the current frame
    captions: Vec<String>,
    frames_presented: u64,
}

impl SoftwareRenderer {
    pub fn new(width: u32, height: u32, sprites: SpriteCatalog<RgbaImage>) -> Self {
        Self {
            frame: RgbaImage::new(width, height),
            sprites,
            captions: Vec::new(),
            frames_presented: 0,
        }
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn captions(&self) -> &[String] {
        &self.captions
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Write the current frame to a PNG file
    pub fn save_png(&self, path: &std::path::Path) -> image::ImageResult<()> {
        self.frame.save(path)
    }
}

fn fill_rect(frame: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, color: Color) {
    let (width, height) = frame.dimensions();
    let x0 = x.round().max(0.0) as u32;
    let y0 = y.round().max(0.0) as u32;
    let x1 = ((x + w).round().max(0.0) as u32).min(width);
    let y1 = ((y + h).round().max(0.0) as u32).min(height);
    for py in y0..y1 {
        for px in x0..x1 {
            blend(frame, px, py, color.to_array());
        }
    }
}

fn line(frame: &mut RgbaImage, from: [f32; 2], to: [f32; 2], color: Color) {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (from[0] + dx * t).round();
        let y = (from[1] + dy * t).round();
        if x >= 0.0 && y >= 0.0 {
            blend(frame, x as u32, y as u32, color.to_array());
        }
    }
}

/// Nearest-neighbor scaled blit
fn blit(frame: &mut RgbaImage, src: &RgbaImage, x: f32, y: f32, w: f32, h: f32) {
    let (src_w, src_h) = src.dimensions();
    if src_w == 0 || src_h == 0 || w <= 0.0 || h <= 0.0 {
        return;
    }
    let (dst_w, dst_h) = (w.round() as i64, h.round() as i64);
    let (ox, oy) = (x.round() as i64, y.round() as i64);
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let (px, py) = (ox + dx, oy + dy);
            if px < 0 || py < 0 {
                continue;
            }
            let sx = ((dx * src_w as i64) / dst_w) as u32;
            let sy = ((dy * src_h as i64) / dst_h) as u32;
            blend(frame, px as u32, py as u32, src.get_pixel(sx, sy).0);
        }
    }
}

/// Source-over blend of one pixel; out-of-bounds writes are dropped
fn blend(frame: &mut RgbaImage, x: u32, y: u32, src: [u8; 4]) {
    if x >= frame.width() || y >= frame.height() || src[3] == 0 {
        return;
    }
    let dst = frame.get_pixel_mut(x, y);
    if src[3] == 255 {
        *dst = Rgba(src);
        return;
    }
    let a = src[3] as u32;
    for c in 0..3 {
        dst.0[c] = ((src[c] as u32 * a + dst.0[c] as u32 * (255 - a)) / 255) as u8;
    }
    dst.0[3] = dst.0[3].max(src[3]);
}

impl Renderer for SoftwareRenderer {
    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear(color) => {
                let pixel = Rgba(color.to_array());
                for p in self.frame.pixels_mut() {
                    *p = pixel;
                }
                self.captions.clear();
            }
            DrawCommand::Line { from, to, color } => line(&mut self.frame, *from, *to, *color),
            DrawCommand::Rect { x, y, w, h, color } => {
                fill_rect(&mut self.frame, *x, *y, *w, *h, *color)
            }
            DrawCommand::Sprite { id, x, y, w, h } => match self.sprites.get(*id) {
                SpriteSource::Image(img) => blit(&mut self.frame, img, *x, *y, *w, *h),
                SpriteSource::Placeholder(p) => fill_rect(&mut self.frame, *x, *y, *w, *h, p.color),
            },
            DrawCommand::Text { text, .. } => self.captions.push(text.clone()),
        }
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteId;
    use crate::renderer::colors;

    fn renderer() -> SoftwareRenderer {
        SoftwareRenderer::new(100, 100, SpriteCatalog::placeholders())
    }

    #[test]
    fn test_clear_and_rect() {
        let mut r = renderer();
        r.render_frame(&[
            DrawCommand::Clear(colors::BACKGROUND),
            DrawCommand::Rect {
                x: 10.0,
                y: 10.0,
                w: 5.0,
                h: 10.0,
                color: colors::PROJECTILE,
            },
        ]);
        assert_eq!(r.frame().get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(r.frame().get_pixel(12, 15).0, [0, 0, 255, 255]);
        assert_eq!(r.frame().get_pixel(15, 15).0, [255, 255, 255, 255]);
        assert_eq!(r.frames_presented(), 1);
    }

    #[test]
    fn test_placeholder_sprite_is_clipped() {
        let mut r = renderer();
        r.draw(&DrawCommand::Clear(colors::BACKGROUND));
        r.draw(&DrawCommand::Sprite {
            id: SpriteId::Enemy,
            x: 60.0,
            y: -20.0,
            w: 70.0,
            h: 70.0,
        });
        assert_eq!(r.frame().get_pixel(99, 0).0, colors::ENEMY.to_array());
        assert_eq!(r.frame().get_pixel(59, 0).0, [255, 255, 255, 255]);
        assert_eq!(r.frame().get_pixel(70, 55).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_image_sprite_is_scaled() {
        let mut art = RgbaImage::new(2, 1);
        art.put_pixel(0, 0, Rgba([1, 2, 3, 255]));
        art.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        let sprites = SpriteCatalog::load_with(|_| Ok::<_, String>(art.clone()));
        let mut r = SoftwareRenderer::new(20, 20, sprites);
        r.draw(&DrawCommand::Clear(colors::BACKGROUND));
        r.draw(&DrawCommand::Sprite {
            id: SpriteId::Spring,
            x: 0.0,
            y: 0.0,
            w: 10.0,
            h: 4.0,
        });
        assert_eq!(r.frame().get_pixel(4, 3).0, [1, 2, 3, 255]);
        // Transparent half leaves the background alone
        assert_eq!(r.frame().get_pixel(7, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_text_is_captured_per_frame() {
        let mut r = renderer();
        let text = DrawCommand::Text {
            text: "Score: 100".into(),
            x: 25.0,
            y: 25.0,
            size: 25.0,
            color: colors::SCORE_TEXT,
        };
        r.render_frame(&[DrawCommand::Clear(colors::BACKGROUND), text.clone()]);
        r.render_frame(&[DrawCommand::Clear(colors::BACKGROUND), text]);
        assert_eq!(r.captions().to_vec(), vec!["Score: 100".to_string()]);
    }

    #[test]
    fn test_grid_line() {
        let mut r = renderer();
        r.draw(&DrawCommand::Clear(colors::BACKGROUND));
        r.draw(&DrawCommand::Line {
            from: [12.0, 0.0],
            to: [12.0, 100.0],
            color: colors::GRID,
        });
        assert_eq!(r.frame().get_pixel(12, 50).0, colors::GRID.to_array());
        assert_eq!(r.frame().get_pixel(13, 50).0, [255, 255, 255, 255]);
    }
}
