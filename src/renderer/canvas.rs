//! Browser backend drawing onto a 2D canvas context

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::commands::{DrawCommand, Renderer};
use crate::assets::{SpriteCatalog, SpriteId, SpriteSource};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: Rc<RefCell<SpriteCatalog<HtmlImageElement>>>,
}

impl CanvasRenderer {
    /// Start loading every sprite from `asset_dir`.
    ///
    /// Images load asynchronously; until one is decoded (or if it fails) its
    /// placeholder is drawn instead.
    pub fn new(ctx: CanvasRenderingContext2d, asset_dir: &str) -> Self {
        let catalog = SpriteCatalog::load_with(|id| {
            let img = HtmlImageElement::new()?;
            img.set_src(&format!("{}/{}", asset_dir.trim_end_matches('/'), id.file_name()));
            Ok::<_, JsValue>(img)
        });
        let sprites = Rc::new(RefCell::new(catalog));

        for id in SpriteId::ALL {
            let img = match sprites.borrow().get(id) {
                SpriteSource::Image(img) => img.clone(),
                SpriteSource::Placeholder(_) => continue,
            };
            let sprites = sprites.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::warn!("Failed to load '{}'. Using fallback image.", id.file_name());
                sprites.borrow_mut().mark_failed(id);
            });
            img.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        Self { ctx, sprites }
    }

    fn draw_sprite(&self, id: SpriteId, x: f64, y: f64, w: f64, h: f64) {
        let sprites = self.sprites.borrow();
        let placeholder = match sprites.get(id) {
            SpriteSource::Image(img) if img.complete() && img.natural_width() > 0 => {
                if self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                    .is_ok()
                {
                    return;
                }
                id.placeholder()
            }
            SpriteSource::Image(_) => id.placeholder(),
            SpriteSource::Placeholder(p) => *p,
        };
        self.ctx.set_fill_style_str(&placeholder.color.to_css());
        self.ctx.fill_rect(x, y, w, h);
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear(color) => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx
                    .fill_rect(0.0, 0.0, SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64);
            }
            DrawCommand::Line { from, to, color } => {
                self.ctx.set_stroke_style_str(&color.to_css());
                self.ctx.set_line_width(1.0);
                self.ctx.begin_path();
                self.ctx.move_to(from[0] as f64, from[1] as f64);
                self.ctx.line_to(to[0] as f64, to[1] as f64);
                self.ctx.stroke();
            }
            DrawCommand::Rect { x, y, w, h, color } => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
            }
            DrawCommand::Sprite { id, x, y, w, h } => {
                self.draw_sprite(*id, *x as f64, *y as f64, *w as f64, *h as f64);
            }
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                color,
            } => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx.set_font(&format!("{}px Arial", size));
                self.ctx.set_text_baseline("top");
                let _ = self.ctx.fill_text(text, *x as f64, *y as f64);
            }
        }
    }

    fn present(&mut self) {
        // The browser composites the canvas after the animation frame callback
    }
}
