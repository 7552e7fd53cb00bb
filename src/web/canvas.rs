//! `Surface` implementation over a 2D canvas context.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::GameError;
use crate::game::{Sprite, Surface, TextAlign};
use crate::geometry::Rect;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    bird_frames: Vec<HtmlImageElement>,
    top_pipe: HtmlImageElement,
    bottom_pipe: HtmlImageElement,
}

impl CanvasSurface {
    pub fn new(
        canvas: HtmlCanvasElement,
        bird_frames: Vec<HtmlImageElement>,
        top_pipe: HtmlImageElement,
        bottom_pipe: HtmlImageElement,
    ) -> Result<Self, GameError> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(GameError::MissingElement("canvas 2d context"))?
            .dyn_into()
            .map_err(|_| GameError::MissingElement("canvas 2d context"))?;
        Ok(Self {
            canvas,
            ctx,
            bird_frames,
            top_pipe,
            bottom_pipe,
        })
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn image(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        match sprite {
            Sprite::Bird(frame) => self.bird_frames.get(frame),
            Sprite::TopPipe => Some(&self.top_pipe),
            Sprite::BottomPipe => Some(&self.bottom_pipe),
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) {
        let Some(img) = self.image(sprite) else {
            log::warn!("no image for {sprite:?}");
            return;
        };
        // An image that has not finished loading draws nothing; that is fine for a frame or two.
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            )
            .ok();
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, align: TextAlign) {
        self.ctx.set_font(&format!("{font_px}px sans-serif"));
        self.ctx.set_text_align(match align {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
        });
        self.ctx.set_stroke_style_str("black");
        self.ctx.set_line_width(5.0);
        self.ctx.stroke_text(text, x, y).ok();
        self.ctx.set_fill_style_str("white");
        self.ctx.fill_text(text, x, y).ok();
    }
}

/// Starts loading an image; the element can be drawn once the browser has it.
pub fn load_image(src: &str) -> Result<HtmlImageElement, GameError> {
    let img = HtmlImageElement::new()?;
    img.set_src(src);
    Ok(img)
}
