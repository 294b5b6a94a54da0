//! Canvas2D backend.
//!
//! Implements `DrawSurface` over an HTML `<canvas>` 2D context so the chart
//! frame built by `odonto-render` can be shown without a GPU.

use odonto_core::{Color, Point};
use odonto_render::{DrawSurface, TextAlign};
use web_sys::CanvasRenderingContext2d;

const FONT_FAMILY: &str = "Inter, -apple-system, BlinkMacSystemFont, sans-serif";

pub struct Canvas2dSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl<'a> Canvas2dSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    fn trace_path(&self, points: &[Point]) {
        self.ctx.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.ctx.move_to(first.x as f64, first.y as f64);
        }
        for p in iter {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
    }
}

fn align_name(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

impl DrawSurface for Canvas2dSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.trace_path(points);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn polyline(&mut self, points: &[Point], closed: bool, color: Color, width: f32) {
        if points.len() < 2 {
            return;
        }
        self.trace_path(points);
        if closed {
            self.ctx.close_path();
        }
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.ctx.stroke();
    }

    fn text(&mut self, text: &str, at: Point, size: f32, color: Color, align: TextAlign) {
        self.ctx.set_font(&format!("500 {size}px {FONT_FAMILY}"));
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_text_align(align_name(align));
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, at.x as f64, at.y as f64);
    }
}
