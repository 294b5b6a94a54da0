//! The abstract drawing target.
//!
//! Everything the chart paints goes through these four primitives. Backends
//! (display list, Vello scene, Canvas2D context) implement them.

use odonto_core::{Color, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

pub trait DrawSurface {
    /// Paint the whole surface with `color`.
    fn clear(&mut self, color: Color);

    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Stroke connected segments through `points`, closing the loop if asked.
    fn polyline(&mut self, points: &[Point], closed: bool, color: Color, width: f32);

    /// Draw text vertically centered on `at`.
    fn text(&mut self, text: &str, at: Point, size: f32, color: Color, align: TextAlign);

    fn line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.polyline(&[from, to], false, color, width);
    }

    fn stroke_polygon(&mut self, points: &[Point], color: Color, width: f32) {
        self.polyline(points, true, color, width);
    }
}
