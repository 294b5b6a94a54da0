//! Recording surface.
//!
//! A `DisplayList` captures draw calls as plain values so they can be replayed
//! onto another surface. The chart's static layer (tooth outlines, region
//! lines, labels) is built once per layout into a display list and replayed
//! at the start of every frame.

use crate::surface::{DrawSurface, TextAlign};
use odonto_core::{Color, Point};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    FillPolygon {
        points: Vec<Point>,
        color: Color,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        at: Point,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn replay<S: DrawSurface + ?Sized>(&self, target: &mut S) {
        for op in &self.ops {
            match op {
                DrawOp::Clear(color) => target.clear(*color),
                DrawOp::FillPolygon { points, color } => target.fill_polygon(points, *color),
                DrawOp::Polyline {
                    points,
                    closed,
                    color,
                    width,
                } => target.polyline(points, *closed, *color, *width),
                DrawOp::Text {
                    text,
                    at,
                    size,
                    color,
                    align,
                } => target.text(text, *at, *size, *color, *align),
            }
        }
    }

    /// Texts in recording order. Handy for assertions.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Ops drawn with `color`.
    pub fn with_color(&self, color: Color) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(move |op| match op {
            DrawOp::Clear(c)
            | DrawOp::FillPolygon { color: c, .. }
            | DrawOp::Polyline { color: c, .. }
            | DrawOp::Text { color: c, .. } => *c == color,
        })
    }
}

impl DrawSurface for DisplayList {
    fn clear(&mut self, color: Color) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.ops.push(DrawOp::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn polyline(&mut self, points: &[Point], closed: bool, color: Color, width: f32) {
        if points.len() < 2 {
            return;
        }
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            closed,
            color,
            width,
        });
    }

    fn text(&mut self, text: &str, at: Point, size: f32, color: Color, align: TextAlign) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            size,
            color,
            align,
        });
    }
}
