//! Vello backend.
//!
//! Emits chart primitives into a `vello::Scene`. The caller owns the scene
//! and presents it (wgpu surface, offscreen texture, ...).

use crate::surface::{DrawSurface, TextAlign};
use kurbo::{Affine, BezPath, Cap, Join, Rect, Stroke};
use odonto_core::{Color, Point};
use peniko::Fill;
use vello::Scene;

pub struct VelloSurface<'a> {
    scene: &'a mut Scene,
    width: f64,
    height: f64,
}

impl<'a> VelloSurface<'a> {
    pub fn new(scene: &'a mut Scene, width: f32, height: f32) -> Self {
        Self {
            scene,
            width: width as f64,
            height: height as f64,
        }
    }
}

fn to_peniko(c: Color) -> peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    peniko::Color::from_rgba8(r, g, b, a)
}

fn path(points: &[Point], closed: bool) -> BezPath {
    let mut bez = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        bez.move_to((first.x as f64, first.y as f64));
        for p in iter {
            bez.line_to((p.x as f64, p.y as f64));
        }
        if closed {
            bez.close_path();
        }
    }
    bez
}

impl DrawSurface for VelloSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.scene.reset();
        let rect = Rect::new(0.0, 0.0, self.width, self.height);
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, to_peniko(color), None, &rect);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            to_peniko(color),
            None,
            &path(points, true),
        );
    }

    fn polyline(&mut self, points: &[Point], closed: bool, color: Color, width: f32) {
        if points.len() < 2 {
            return;
        }
        let stroke = Stroke::new(width as f64)
            .with_join(Join::Round)
            .with_caps(Cap::Round);
        self.scene.stroke(
            &stroke,
            Affine::IDENTITY,
            to_peniko(color),
            None,
            &path(points, closed),
        );
    }

    fn text(&mut self, text: &str, at: Point, size: f32, _color: Color, _align: TextAlign) {
        log::trace!("TEXT {:?} {}px at ({}, {})", text, size, at.x, at.y);
        // Glyph runs need a font context; not wired up yet.
    }
}
