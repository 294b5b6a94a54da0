//! Plain value geometry shared by layout, hit testing and rendering.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box given by its corners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Inclusive containment: four comparisons.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Clockwise corners starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x1, self.y1),
            Point::new(self.x2, self.y1),
            Point::new(self.x2, self.y2),
            Point::new(self.x1, self.y2),
        ]
    }
}

/// A four-point polygon. Region quads produced by the layout engine are convex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    /// Even-odd ray casting.
    ///
    /// Each edge is evaluated with its endpoints ordered by `y`, so an edge
    /// shared by two neighbouring quads produces the same crossing for both
    /// of them and a point on that edge lands in exactly one.
    pub fn contains(&self, p: Point) -> bool {
        let pts = &self.0;
        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (lo, hi) = if pts[i].y <= pts[j].y {
                (pts[i], pts[j])
            } else {
                (pts[j], pts[i])
            };
            if (lo.y > p.y) != (hi.y > p.y) {
                let x_cross = lo.x + (p.y - lo.y) * (hi.x - lo.x) / (hi.y - lo.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Unsigned shoelace area.
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Vertex average; good enough as a label anchor for convex quads.
    pub fn centroid(&self) -> Point {
        let (sx, sy) = self
            .0
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / 4.0, sy / 4.0)
    }

    /// Clip the segment `a → b` to this (convex) quad, Cyrus-Beck style.
    pub fn clip_segment(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        let pts = &self.0;
        let orientation = self.signed_area().signum();
        if orientation == 0.0 {
            return None;
        }
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let (mut t0, mut t1) = (0.0f32, 1.0f32);
        for i in 0..pts.len() {
            let p = pts[i];
            let q = pts[(i + 1) % pts.len()];
            let (ex, ey) = (q.x - p.x, q.y - p.y);
            let num = orientation * (ex * (a.y - p.y) - ey * (a.x - p.x));
            let den = orientation * (ex * dy - ey * dx);
            if den == 0.0 {
                if num < 0.0 {
                    return None;
                }
                continue;
            }
            let t = -num / den;
            if den > 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }
        let at = |t: f32| Point::new(a.x + dx * t, a.y + dy * t);
        Some((at(t0), at(t1)))
    }

    fn signed_area(&self) -> f32 {
        let pts = &self.0;
        let mut twice = 0.0f32;
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            twice += a.x * b.y - b.x * a.y;
        }
        twice / 2.0
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds {
            x1: f32::MAX,
            y1: f32::MAX,
            x2: f32::MIN,
            y2: f32::MIN,
        };
        for p in &self.0 {
            b.x1 = b.x1.min(p.x);
            b.y1 = b.y1.min(p.y);
            b.x2 = b.x2.max(p.x);
            b.y2 = b.y2.max(p.y);
        }
        b
    }
}

impl From<Bounds> for Quad {
    fn from(b: Bounds) -> Self {
        Quad(b.corners())
    }
}
