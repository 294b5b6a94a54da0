//! Chart layout engine.
//!
//! Converts the fixed tooth notation grid plus a surface size into absolute
//! pixel geometry: one bounding box per tooth and five region quads inside
//! it. The result is a plain value (`ChartLayout`) recomputed in full whenever
//! the surface size changes; rendering and hit testing both read it.

use crate::geometry::{Bounds, Point, Quad};
use crate::tooth::{
    COLUMNS, ROWS, SECTION_COLUMNS, Surface, ToothId, ToothKind, ToothSequence, occupied_cells,
};
use std::collections::HashMap;

/// The drawing surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Spacing knobs for the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Outer margin on every side of the surface.
    pub padding: f32,
    /// Horizontal gap between neighbouring teeth.
    pub gap: f32,
    /// Extra gap at each quadrant boundary, horizontally and between arches.
    pub section_gap: f32,
    /// Vertical space between rows as a fraction of the tooth box. Leaves room
    /// for roots, badges, bridge struts and arrows.
    pub row_gap_ratio: f32,
    /// Half-height of the middle band of center teeth, as a fraction of the box.
    pub center_offset_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 10.0,
            gap: 4.0,
            section_gap: 16.0,
            row_gap_ratio: 0.8,
            center_offset_ratio: 0.08,
        }
    }
}

/// Geometry of a single tooth.
#[derive(Debug, Clone, PartialEq)]
pub struct ToothLayout {
    pub tooth: ToothId,
    pub kind: ToothKind,
    pub row: usize,
    pub col: usize,
    pub bounds: Bounds,
    pub center: Point,
    /// Edge length of the tooth box.
    pub big: f32,
    /// Edge length of the inner box (half of `big`).
    pub small: f32,
    /// Region quads in `Surface::ALL` order.
    pub regions: [Quad; 5],
}

impl ToothLayout {
    pub fn region(&self, surface: Surface) -> &Quad {
        &self.regions[surface.index()]
    }

    pub fn surfaces(&self) -> impl Iterator<Item = (Surface, &Quad)> {
        Surface::ALL.into_iter().map(move |s| (s, self.region(s)))
    }
}

/// Cached layout for the whole chart.
#[derive(Debug, Clone, Default)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub box_size: f32,
    teeth: Vec<ToothLayout>,
    index: HashMap<ToothId, usize>,
}

impl ChartLayout {
    /// Lay out `sequence` on a surface of the given size.
    pub fn compute(viewport: Viewport, config: &LayoutConfig, sequence: &ToothSequence) -> Self {
        let box_size = box_size(viewport, config);
        let cols = COLUMNS as f32;
        let row_sections = ((COLUMNS - 1) / SECTION_COLUMNS) as f32;
        let row_width =
            cols * box_size + (cols - 1.0) * config.gap + row_sections * config.section_gap;
        let x0 = (viewport.width - row_width) / 2.0;

        let row_gap = box_size * config.row_gap_ratio;
        let rows = ROWS as f32;
        let arch_sections = ((ROWS - 1) / 2) as f32;
        let chart_height =
            rows * box_size + (rows - 1.0) * row_gap + arch_sections * config.section_gap;
        let y0 = (viewport.height - chart_height) / 2.0;

        let mut teeth = Vec::new();
        let mut index = HashMap::new();

        for (row, col, tooth) in occupied_cells(sequence) {
            let x = x0
                + col as f32 * (box_size + config.gap)
                + (col / SECTION_COLUMNS) as f32 * config.section_gap;
            let y = y0 + row as f32 * (box_size + row_gap) + (row / 2) as f32 * config.section_gap;
            let bounds = Bounds::new(x, y, box_size, box_size);
            let kind = tooth.kind();

            index.insert(tooth, teeth.len());
            teeth.push(ToothLayout {
                tooth,
                kind,
                row,
                col,
                bounds,
                center: bounds.center(),
                big: box_size,
                small: box_size / 2.0,
                regions: tooth_regions(&bounds, kind, config),
            });
        }

        log::debug!(
            "layout: {} teeth, box {:.1}px on {}x{}",
            teeth.len(),
            box_size,
            viewport.width,
            viewport.height
        );

        Self {
            viewport,
            box_size,
            teeth,
            index,
        }
    }

    pub fn get(&self, tooth: ToothId) -> Option<&ToothLayout> {
        self.index.get(&tooth).map(|&i| &self.teeth[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToothLayout> {
        self.teeth.iter()
    }

    pub fn len(&self) -> usize {
        self.teeth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teeth.is_empty()
    }
}

/// Lay out the chart with the default spacing.
pub fn compute_layout(width: f32, height: f32, sequence: &ToothSequence) -> ChartLayout {
    ChartLayout::compute(Viewport { width, height }, &LayoutConfig::default(), sequence)
}

/// The smaller of the width-driven and height-driven box sizes.
fn box_size(viewport: Viewport, config: &LayoutConfig) -> f32 {
    let cols = COLUMNS as f32;
    let row_sections = ((COLUMNS - 1) / SECTION_COLUMNS) as f32;
    let total_gap_width =
        2.0 * config.padding + (cols - 1.0) * config.gap + row_sections * config.section_gap;
    let from_width = (viewport.width - total_gap_width) / cols;

    // Rows plus one row gap above and below the chart for overhanging symbols.
    let rows = ROWS as f32;
    let arch_sections = ((ROWS - 1) / 2) as f32;
    let from_height = (viewport.height - 2.0 * config.padding - arch_sections * config.section_gap)
        / (rows + (rows + 1.0) * config.row_gap_ratio);

    from_width.min(from_height).max(0.0)
}

/// Split a tooth box into top/right/bottom/left/middle quads.
///
/// Side teeth get a centered inner square of half the box size. Center teeth
/// get a narrow band around the horizontal midline instead, so their top and
/// bottom regions meet close to the middle of the box.
fn tooth_regions(b: &Bounds, kind: ToothKind, config: &LayoutConfig) -> [Quad; 5] {
    let size = b.width();
    let inset = size / 4.0;
    let (sx1, sy1, sx2, sy2) = match kind {
        ToothKind::Side => (b.x1 + inset, b.y1 + inset, b.x2 - inset, b.y2 - inset),
        ToothKind::Center => {
            let cy = (b.y1 + b.y2) / 2.0;
            let offset = size * config.center_offset_ratio;
            (b.x1 + inset, cy - offset, b.x2 - inset, cy + offset)
        }
    };

    let p = Point::new;
    [
        Quad([p(b.x1, b.y1), p(b.x2, b.y1), p(sx2, sy1), p(sx1, sy1)]),
        Quad([p(b.x2, b.y1), p(b.x2, b.y2), p(sx2, sy2), p(sx2, sy1)]),
        Quad([p(b.x2, b.y2), p(b.x1, b.y2), p(sx1, sy2), p(sx2, sy2)]),
        Quad([p(b.x1, b.y2), p(b.x1, b.y1), p(sx1, sy1), p(sx1, sy2)]),
        Quad([p(sx1, sy1), p(sx2, sy1), p(sx2, sy2), p(sx1, sy2)]),
    ]
}
