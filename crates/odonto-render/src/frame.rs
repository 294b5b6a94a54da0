//! Full-frame painting.
//!
//! A frame is: clear, replay the static layer, draw every chart item, draw
//! the overlay. The static layer depends only on the layout and theme, so it
//! is recorded once into a `DisplayList` and rebuilt when either changes.

use crate::display_list::DisplayList;
use crate::overlay::{Overlay, draw_overlay};
use crate::surface::{DrawSurface, TextAlign};
use crate::symbols::{draw_bridge, draw_condition, draw_indicator};
use crate::theme::ChartTheme;
use odonto_core::{ChartLayout, ChartSnapshot, Point, Viewport};

/// Tooth boxes, region lines and tooth numbers.
pub fn build_static_layer(layout: &ChartLayout, theme: &ChartTheme) -> DisplayList {
    let mut list = DisplayList::new();
    for tooth in layout.iter() {
        let corners = tooth.bounds.corners();
        list.fill_polygon(&corners, theme.tooth_fill);
        for (_, quad) in tooth.surfaces() {
            list.stroke_polygon(quad.points(), theme.region_line, 1.0);
        }
        list.stroke_polygon(&corners, theme.tooth_outline, 1.5);

        // Numbers sit on the crown side, facing the other arch.
        let label_y = if tooth.tooth.is_upper() {
            tooth.bounds.y2 + tooth.big * 0.25
        } else {
            tooth.bounds.y1 - tooth.big * 0.25
        };
        list.text(
            tooth.tooth.as_str(),
            Point::new(tooth.center.x, label_y),
            (tooth.big * 0.28).max(7.0),
            theme.label,
            TextAlign::Center,
        );
    }
    list
}

/// Every condition, then bridges, then indicators.
pub fn draw_items<S: DrawSurface + ?Sized>(
    out: &mut S,
    layout: &ChartLayout,
    snapshot: &ChartSnapshot,
) {
    for condition in &snapshot.conditions {
        draw_condition(out, layout, condition);
    }
    for bridge in &snapshot.bridges {
        draw_bridge(out, layout, bridge);
    }
    for indicator in &snapshot.indicators {
        draw_indicator(out, layout, indicator);
    }
}

/// Paints frames and keeps the static layer between them.
#[derive(Debug, Clone, Default)]
pub struct ChartPainter {
    theme: ChartTheme,
    static_layer: DisplayList,
    built_for: Option<(Viewport, f32)>,
}

impl ChartPainter {
    pub fn new(theme: ChartTheme) -> Self {
        Self {
            theme,
            static_layer: DisplayList::new(),
            built_for: None,
        }
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
        self.built_for = None;
    }

    pub fn paint<S: DrawSurface + ?Sized>(
        &mut self,
        out: &mut S,
        layout: &ChartLayout,
        snapshot: &ChartSnapshot,
        overlay: &Overlay,
    ) {
        let key = (layout.viewport, layout.box_size);
        if self.built_for != Some(key) {
            self.static_layer = build_static_layer(layout, &self.theme);
            self.built_for = Some(key);
            log::debug!("static layer rebuilt: {} ops", self.static_layer.len());
        }

        out.clear(self.theme.background);
        self.static_layer.replay(out);
        draw_items(out, layout, snapshot);
        draw_overlay(out, layout, &self.theme, overlay);
        log::trace!("frame: {} items", snapshot.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::DrawOp;
    use odonto_core::{ConditionCode, FDI_SEQUENCE, Mode, Surface, ToothId, compute_layout};
    use pretty_assertions::assert_eq;

    #[test]
    fn static_layer_labels_every_tooth() {
        let layout = compute_layout(800.0, 600.0, &FDI_SEQUENCE);
        let list = build_static_layer(&layout, &ChartTheme::light());
        assert_eq!(list.texts().count(), 52);
        // fill + 5 regions + outline + label per tooth
        assert_eq!(list.len(), 52 * 8);
    }

    #[test]
    fn frame_order_is_clear_static_items_overlay() {
        let layout = compute_layout(800.0, 600.0, &FDI_SEQUENCE);
        let snap = ChartSnapshot::new().upsert_condition(
            ToothId::intern("16"),
            Some(Surface::Top),
            ConditionCode::Caries,
        );
        let mut painter = ChartPainter::new(ChartTheme::light());
        let mut frame = DisplayList::new();
        painter.paint(&mut frame, &layout, &snap, &Overlay::default());

        let ops = frame.ops();
        assert_eq!(ops[0], DrawOp::Clear(painter.theme().background));
        assert_eq!(ops.len(), 1 + 52 * 8 + 1);
        let caries = Mode::Condition(ConditionCode::Caries).style().color();
        assert!(matches!(
            ops.last(),
            Some(DrawOp::Polyline { color, closed: true, .. }) if Some(*color) == caries
        ));
    }

    #[test]
    fn static_layer_follows_resize() {
        let snap = ChartSnapshot::new();
        let mut painter = ChartPainter::default();
        let mut frame = DisplayList::new();

        let small = compute_layout(400.0, 300.0, &FDI_SEQUENCE);
        painter.paint(&mut frame, &small, &snap, &Overlay::default());
        let before = frame.clone();

        let large = compute_layout(1200.0, 900.0, &FDI_SEQUENCE);
        painter.paint(&mut frame, &large, &snap, &Overlay::default());
        assert_ne!(frame, before);
        assert_eq!(frame.len(), before.len());
    }
}
