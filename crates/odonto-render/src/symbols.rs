//! Chart items → draw calls.
//!
//! Each item's look comes from its mode's `SymbolStyle`; this module only
//! knows how to turn a style plus tooth geometry into primitives. Items whose
//! tooth has no layout are skipped.

use crate::surface::{DrawSurface, TextAlign};
use odonto_core::{
    Bridge, ChartLayout, Color, Condition, Glyph, Hatch, Indicator, Mode, Point, Quad,
    SymbolStyle, ToothLayout,
};

// ─── Conditions ──────────────────────────────────────────────────────────

pub fn draw_condition<S: DrawSurface + ?Sized>(
    out: &mut S,
    layout: &ChartLayout,
    condition: &Condition,
) {
    let Some(tooth) = layout.get(condition.tooth) else {
        log::debug!("no layout for {}, skipping {}", condition.tooth, condition.pos);
        return;
    };
    let style = Mode::Condition(condition.condition).style();

    match style {
        SymbolStyle::Fill { .. } | SymbolStyle::Stroke { .. } | SymbolStyle::Pattern { .. } => {
            match condition.surface {
                Some(surface) => paint_region(out, tooth.region(surface), style, tooth.big),
                // A surface code without a surface covers the whole tooth.
                None => {
                    for (_, quad) in tooth.surfaces() {
                        paint_region(out, quad, style, tooth.big);
                    }
                }
            }
        }
        SymbolStyle::Glyph { color, glyph } => draw_glyph(out, tooth, glyph, color),
        SymbolStyle::Badge { color, text } => draw_badge(out, tooth, text, color),
        SymbolStyle::Strut { .. } | SymbolStyle::Arrow { .. } | SymbolStyle::Nothing => {
            log::debug!("{} has no condition symbol", condition.condition);
        }
    }
}

fn paint_region<S: DrawSurface + ?Sized>(out: &mut S, quad: &Quad, style: SymbolStyle, big: f32) {
    let pts = quad.points();
    match style {
        SymbolStyle::Fill { color, outline } => {
            out.fill_polygon(pts, color);
            if let Some(outline) = outline {
                out.stroke_polygon(pts, outline, 1.5);
            }
        }
        SymbolStyle::Stroke { color, width } => out.stroke_polygon(pts, color, width),
        SymbolStyle::Pattern { color, hatch } => {
            out.fill_polygon(pts, color.with_alpha(0.15));
            for (a, b) in hatch_lines(quad, hatch, (big / 8.0).max(2.0)) {
                out.line(a, b, color, 1.0);
            }
        }
        _ => {}
    }
}

/// Hatch segments covering `quad`, clipped to it.
pub fn hatch_lines(quad: &Quad, hatch: Hatch, spacing: f32) -> Vec<(Point, Point)> {
    let b = quad.bounds();
    let (w, h) = (b.width(), b.height());
    let mut lines = Vec::new();
    if spacing <= 0.0 || w <= 0.0 || h <= 0.0 {
        return lines;
    }

    let limit = match hatch {
        Hatch::Diagonal => w + h,
        Hatch::Vertical => w,
    };
    let mut c = spacing / 2.0;
    while c < limit {
        let (from, to) = match hatch {
            Hatch::Diagonal => (
                Point::new(b.x1 + c - h, b.y2),
                Point::new(b.x1 + c, b.y1),
            ),
            Hatch::Vertical => (Point::new(b.x1 + c, b.y1), Point::new(b.x1 + c, b.y2)),
        };
        lines.extend(quad.clip_segment(from, to));
        c += spacing;
    }
    lines
}

// ─── Whole-tooth glyphs ──────────────────────────────────────────────────

/// The box edge the roots grow from, and the direction away from the crown.
fn root_side(tooth: &ToothLayout) -> (f32, f32) {
    if tooth.tooth.is_upper() {
        (tooth.bounds.y1, -1.0)
    } else {
        (tooth.bounds.y2, 1.0)
    }
}

fn draw_glyph<S: DrawSurface + ?Sized>(
    out: &mut S,
    tooth: &ToothLayout,
    glyph: Glyph,
    color: Color,
) {
    let b = tooth.bounds;
    let big = tooth.big;
    let Point { x: cx, y: cy } = tooth.center;
    let width = (big * 0.05).max(1.5);
    let p = Point::new;

    match glyph {
        Glyph::RootTriangle { filled } => {
            let (edge, dir) = root_side(tooth);
            let tri = [
                p(cx - big * 0.25, edge),
                p(cx + big * 0.25, edge),
                p(cx, edge + dir * big * 0.35),
            ];
            if filled {
                out.fill_polygon(&tri, color);
            } else {
                out.stroke_polygon(&tri, color, width);
            }
        }
        Glyph::Fracture => {
            let (off, half) = (big * 0.1, big * 0.25);
            for dx in [-off, off] {
                out.line(p(cx + dx, cy - half), p(cx + dx, cy + half), color, width);
            }
            for dy in [-off, off] {
                out.line(p(cx - half, cy + dy), p(cx + half, cy + dy), color, width);
            }
        }
        Glyph::Crown { porcelain } => {
            let corners = b.corners();
            if porcelain {
                let quad = Quad(corners);
                for (from, to) in hatch_lines(&quad, Hatch::Vertical, (big / 6.0).max(2.0)) {
                    out.line(from, to, color.with_alpha(0.6), 1.0);
                }
            }
            out.stroke_polygon(&corners, color, (big * 0.08).max(2.0));
        }
        Glyph::RootRemnant => {
            let (y1, y2) = if tooth.tooth.is_upper() {
                (b.y1, cy)
            } else {
                (cy, b.y2)
            };
            out.line(p(b.x1, y1), p(b.x2, y2), color, width);
            out.line(p(b.x2, y1), p(b.x1, y2), color, width);
        }
        Glyph::Missing => {
            out.line(p(b.x1, b.y1), p(b.x2, b.y2), color, width);
            out.line(p(b.x2, b.y1), p(b.x1, b.y2), color, width);
        }
    }
}

fn draw_badge<S: DrawSurface + ?Sized>(out: &mut S, tooth: &ToothLayout, text: &str, color: Color) {
    let (edge, dir) = root_side(tooth);
    let at = Point::new(tooth.center.x, edge + dir * tooth.big * 0.6);
    out.text(text, at, (tooth.big * 0.3).max(8.0), color, TextAlign::Center);
}

// ─── Bridges ─────────────────────────────────────────────────────────────

pub fn draw_bridge<S: DrawSurface + ?Sized>(out: &mut S, layout: &ChartLayout, bridge: &Bridge) {
    let SymbolStyle::Strut { color, width } = Mode::Bridge.style() else {
        return;
    };
    let teeth: Vec<&ToothLayout> = bridge
        .teeth()
        .iter()
        .filter_map(|t| {
            let found = layout.get(*t);
            if found.is_none() {
                log::debug!("no layout for {t} in {:?}", bridge.name);
            }
            found
        })
        .collect();
    if teeth.len() < 2 {
        log::debug!("bridge {:?} has fewer than two drawable teeth", bridge.name);
        return;
    }
    draw_struts(out, &teeth, color, width);
}

/// A vertical strut up from each tooth's top edge, joined by one horizontal bar.
pub(crate) fn draw_struts<S: DrawSurface + ?Sized>(
    out: &mut S,
    teeth: &[&ToothLayout],
    color: Color,
    width: f32,
) {
    let Some(first) = teeth.first() else {
        return;
    };
    let top = teeth
        .iter()
        .map(|t| t.bounds.y1)
        .fold(f32::INFINITY, f32::min);
    let bar_y = top - first.big * 0.35;

    let (mut left, mut right) = (f32::INFINITY, f32::NEG_INFINITY);
    for t in teeth {
        let x = t.center.x;
        out.line(Point::new(x, t.bounds.y1), Point::new(x, bar_y), color, width);
        left = left.min(x);
        right = right.max(x);
    }
    out.line(Point::new(left, bar_y), Point::new(right, bar_y), color, width);
}

// ─── Indicators ──────────────────────────────────────────────────────────

pub fn draw_indicator<S: DrawSurface + ?Sized>(
    out: &mut S,
    layout: &ChartLayout,
    indicator: &Indicator,
) {
    let Some(tooth) = layout.get(indicator.tooth) else {
        log::debug!("no layout for {}, skipping indicator", indicator.tooth);
        return;
    };
    let SymbolStyle::Arrow { color, width } = Mode::Indicator(indicator.indicator_type).style()
    else {
        return;
    };

    let kind = indicator.indicator_type;
    let big = tooth.big;
    let (outward, y) = if kind.is_top() {
        (-1.0, tooth.bounds.y1 - big * 0.3)
    } else {
        (1.0, tooth.bounds.y2 + big * 0.3)
    };
    let dir = if kind.points_left() { -1.0 } else { 1.0 };
    // Turn variants are drawn straight, tilted away from the tooth.
    let lift = if kind.is_curved() { outward * big * 0.2 } else { 0.0 };

    let tail = Point::new(tooth.center.x - dir * big * 0.4, y);
    let tip = Point::new(tooth.center.x + dir * big * 0.4, y + lift);
    out.line(tail, tip, color, width);
    draw_arrowhead(out, tail, tip, color, (big * 0.2).max(5.0));
}

/// Triangular head at `tip`, oriented along `tail → tip`.
pub(crate) fn draw_arrowhead<S: DrawSurface + ?Sized>(
    out: &mut S,
    tail: Point,
    tip: Point,
    color: Color,
    size: f32,
) {
    let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
    let wing = |a: f32| Point::new(tip.x - size * a.cos(), tip.y - size * a.sin());
    out.fill_polygon(&[tip, wing(angle - 0.4), wing(angle + 0.4)], color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::{DisplayList, DrawOp};
    use odonto_core::{
        ChartSnapshot, ConditionCode, FDI_SEQUENCE, IndicatorType, Surface, ToothId,
        compute_layout,
    };
    use pretty_assertions::assert_eq;

    fn t(s: &str) -> ToothId {
        ToothId::intern(s)
    }

    fn layout() -> ChartLayout {
        compute_layout(800.0, 600.0, &FDI_SEQUENCE)
    }

    fn draw_all(snap: &ChartSnapshot) -> DisplayList {
        let layout = layout();
        let mut list = DisplayList::new();
        for c in &snap.conditions {
            draw_condition(&mut list, &layout, c);
        }
        for b in &snap.bridges {
            draw_bridge(&mut list, &layout, b);
        }
        for i in &snap.indicators {
            draw_indicator(&mut list, &layout, i);
        }
        list
    }

    #[test]
    fn amalgam_fills_one_region() {
        let layout = layout();
        let snap = ChartSnapshot::new().upsert_condition(
            t("16"),
            Some(Surface::Middle),
            ConditionCode::Amalgam,
        );
        let list = draw_all(&snap);
        let region = layout.get(t("16")).unwrap().region(Surface::Middle);
        assert_eq!(list.len(), 1);
        assert!(matches!(
            &list.ops()[0],
            DrawOp::FillPolygon { points, .. } if points.as_slice() == region.points()
        ));
    }

    #[test]
    fn every_condition_code_draws_something() {
        for code in ConditionCode::ALL {
            let surface = code.is_surface().then_some(Surface::Top);
            let snap = ChartSnapshot::new().upsert_condition(t("26"), surface, code);
            assert!(!draw_all(&snap).is_empty(), "{code} drew nothing");
        }
    }

    #[test]
    fn badges_use_the_code_text() {
        let snap = ChartSnapshot::new().upsert_condition(t("45"), None, ConditionCode::Implant);
        let list = draw_all(&snap);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["IPX"]);
    }

    #[test]
    fn root_triangle_points_away_from_crown() {
        let layout = layout();
        let snap = ChartSnapshot::new()
            .upsert_condition(t("16"), None, ConditionCode::RootCanal)
            .upsert_condition(t("46"), None, ConditionCode::RootCanal);
        let list = draw_all(&snap);
        let apexes: Vec<f32> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillPolygon { points, .. } => Some(points[2].y),
                _ => None,
            })
            .collect();
        assert!(apexes[0] < layout.get(t("16")).unwrap().bounds.y1);
        assert!(apexes[1] > layout.get(t("46")).unwrap().bounds.y2);
    }

    #[test]
    fn sealant_hatch_stays_inside_region() {
        let layout = layout();
        let quad = *layout.get(t("36")).unwrap().region(Surface::Left);
        let lines = hatch_lines(&quad, Hatch::Diagonal, 3.0);
        assert!(!lines.is_empty());
        let b = quad.bounds();
        for (a, z) in lines {
            for p in [a, z] {
                assert!(p.x >= b.x1 - 1e-3 && p.x <= b.x2 + 1e-3);
                assert!(p.y >= b.y1 - 1e-3 && p.y <= b.y2 + 1e-3);
            }
        }
    }

    #[test]
    fn bridge_draws_struts_and_bar() {
        let layout = layout();
        let snap = ChartSnapshot::new().upsert_bridge(t("11"), t("21"));
        let list = draw_all(&snap);
        // two verticals plus the joining bar
        assert_eq!(list.len(), 3);
        let DrawOp::Polyline { points, .. } = &list.ops()[2] else {
            panic!("expected a line");
        };
        assert_eq!(points[0].x, layout.get(t("11")).unwrap().center.x);
        assert_eq!(points[1].x, layout.get(t("21")).unwrap().center.x);
    }

    #[test]
    fn unknown_teeth_are_skipped() {
        let snap = ChartSnapshot::new()
            .upsert_condition(t("99"), None, ConditionCode::Missing)
            .upsert_bridge(t("11"), t("99"))
            .upsert_indicator(t("99"), IndicatorType::ArrowTopLeft);
        assert!(draw_all(&snap).is_empty());
    }

    #[test]
    fn arrows_follow_their_type() {
        let layout = layout();
        let tooth = layout.get(t("14")).unwrap();
        for kind in IndicatorType::ALL {
            let snap = ChartSnapshot::new().upsert_indicator(t("14"), kind);
            let list = draw_all(&snap);
            let DrawOp::Polyline { points, .. } = &list.ops()[0] else {
                panic!("expected a shaft");
            };
            let (tail, tip) = (points[0], points[1]);
            assert_eq!(tip.x < tail.x, kind.points_left(), "{kind}");
            assert_eq!(tail.y < tooth.bounds.y1, kind.is_top(), "{kind}");
            assert!(matches!(list.ops()[1], DrawOp::FillPolygon { .. }));
        }
    }
}
