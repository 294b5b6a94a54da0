//! Hit testing: point → tooth (and surface) lookup.
//!
//! Scans tooth boxes first, then resolves the surface region inside the box
//! unless the active mode works on whole teeth.

use odonto_core::{ChartLayout, Mode, Point, Surface, ToothId, ToothLayout};

/// What a pointer position resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitTarget {
    pub tooth: ToothId,
    /// `None` for whole-tooth modes.
    pub surface: Option<Surface>,
}

/// Find the tooth (and surface, for surface modes) at `(px, py)`.
/// Returns `None` if the point misses every tooth box.
pub fn hit_test(layout: &ChartLayout, mode: Mode, px: f32, py: f32) -> Option<HitTarget> {
    let p = Point::new(px, py);
    let tooth = layout.iter().find(|t| t.bounds.contains(p))?;

    let surface = if mode.is_whole_tooth() {
        None
    } else {
        Some(resolve_surface(tooth, p))
    };

    Some(HitTarget {
        tooth: tooth.tooth,
        surface,
    })
}

/// Region containing `p`, which must lie inside the tooth box.
///
/// Falls back to the nearest region centroid if rounding leaves the point in
/// no region.
pub fn resolve_surface(tooth: &ToothLayout, p: Point) -> Surface {
    if let Some((surface, _)) = tooth.surfaces().find(|(_, quad)| quad.contains(p)) {
        return surface;
    }
    let nearest = tooth
        .surfaces()
        .map(|(s, quad)| (s, quad.centroid().distance_sq(p)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(Surface::Middle, |(s, _)| s);
    log::trace!("hit {} fell between regions, using {nearest}", tooth.tooth);
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use odonto_core::{ConditionCode, FDI_SEQUENCE, IndicatorType, compute_layout};
    use pretty_assertions::assert_eq;

    fn layout() -> ChartLayout {
        compute_layout(800.0, 600.0, &FDI_SEQUENCE)
    }

    const CARIES: Mode = Mode::Condition(ConditionCode::Caries);

    #[test]
    fn hit_each_surface_of_a_molar() {
        let layout = layout();
        let t = layout.get(ToothId::intern("16")).unwrap();
        let b = t.bounds;
        let q = t.big / 8.0;
        let cases = [
            (t.center.x, b.y1 + q, Surface::Top),
            (b.x2 - q, t.center.y, Surface::Right),
            (t.center.x, b.y2 - q, Surface::Bottom),
            (b.x1 + q, t.center.y, Surface::Left),
            (t.center.x, t.center.y, Surface::Middle),
        ];
        for (x, y, expected) in cases {
            assert_eq!(
                hit_test(&layout, CARIES, x, y),
                Some(HitTarget {
                    tooth: ToothId::intern("16"),
                    surface: Some(expected),
                })
            );
        }
    }

    #[test]
    fn whole_tooth_modes_skip_regions() {
        let layout = layout();
        let t = layout.get(ToothId::intern("36")).unwrap();
        let (x, y) = (t.center.x, t.center.y);
        for mode in [
            Mode::Erase,
            Mode::Bridge,
            Mode::Condition(ConditionCode::Missing),
            Mode::Indicator(IndicatorType::ArrowBottomLeft),
        ] {
            let hit = hit_test(&layout, mode, x, y).unwrap();
            assert_eq!(hit.tooth, ToothId::intern("36"));
            assert_eq!(hit.surface, None, "{mode}");
        }
    }

    #[test]
    fn gaps_and_background_miss() {
        let layout = layout();
        let t11 = layout.get(ToothId::intern("11")).unwrap().bounds;
        let t21 = layout.get(ToothId::intern("21")).unwrap().bounds;
        let midline = (t11.x2 + t21.x1) / 2.0;
        assert_eq!(hit_test(&layout, CARIES, midline, t11.center().y), None);
        assert_eq!(hit_test(&layout, CARIES, 1.0, 1.0), None);
    }

    #[test]
    fn every_point_in_a_box_resolves() {
        let layout = layout();
        for tooth in layout.iter() {
            let b = tooth.bounds;
            for i in 0..9 {
                for j in 0..9 {
                    let x = b.x1 + b.width() * (i as f32 + 0.5) / 9.0;
                    let y = b.y1 + b.height() * (j as f32 + 0.5) / 9.0;
                    let hit = hit_test(&layout, CARIES, x, y);
                    assert_eq!(hit.map(|h| h.tooth), Some(tooth.tooth));
                    assert!(hit.and_then(|h| h.surface).is_some());
                }
            }
        }
    }
}
