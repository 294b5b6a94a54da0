//! Transient feedback drawn on top of the chart: hover highlight and the
//! bridge preview.

use crate::hit::HitTarget;
use crate::surface::DrawSurface;
use crate::symbols::draw_struts;
use crate::theme::ChartTheme;
use odonto_core::{ChartLayout, Mode, ToothId};

/// Interaction feedback for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overlay {
    pub mode: Mode,
    pub hovered: Option<HitTarget>,
    pub bridge_start: Option<ToothId>,
}

pub fn draw_overlay<S: DrawSurface + ?Sized>(
    out: &mut S,
    layout: &ChartLayout,
    theme: &ChartTheme,
    overlay: &Overlay,
) {
    let hovered = overlay
        .hovered
        .and_then(|hit| layout.get(hit.tooth).map(|t| (hit, t)));

    if let Some((hit, tooth)) = hovered {
        match hit.surface {
            Some(surface) => out.fill_polygon(tooth.region(surface).points(), theme.hover),
            None => out.fill_polygon(&tooth.bounds.corners(), theme.hover),
        }
    }

    if overlay.mode != Mode::Bridge {
        return;
    }
    let Some(start) = overlay.bridge_start.and_then(|t| layout.get(t)) else {
        return;
    };
    out.stroke_polygon(&start.bounds.corners(), theme.preview, 2.0);
    if let Some((_, end)) = hovered
        && end.tooth != start.tooth
    {
        draw_struts(out, &[start, end], theme.preview, 2.0);
    }
}
