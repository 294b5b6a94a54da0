//! Interaction controller.
//!
//! Pure transitions over an `InteractionState` value: a pointer event goes
//! through the hit tester, the active mode decides what it means, and the
//! result is a new state plus at most one `ChartEdit`. Nothing here touches
//! the chart snapshot; the caller applies the edit.
//!
//! | Mode | Click on a tooth |
//! |------|------------------|
//! | none | nothing |
//! | erase | delete everything on the tooth |
//! | surface condition | upsert on the clicked surface |
//! | whole-tooth condition | upsert on the tooth |
//! | indicator | upsert arrow on the tooth |
//! | bridge | 1st click: remember start; 2nd click elsewhere: bridge; same tooth: cancel |

use crate::edit::ChartEdit;
use odonto_core::{ChartLayout, Mode, ToothId};
use odonto_render::{HitTarget, Overlay, hit_test};

/// Cursor affordance for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub mode: Mode,
    pub hovered: Option<HitTarget>,
    /// First tooth of a bridge being placed.
    pub bridge_start: Option<ToothId>,
}

impl InteractionState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn cursor(&self) -> Cursor {
        if self.hovered.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    pub fn overlay(&self) -> Overlay {
        Overlay {
            mode: self.mode,
            hovered: self.hovered,
            bridge_start: self.bridge_start,
        }
    }
}

/// Switch modes. Any pending bridge start is dropped.
#[must_use]
pub fn set_mode(state: InteractionState, mode: Mode) -> InteractionState {
    if state.bridge_start.is_some() && mode != state.mode {
        log::debug!("mode {} → {mode}: pending bridge dropped", state.mode);
    }
    InteractionState {
        mode,
        // surface vs whole-tooth targeting may differ in the new mode
        hovered: None,
        bridge_start: None,
    }
}

/// Drop a pending bridge start, keeping mode and hover.
#[must_use]
pub fn cancel(state: InteractionState) -> InteractionState {
    InteractionState {
        bridge_start: None,
        ..state
    }
}

#[must_use]
pub fn pointer_move(
    state: InteractionState,
    layout: &ChartLayout,
    x: f32,
    y: f32,
) -> InteractionState {
    let hovered = match state.mode {
        Mode::None => None,
        mode => hit_test(layout, mode, x, y),
    };
    InteractionState { hovered, ..state }
}

#[must_use]
pub fn pointer_leave(state: InteractionState) -> InteractionState {
    InteractionState {
        hovered: None,
        ..state
    }
}

/// Interpret a click. Misses change nothing.
pub fn pointer_click(
    state: InteractionState,
    layout: &ChartLayout,
    x: f32,
    y: f32,
) -> (InteractionState, Option<ChartEdit>) {
    if state.mode == Mode::None {
        return (state, None);
    }
    let Some(hit) = hit_test(layout, state.mode, x, y) else {
        return (state, None);
    };

    let edit = match state.mode {
        Mode::None => None,
        Mode::Erase => Some(ChartEdit::Delete {
            tooth: hit.tooth,
            surface: hit.surface,
        }),
        Mode::Condition(code) => Some(ChartEdit::UpsertCondition {
            tooth: hit.tooth,
            surface: if code.is_surface() { hit.surface } else { None },
            code,
        }),
        Mode::Indicator(kind) => Some(ChartEdit::UpsertIndicator {
            tooth: hit.tooth,
            kind,
        }),
        Mode::Bridge => {
            return bridge_click(state, hit.tooth);
        }
    };
    (state, edit)
}

fn bridge_click(state: InteractionState, tooth: ToothId) -> (InteractionState, Option<ChartEdit>) {
    match state.bridge_start {
        None => {
            log::debug!("bridge start at {tooth}");
            (
                InteractionState {
                    bridge_start: Some(tooth),
                    ..state
                },
                None,
            )
        }
        Some(start) if start == tooth => {
            log::debug!("bridge start at {tooth} cancelled");
            (cancel(state), None)
        }
        Some(start) => (
            cancel(state),
            Some(ChartEdit::UpsertBridge { a: start, b: tooth }),
        ),
    }
}
