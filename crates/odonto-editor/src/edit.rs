//! Chart edits: every mutation the editor can make, as a value.

use odonto_core::{
    ChartSnapshot, ConditionCode, IndicatorType, Surface, ToothId, model::position_key,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEdit {
    UpsertCondition {
        tooth: ToothId,
        surface: Option<Surface>,
        code: ConditionCode,
    },
    UpsertBridge {
        a: ToothId,
        b: ToothId,
    },
    UpsertIndicator {
        tooth: ToothId,
        kind: IndicatorType,
    },
    /// Erase at a tooth; without a surface this cascades over the whole tooth.
    Delete {
        tooth: ToothId,
        surface: Option<Surface>,
    },
    Reset,
}

/// Apply one edit, consuming the old snapshot.
pub fn apply_edit(snapshot: ChartSnapshot, edit: &ChartEdit) -> ChartSnapshot {
    log::debug!("edit: {edit}");
    match *edit {
        ChartEdit::UpsertCondition {
            tooth,
            surface,
            code,
        } => snapshot.upsert_condition(tooth, surface, code),
        ChartEdit::UpsertBridge { a, b } => snapshot.upsert_bridge(a, b),
        ChartEdit::UpsertIndicator { tooth, kind } => snapshot.upsert_indicator(tooth, kind),
        ChartEdit::Delete { tooth, surface } => snapshot.delete_at(tooth, surface),
        ChartEdit::Reset => snapshot.reset(),
    }
}

impl fmt::Display for ChartEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ChartEdit::UpsertCondition {
                tooth,
                surface,
                code,
            } => write!(f, "{code} at {}", position_key(tooth, surface)),
            ChartEdit::UpsertBridge { a, b } => write!(f, "bridge {a}-{b}"),
            ChartEdit::UpsertIndicator { tooth, kind } => write!(f, "{kind} at {tooth}"),
            ChartEdit::Delete { tooth, surface } => {
                write!(f, "erase {}", position_key(tooth, surface))
            }
            ChartEdit::Reset => f.write_str("reset"),
        }
    }
}
