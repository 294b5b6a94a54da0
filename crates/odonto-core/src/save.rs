//! Save boundary: snapshot → per-family batches.

use crate::model::{Bridge, ChartSnapshot, Condition, Indicator, position_key};
use serde::Serialize;

/// What gets handed to the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaveBatches {
    pub conditions: Vec<Condition>,
    pub bridges: Vec<Bridge>,
    pub indicators: Vec<Indicator>,
    /// Bridges left out because they span fewer than two teeth.
    #[serde(skip)]
    pub dropped_bridges: usize,
}

impl SaveBatches {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.bridges.is_empty() && self.indicators.is_empty()
    }
}

/// Split a snapshot into save batches.
///
/// Codes are already canonical strings by construction. Position keys are
/// rebuilt, bridges are normalized to carry both field conventions, and
/// bridges with fewer than two distinct teeth are dropped.
pub fn prepare_save(snapshot: &ChartSnapshot) -> SaveBatches {
    let conditions = snapshot
        .conditions
        .iter()
        .map(|c| {
            let mut c = c.clone();
            c.pos = position_key(c.tooth, c.surface);
            c
        })
        .collect();

    let mut dropped_bridges = 0;
    let bridges = snapshot
        .bridges
        .iter()
        .filter_map(|b| {
            let mut b = b.clone();
            b.normalize();
            if b.is_valid() {
                Some(b)
            } else {
                log::warn!("dropping bridge {:?}: fewer than two teeth", b.name);
                dropped_bridges += 1;
                None
            }
        })
        .collect();

    let batches = SaveBatches {
        conditions,
        bridges,
        indicators: snapshot.indicators.clone(),
        dropped_bridges,
    };
    log::debug!(
        "save: {} conditions, {} bridges, {} indicators",
        batches.conditions.len(),
        batches.bridges.len(),
        batches.indicators.len()
    );
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ConditionCode;
    use crate::tooth::{Surface, ToothId};
    use pretty_assertions::assert_eq;

    #[test]
    fn invalid_bridges_are_dropped() {
        let snap = ChartSnapshot::from_json(
            r#"{"bridges": [
                {"from": "11", "to": "21"},
                {"connected_teeth": ["13"]},
                {"connected_teeth": ["14", "14"]}
            ]}"#,
        )
        .unwrap();
        let batches = prepare_save(&snap);
        assert_eq!(batches.bridges.len(), 1);
        assert_eq!(batches.dropped_bridges, 2);
    }

    #[test]
    fn conditions_keep_canonical_codes() {
        let snap = ChartSnapshot::new().upsert_condition(
            ToothId::intern("16"),
            Some(Surface::Top),
            ConditionCode::Sealant,
        );
        let json = serde_json::to_value(prepare_save(&snap)).unwrap();
        assert_eq!(json["conditions"][0]["condition"], "FIS");
        assert_eq!(json["conditions"][0]["pos"], "16-T");
        assert_eq!(json["conditions"][0]["surface"], "T");
        assert!(json.get("dropped_bridges").is_none());
    }
}
