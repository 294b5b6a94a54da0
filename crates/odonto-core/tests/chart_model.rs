//! Integration tests: chart edits → worklists → save batches.

use odonto_core::*;
use pretty_assertions::assert_eq;

fn t(s: &str) -> ToothId {
    ToothId::intern(s)
}

fn legacy() -> ChartSnapshot {
    ChartSnapshot::from_json(include_str!("fixtures/legacy_chart.json"))
        .expect("fixture should parse")
}

// ─── Edits ───────────────────────────────────────────────────────────────

#[test]
fn upserts_are_idempotent() {
    let once = ChartSnapshot::new()
        .upsert_condition(t("16"), Some(Surface::Top), ConditionCode::Caries)
        .upsert_bridge(t("11"), t("21"))
        .upsert_indicator(t("14"), IndicatorType::ArrowTopTurnLeft);
    let twice = once
        .clone()
        .upsert_condition(t("16"), Some(Surface::Top), ConditionCode::Caries)
        .upsert_bridge(t("21"), t("11"))
        .upsert_indicator(t("14"), IndicatorType::ArrowTopTurnLeft);
    assert_eq!(once, twice);
}

#[test]
fn whole_tooth_delete_removes_every_reference() {
    let snap = ChartSnapshot::new()
        .upsert_condition(t("11"), Some(Surface::Top), ConditionCode::Caries)
        .upsert_condition(t("11"), Some(Surface::Left), ConditionCode::Composite)
        .upsert_condition(t("12"), None, ConditionCode::Missing)
        .upsert_bridge(t("11"), t("21"))
        .upsert_bridge(t("12"), t("22"))
        .upsert_indicator(t("11"), IndicatorType::ArrowTopLeft);

    let before = snap.len();
    let refs = snap.references(t("11"));
    assert_eq!(refs, 4);

    let after = snap.delete_at(t("11"), None);
    assert_eq!(after.len(), before - refs);
    assert_eq!(after.references(t("11")), 0);
    assert_eq!(after.bridges.len(), 1);
    assert_eq!(after.conditions[0].pos, "12");
}

#[test]
fn delete_matches_legacy_bridge_fields() {
    let mut snap = ChartSnapshot::new().upsert_bridge(t("11"), t("21"));
    snap.bridges[0].connected_teeth.clear();
    let snap = snap.delete_at(t("21"), None);
    assert!(snap.bridges.is_empty());
}

#[test]
fn reset_clears_everything() {
    let snap = legacy().reset();
    assert!(snap.is_empty());
    assert_eq!(snap, ChartSnapshot::default());
}

#[test]
fn chart_session_end_to_end() {
    let snap = ChartSnapshot::new()
        .upsert_condition(t("16"), Some(Surface::Top), ConditionCode::Caries)
        .upsert_bridge(t("11"), t("21"));
    assert_eq!(snap.conditions.len(), 1);
    assert_eq!(snap.bridges.len(), 1);

    let snap = snap.delete_at(t("16"), None);
    assert!(snap.conditions.is_empty());
    assert_eq!(snap.bridges.len(), 1);

    let batches = prepare_save(&snap);
    assert_eq!(batches.bridges[0].from, Some(t("11")));
    assert_eq!(batches.bridges[0].to, Some(t("21")));
    assert_eq!(batches.dropped_bridges, 0);
}

// ─── Legacy payloads ─────────────────────────────────────────────────────

#[test]
fn legacy_fixture_is_normalized() {
    let snap = legacy();
    assert_eq!(snap.conditions.len(), 6, "tooth-less condition skipped");
    assert_eq!(snap.bridges.len(), 4);
    assert_eq!(snap.indicators.len(), 2);

    let c1 = &snap.conditions[0];
    assert_eq!(c1.surface, Some(Surface::Top));
    assert_eq!(c1.condition, ConditionCode::Caries);

    let c2 = &snap.conditions[1];
    assert_eq!(c2.tooth, t("26"));
    assert_eq!(c2.condition, ConditionCode::RootCanal);
    assert_eq!(c2.pos, "26");

    assert_eq!(snap.conditions[2].pos, "36-M");

    let c5 = &snap.conditions[4];
    assert_eq!(c5.pos, "17-L");
    let status = c5.active_treatment.as_ref().map(|tr| tr.status);
    assert_eq!(status, Some(TreatmentState::Unknown));
    assert_eq!(snap.conditions[5].condition, ConditionCode::DEFAULT);

    let b1 = &snap.bridges[0];
    assert_eq!(b1.connected_teeth.as_slice(), &[t("11"), t("21")]);
    assert_eq!(b1.bridge_type, "porcelain");
    let b2 = &snap.bridges[1];
    assert_eq!(b2.from, Some(t("34")));
    assert_eq!(b2.to, Some(t("36")));
    let b4 = &snap.bridges[3];
    assert_eq!(b4.primary_diagnosis.as_ref().map(|d| d.icd_code.as_str()), Some(""));

    assert_eq!(snap.indicators[0].tooth, t("14"));
    assert_eq!(
        snap.indicators[0].indicator_type,
        IndicatorType::ArrowTopTurnLeft
    );
}

#[test]
fn snapshot_json_roundtrip_is_stable() {
    let snap = legacy();
    let json = snap.to_json().unwrap();
    let back = ChartSnapshot::from_json(&json).unwrap();
    assert_eq!(back, snap);
    assert_eq!(back.to_json().unwrap(), json);
}

#[test]
fn save_batches_from_legacy_fixture() {
    let batches = prepare_save(&legacy());
    assert_eq!(batches.conditions.len(), 6);
    assert_eq!(batches.bridges.len(), 3);
    assert_eq!(batches.dropped_bridges, 1);

    let json = serde_json::to_value(&batches).unwrap();
    assert_eq!(json["conditions"][1]["condition"], "RCT");
    assert_eq!(json["indicators"][0]["type"], "arrow_top_turn_left");
    assert_eq!(json["indicators"][0]["indicator_type"], "arrow_top_turn_left");
    assert_eq!(json["indicators"][0]["tooth_number"], "14");
}

// ─── Worklists ───────────────────────────────────────────────────────────

#[test]
fn legacy_fixture_worklists() {
    let snap = legacy();
    let lists = partition(&snap);
    let ids = |w: Worklist| -> Vec<String> {
        lists
            .get(w)
            .iter()
            .map(|item| match item {
                ChartItem::Condition(c) => c.id.clone(),
                ChartItem::Bridge(b) => b.id.clone(),
                ChartItem::Indicator(i) => i.id.clone(),
            })
            .map(Option::unwrap_or_default)
            .collect()
    };

    assert_eq!(
        ids(Worklist::NeedsAction),
        vec!["c-1", "c-3", "c-5", "c-6", "b-2", "b-3", "i-1", "i-2"]
    );
    assert_eq!(ids(Worklist::InProgressTreatment), vec!["c-2"]);
    assert_eq!(ids(Worklist::PlannedTreatment), vec!["c-5", "b-1"]);
    assert_eq!(ids(Worklist::WithoutDiagnosis), vec!["c-4"]);
    assert_eq!(ids(Worklist::DiagnosedUntreated), vec!["b-4"]);
    assert!(ids(Worklist::CompletedTreatment).is_empty());
}
