//! Clinical status derivation and worklist partitioning.
//!
//! Every charted item gets a diagnosis status and a treatment status. Six
//! worklists are defined as predicates over that classification; an item can
//! sit in more than one list.

use crate::model::{Bridge, ChartSnapshot, Condition, Indicator, Treatment, TreatmentState};
use crate::tooth::ToothId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisStatus {
    /// Nothing recorded yet; the clinician still has to decide.
    NeedsDiagnosis,
    /// Explicitly marked as needing no diagnosis.
    NoDiagnosis,
    HasDiagnosis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentStatus {
    NoTreatment,
    NeedsTreatment,
    TreatmentInProgress,
    TreatmentCompleted,
    TreatmentCancelled,
}

impl From<TreatmentState> for TreatmentStatus {
    fn from(state: TreatmentState) -> Self {
        match state {
            TreatmentState::Planned => TreatmentStatus::NeedsTreatment,
            TreatmentState::InProgress => TreatmentStatus::TreatmentInProgress,
            TreatmentState::Completed => TreatmentStatus::TreatmentCompleted,
            TreatmentState::Cancelled => TreatmentStatus::TreatmentCancelled,
            // Unrecognized backend statuses stay on the planned worklist.
            TreatmentState::Unknown => TreatmentStatus::NeedsTreatment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Classification {
    pub diagnosis: DiagnosisStatus,
    pub treatment: TreatmentStatus,
}

/// Borrowed view over any charted item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartItem<'a> {
    Condition(&'a Condition),
    Bridge(&'a Bridge),
    Indicator(&'a Indicator),
}

impl<'a> ChartItem<'a> {
    /// The item's anchor tooth (a bridge's first tooth).
    pub fn tooth(&self) -> Option<ToothId> {
        match self {
            ChartItem::Condition(c) => Some(c.tooth),
            ChartItem::Bridge(b) => b.teeth().first().copied(),
            ChartItem::Indicator(i) => Some(i.tooth),
        }
    }

    pub fn id(&self) -> Option<&'a str> {
        match *self {
            ChartItem::Condition(c) => c.id.as_deref(),
            ChartItem::Bridge(b) => b.id.as_deref(),
            ChartItem::Indicator(i) => i.id.as_deref(),
        }
    }

    /// Short human label, e.g. `"16-T CAR"` or `"Bridge 11-21"`.
    pub fn label(&self) -> String {
        match self {
            ChartItem::Condition(c) => format!("{} {}", c.pos, c.condition),
            ChartItem::Bridge(b) => b.name.clone(),
            ChartItem::Indicator(i) => format!("{} {}", i.tooth, i.indicator_type),
        }
    }

    pub fn family(&self) -> &'static str {
        match self {
            ChartItem::Condition(_) => "condition",
            ChartItem::Bridge(_) => "bridge",
            ChartItem::Indicator(_) => "indicator",
        }
    }
}

impl ChartSnapshot {
    /// Conditions, then bridges, then indicators.
    pub fn items(&self) -> impl Iterator<Item = ChartItem<'_>> {
        self.conditions
            .iter()
            .map(ChartItem::Condition)
            .chain(self.bridges.iter().map(ChartItem::Bridge))
            .chain(self.indicators.iter().map(ChartItem::Indicator))
    }
}

// ─── Classification ──────────────────────────────────────────────────────

fn derived_diagnosis(primary: bool) -> DiagnosisStatus {
    if primary {
        DiagnosisStatus::HasDiagnosis
    } else {
        DiagnosisStatus::NeedsDiagnosis
    }
}

fn derived_treatment(treatment: Option<&Treatment>) -> TreatmentStatus {
    treatment.map_or(TreatmentStatus::NoTreatment, |t| t.status.into())
}

/// Classify one item.
///
/// Conditions and indicators use their explicit status fields when present
/// and otherwise derive them like bridges do: from the primary diagnosis and
/// the active treatment.
pub fn classify(item: ChartItem<'_>) -> Classification {
    match item {
        ChartItem::Condition(c) => Classification {
            diagnosis: c
                .diagnosis_status
                .unwrap_or_else(|| derived_diagnosis(c.primary_diagnosis.is_some())),
            treatment: c
                .treatment_status
                .unwrap_or_else(|| derived_treatment(c.active_treatment.as_ref())),
        },
        ChartItem::Indicator(i) => Classification {
            diagnosis: i
                .diagnosis_status
                .unwrap_or_else(|| derived_diagnosis(i.primary_diagnosis.is_some())),
            treatment: i
                .treatment_status
                .unwrap_or_else(|| derived_treatment(i.active_treatment.as_ref())),
        },
        ChartItem::Bridge(b) => Classification {
            diagnosis: derived_diagnosis(b.primary_diagnosis.is_some()),
            treatment: derived_treatment(b.treatment.as_ref()),
        },
    }
}

// ─── Worklists ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Worklist {
    NeedsAction,
    DiagnosedUntreated,
    WithoutDiagnosis,
    PlannedTreatment,
    InProgressTreatment,
    CompletedTreatment,
}

impl Worklist {
    pub const ALL: [Worklist; 6] = [
        Worklist::NeedsAction,
        Worklist::DiagnosedUntreated,
        Worklist::WithoutDiagnosis,
        Worklist::PlannedTreatment,
        Worklist::InProgressTreatment,
        Worklist::CompletedTreatment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Worklist::NeedsAction => "Needs action",
            Worklist::DiagnosedUntreated => "Diagnosed, no treatment",
            Worklist::WithoutDiagnosis => "No diagnosis needed",
            Worklist::PlannedTreatment => "Planned",
            Worklist::InProgressTreatment => "In progress",
            Worklist::CompletedTreatment => "Completed",
        }
    }

    pub fn accepts(self, c: Classification) -> bool {
        match self {
            Worklist::NeedsAction => c.diagnosis == DiagnosisStatus::NeedsDiagnosis,
            Worklist::DiagnosedUntreated => {
                c.diagnosis == DiagnosisStatus::HasDiagnosis
                    && c.treatment == TreatmentStatus::NoTreatment
            }
            Worklist::WithoutDiagnosis => c.diagnosis == DiagnosisStatus::NoDiagnosis,
            Worklist::PlannedTreatment => c.treatment == TreatmentStatus::NeedsTreatment,
            Worklist::InProgressTreatment => c.treatment == TreatmentStatus::TreatmentInProgress,
            Worklist::CompletedTreatment => c.treatment == TreatmentStatus::TreatmentCompleted,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Items grouped by worklist, in snapshot order within each list.
#[derive(Debug, Clone, Default)]
pub struct Worklists<'a> {
    lists: [Vec<ChartItem<'a>>; 6],
}

impl<'a> Worklists<'a> {
    pub fn get(&self, list: Worklist) -> &[ChartItem<'a>] {
        &self.lists[list.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Worklist, &[ChartItem<'a>])> {
        Worklist::ALL.into_iter().map(move |w| (w, self.get(w)))
    }
}

/// Sort every item of the snapshot into the worklists it belongs to.
pub fn partition(snapshot: &ChartSnapshot) -> Worklists<'_> {
    let mut out = Worklists::default();
    for item in snapshot.items() {
        let class = classify(item);
        for list in Worklist::ALL {
            if list.accepts(class) {
                out.lists[list.index()].push(item);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Diagnosis;
    use crate::mode::{ConditionCode, IndicatorType};
    use crate::tooth::Surface;
    use pretty_assertions::assert_eq;

    fn tooth(s: &str) -> ToothId {
        ToothId::intern(s)
    }

    fn diagnosis() -> Diagnosis {
        Diagnosis {
            id: None,
            icd_code: "K02.1".into(),
            description: "Caries of dentine".into(),
        }
    }

    fn treatment(status: TreatmentState) -> Treatment {
        Treatment {
            id: None,
            procedure: "Composite filling".into(),
            status,
            notes: None,
        }
    }

    #[test]
    fn bare_items_need_diagnosis() {
        let snap = ChartSnapshot::new()
            .upsert_condition(tooth("16"), Some(Surface::Top), ConditionCode::Caries)
            .upsert_bridge(tooth("11"), tooth("21"))
            .upsert_indicator(tooth("14"), IndicatorType::ArrowTopLeft);
        for item in snap.items() {
            assert_eq!(
                classify(item),
                Classification {
                    diagnosis: DiagnosisStatus::NeedsDiagnosis,
                    treatment: TreatmentStatus::NoTreatment,
                }
            );
        }
        let lists = partition(&snap);
        assert_eq!(lists.get(Worklist::NeedsAction).len(), 3);
        assert!(lists.get(Worklist::DiagnosedUntreated).is_empty());
    }

    #[test]
    fn bridge_treatment_states_map_to_statuses() {
        let cases = [
            (TreatmentState::Planned, TreatmentStatus::NeedsTreatment),
            (TreatmentState::InProgress, TreatmentStatus::TreatmentInProgress),
            (TreatmentState::Completed, TreatmentStatus::TreatmentCompleted),
            (TreatmentState::Cancelled, TreatmentStatus::TreatmentCancelled),
            (TreatmentState::Unknown, TreatmentStatus::NeedsTreatment),
        ];
        for (state, expected) in cases {
            let mut bridge = Bridge::new(tooth("11"), tooth("21"));
            bridge.primary_diagnosis = Some(diagnosis());
            bridge.treatment = Some(treatment(state));
            let class = classify(ChartItem::Bridge(&bridge));
            assert_eq!(class.diagnosis, DiagnosisStatus::HasDiagnosis);
            assert_eq!(class.treatment, expected);
        }
    }

    #[test]
    fn explicit_condition_status_wins() {
        let mut cond = Condition::new(tooth("36"), None, ConditionCode::Missing);
        cond.primary_diagnosis = Some(diagnosis());
        cond.diagnosis_status = Some(DiagnosisStatus::NoDiagnosis);
        let class = classify(ChartItem::Condition(&cond));
        assert_eq!(class.diagnosis, DiagnosisStatus::NoDiagnosis);
        assert_eq!(class.treatment, TreatmentStatus::NoTreatment);
    }

    #[test]
    fn items_land_in_every_matching_list() {
        let mut snap = ChartSnapshot::new()
            .upsert_condition(tooth("16"), Some(Surface::Top), ConditionCode::Caries)
            .upsert_condition(tooth("26"), None, ConditionCode::RootCanal)
            .upsert_condition(tooth("46"), None, ConditionCode::Missing);
        snap.conditions[0].primary_diagnosis = Some(diagnosis());
        snap.conditions[1].primary_diagnosis = Some(diagnosis());
        snap.conditions[1].active_treatment = Some(treatment(TreatmentState::InProgress));
        snap.conditions[2].diagnosis_status = Some(DiagnosisStatus::NoDiagnosis);
        snap.conditions[2].treatment_status = Some(TreatmentStatus::TreatmentCompleted);

        let lists = partition(&snap);
        let labels = |w| -> Vec<String> { lists.get(w).iter().map(|i| i.label()).collect() };

        assert_eq!(labels(Worklist::DiagnosedUntreated), vec!["16-T CAR"]);
        assert_eq!(labels(Worklist::InProgressTreatment), vec!["26 RCT"]);
        assert_eq!(labels(Worklist::WithoutDiagnosis), vec!["46 MIS"]);
        assert_eq!(labels(Worklist::CompletedTreatment), vec!["46 MIS"]);
        assert!(labels(Worklist::NeedsAction).is_empty());
        assert!(labels(Worklist::PlannedTreatment).is_empty());
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TreatmentStatus::TreatmentInProgress).unwrap(),
            "\"treatment_in_progress\""
        );
        let s: DiagnosisStatus = serde_json::from_str("\"needs_diagnosis\"").unwrap();
        assert_eq!(s, DiagnosisStatus::NeedsDiagnosis);
    }
}
