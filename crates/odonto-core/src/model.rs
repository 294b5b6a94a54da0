//! Chart data model.
//!
//! A `ChartSnapshot` holds three item families: conditions (per tooth or per
//! tooth surface), bridges (spanning two or more teeth) and indicators
//! (arrows attached to a tooth). Every edit consumes a snapshot and returns
//! the next one; there is no shared mutable chart state.
//!
//! Older payloads use different field names for bridges (`from`/`to`) and
//! indicators (`tooth_number`/`indicator_type`). Both spellings are accepted
//! on input and both are written on output.

use crate::mode::{ConditionCode, IndicatorType};
use crate::status::{DiagnosisStatus, TreatmentStatus};
use crate::tooth::{Surface, ToothId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

// ─── Clinical links ──────────────────────────────────────────────────────

/// A coded diagnosis attached to a charted item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "code")]
    pub icd_code: String,
    #[serde(default, alias = "name")]
    pub description: String,
}

/// Lifecycle of a treatment as reported by the backend.
///
/// Statuses this crate does not know deserialize to `Unknown` so the owning
/// item still loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TreatmentState {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
    Unknown,
}

impl TreatmentState {
    pub fn as_str(self) -> &'static str {
        match self {
            TreatmentState::Planned => "planned",
            TreatmentState::InProgress => "in_progress",
            TreatmentState::Completed => "completed",
            TreatmentState::Cancelled => "cancelled",
            TreatmentState::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "planned" => Some(TreatmentState::Planned),
            "in_progress" => Some(TreatmentState::InProgress),
            "completed" => Some(TreatmentState::Completed),
            "cancelled" => Some(TreatmentState::Cancelled),
            "unknown" => Some(TreatmentState::Unknown),
            _ => None,
        }
    }
}

impl Serialize for TreatmentState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TreatmentState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TreatmentState::parse(&raw).unwrap_or_else(|| {
            log::warn!("unknown treatment status {raw:?}");
            TreatmentState::Unknown
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "name")]
    pub procedure: String,
    #[serde(default)]
    pub status: TreatmentState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ─── Conditions ──────────────────────────────────────────────────────────

/// Build the position key: `"16-T"` for a surface, `"16"` for the whole tooth.
pub fn position_key(tooth: ToothId, surface: Option<Surface>) -> String {
    match surface {
        Some(s) => format!("{}-{}", tooth.as_str(), s.letter()),
        None => tooth.as_str().to_string(),
    }
}

/// A finding on one tooth surface or on the whole tooth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConditionWire")]
pub struct Condition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tooth: ToothId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<Surface>,
    pub condition: ConditionCode,
    pub pos: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub geometry: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub primary_diagnosis: Option<Diagnosis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_diagnoses: Vec<Diagnosis>,
    pub active_treatment: Option<Treatment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub treatments: Vec<Treatment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_status: Option<DiagnosisStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_status: Option<TreatmentStatus>,
}

impl Condition {
    pub fn new(tooth: ToothId, surface: Option<Surface>, condition: ConditionCode) -> Self {
        Self {
            id: None,
            tooth,
            surface,
            condition,
            pos: position_key(tooth, surface),
            geometry: Value::Null,
            notes: None,
            primary_diagnosis: None,
            secondary_diagnoses: Vec::new(),
            active_treatment: None,
            treatments: Vec::new(),
            diagnosis_status: None,
            treatment_status: None,
        }
    }
}

#[derive(Deserialize)]
struct ConditionWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(alias = "tooth_number")]
    tooth: ToothId,
    #[serde(default)]
    surface: Option<Surface>,
    #[serde(default, alias = "condition_code", alias = "code")]
    condition: Option<ConditionCode>,
    #[serde(default)]
    pos: Option<String>,
    #[serde(default)]
    geometry: Value,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    primary_diagnosis: Option<Diagnosis>,
    #[serde(default)]
    secondary_diagnoses: Vec<Diagnosis>,
    #[serde(default)]
    active_treatment: Option<Treatment>,
    #[serde(default)]
    treatments: Vec<Treatment>,
    #[serde(default)]
    diagnosis_status: Option<DiagnosisStatus>,
    #[serde(default)]
    treatment_status: Option<TreatmentStatus>,
}

impl From<ConditionWire> for Condition {
    fn from(w: ConditionWire) -> Self {
        // Payloads that only carry `pos` ("16-T") still locate their surface.
        let surface = w.surface.or_else(|| {
            let pos = w.pos.as_deref()?;
            let (_, letter) = pos.rsplit_once('-')?;
            Surface::parse(letter)
        });
        let condition = w.condition.unwrap_or_else(|| {
            log::warn!(
                "condition on tooth {} has no code, using {}",
                w.tooth.as_str(),
                ConditionCode::DEFAULT.code()
            );
            ConditionCode::DEFAULT
        });
        Self {
            id: w.id,
            tooth: w.tooth,
            surface,
            condition,
            pos: position_key(w.tooth, surface),
            geometry: w.geometry,
            notes: w.notes,
            primary_diagnosis: w.primary_diagnosis,
            secondary_diagnoses: w.secondary_diagnoses,
            active_treatment: w.active_treatment,
            treatments: w.treatments,
            diagnosis_status: w.diagnosis_status,
            treatment_status: w.treatment_status,
        }
    }
}

// ─── Bridges ─────────────────────────────────────────────────────────────

/// A prosthetic spanning two or more teeth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BridgeWire")]
pub struct Bridge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub bridge_type: String,
    pub connected_teeth: SmallVec<[ToothId; 4]>,
    /// Legacy endpoint fields, kept equal to the first/last connected tooth.
    pub from: Option<ToothId>,
    pub to: Option<ToothId>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub geometry: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub primary_diagnosis: Option<Diagnosis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_diagnoses: Vec<Diagnosis>,
    pub treatment: Option<Treatment>,
}

impl Bridge {
    pub const DEFAULT_TYPE: &'static str = "bridge";

    pub fn new(a: ToothId, b: ToothId) -> Self {
        let mut bridge = Self {
            id: None,
            name: format!("Bridge {a}-{b}"),
            bridge_type: Self::DEFAULT_TYPE.to_string(),
            connected_teeth: SmallVec::from_slice(&[a, b]),
            from: None,
            to: None,
            geometry: Value::Null,
            notes: None,
            primary_diagnosis: None,
            secondary_diagnoses: Vec::new(),
            treatment: None,
        };
        bridge.normalize();
        bridge
    }

    /// Fill whichever field convention is missing and drop duplicate teeth.
    pub fn normalize(&mut self) {
        if self.connected_teeth.is_empty() {
            self.connected_teeth.extend(self.from);
            self.connected_teeth.extend(self.to);
        }
        let mut seen: SmallVec<[ToothId; 4]> = SmallVec::new();
        self.connected_teeth.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });
        self.from = self.connected_teeth.first().copied();
        self.to = self.connected_teeth.last().copied();
    }

    /// Connected teeth, falling back to the legacy pair.
    pub fn teeth(&self) -> SmallVec<[ToothId; 4]> {
        if !self.connected_teeth.is_empty() {
            return self.connected_teeth.clone();
        }
        self.from.into_iter().chain(self.to).collect()
    }

    /// A bridge needs at least two distinct teeth.
    pub fn is_valid(&self) -> bool {
        let teeth = self.teeth();
        teeth
            .iter()
            .enumerate()
            .any(|(i, t)| teeth[..i].iter().any(|u| u != t))
    }

    /// Whether the bridge touches `tooth` under either field convention.
    pub fn references(&self, tooth: ToothId) -> bool {
        self.connected_teeth.contains(&tooth) || self.from == Some(tooth) || self.to == Some(tooth)
    }

    /// Whether the bridge spans exactly the unordered pair `{a, b}`.
    pub fn spans_pair(&self, a: ToothId, b: ToothId) -> bool {
        let modern = !self.connected_teeth.is_empty()
            && self.connected_teeth.iter().all(|t| *t == a || *t == b)
            && self.connected_teeth.contains(&a)
            && self.connected_teeth.contains(&b);
        let legacy = self.connected_teeth.is_empty()
            && matches!(
                (self.from, self.to),
                (Some(f), Some(t)) if (f == a && t == b) || (f == b && t == a)
            );
        modern || legacy
    }
}

#[derive(Deserialize)]
struct BridgeWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type", alias = "bridge_type")]
    bridge_type: Option<String>,
    #[serde(default)]
    connected_teeth: SmallVec<[ToothId; 4]>,
    #[serde(default)]
    from: Option<ToothId>,
    #[serde(default)]
    to: Option<ToothId>,
    #[serde(default)]
    geometry: Value,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    primary_diagnosis: Option<Diagnosis>,
    #[serde(default)]
    secondary_diagnoses: Vec<Diagnosis>,
    #[serde(default)]
    treatment: Option<Treatment>,
}

impl From<BridgeWire> for Bridge {
    fn from(w: BridgeWire) -> Self {
        let mut bridge = Self {
            id: w.id,
            name: w.name.unwrap_or_default(),
            bridge_type: w
                .bridge_type
                .unwrap_or_else(|| Bridge::DEFAULT_TYPE.to_string()),
            connected_teeth: w.connected_teeth,
            from: w.from,
            to: w.to,
            geometry: w.geometry,
            notes: w.notes,
            primary_diagnosis: w.primary_diagnosis,
            secondary_diagnoses: w.secondary_diagnoses,
            treatment: w.treatment,
        };
        bridge.normalize();
        if bridge.name.is_empty() {
            bridge.name = bridge
                .connected_teeth
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join("-");
            bridge.name.insert_str(0, "Bridge ");
        }
        bridge
    }
}

// ─── Indicators ──────────────────────────────────────────────────────────

/// A directional arrow attached to one tooth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndicatorWire", into = "IndicatorWire")]
pub struct Indicator {
    pub id: Option<String>,
    pub tooth: ToothId,
    pub indicator_type: IndicatorType,
    pub geometry: Value,
    pub notes: Option<String>,
    pub primary_diagnosis: Option<Diagnosis>,
    pub secondary_diagnoses: Vec<Diagnosis>,
    pub active_treatment: Option<Treatment>,
    pub treatments: Vec<Treatment>,
    pub diagnosis_status: Option<DiagnosisStatus>,
    pub treatment_status: Option<TreatmentStatus>,
}

impl Indicator {
    pub fn new(tooth: ToothId, indicator_type: IndicatorType) -> Self {
        Self {
            id: None,
            tooth,
            indicator_type,
            geometry: Value::Null,
            notes: None,
            primary_diagnosis: None,
            secondary_diagnoses: Vec::new(),
            active_treatment: None,
            treatments: Vec::new(),
            diagnosis_status: None,
            treatment_status: None,
        }
    }
}

/// Both spellings of the tooth and type fields.
#[derive(Serialize, Deserialize)]
struct IndicatorWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    tooth: Option<ToothId>,
    #[serde(default)]
    tooth_number: Option<ToothId>,
    #[serde(default, rename = "type")]
    kind: Option<IndicatorType>,
    #[serde(default)]
    indicator_type: Option<IndicatorType>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    geometry: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default)]
    primary_diagnosis: Option<Diagnosis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    secondary_diagnoses: Vec<Diagnosis>,
    #[serde(default)]
    active_treatment: Option<Treatment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    treatments: Vec<Treatment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diagnosis_status: Option<DiagnosisStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    treatment_status: Option<TreatmentStatus>,
}

impl TryFrom<IndicatorWire> for Indicator {
    type Error = String;

    fn try_from(w: IndicatorWire) -> Result<Self, Self::Error> {
        let tooth = w
            .tooth_number
            .or(w.tooth)
            .ok_or_else(|| "indicator without tooth".to_string())?;
        let indicator_type = w.indicator_type.or(w.kind).unwrap_or_else(|| {
            log::warn!(
                "indicator on {tooth} has no type, using {}",
                IndicatorType::DEFAULT
            );
            IndicatorType::DEFAULT
        });
        Ok(Self {
            id: w.id,
            tooth,
            indicator_type,
            geometry: w.geometry,
            notes: w.notes,
            primary_diagnosis: w.primary_diagnosis,
            secondary_diagnoses: w.secondary_diagnoses,
            active_treatment: w.active_treatment,
            treatments: w.treatments,
            diagnosis_status: w.diagnosis_status,
            treatment_status: w.treatment_status,
        })
    }
}

impl From<Indicator> for IndicatorWire {
    fn from(i: Indicator) -> Self {
        Self {
            id: i.id,
            tooth: Some(i.tooth),
            tooth_number: Some(i.tooth),
            kind: Some(i.indicator_type),
            indicator_type: Some(i.indicator_type),
            geometry: i.geometry,
            notes: i.notes,
            primary_diagnosis: i.primary_diagnosis,
            secondary_diagnoses: i.secondary_diagnoses,
            active_treatment: i.active_treatment,
            treatments: i.treatments,
            diagnosis_status: i.diagnosis_status,
            treatment_status: i.treatment_status,
        }
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────

/// The complete chart at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotWire")]
pub struct ChartSnapshot {
    pub conditions: Vec<Condition>,
    pub bridges: Vec<Bridge>,
    pub indicators: Vec<Indicator>,
}

impl ChartSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot, skipping (and logging) malformed items.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.bridges.is_empty() && self.indicators.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len() + self.bridges.len() + self.indicators.len()
    }

    /// Insert a condition, replacing any existing one with the same position key.
    #[must_use]
    pub fn upsert_condition(
        mut self,
        tooth: ToothId,
        surface: Option<Surface>,
        code: ConditionCode,
    ) -> Self {
        let condition = Condition::new(tooth, surface, code);
        match self.conditions.iter_mut().find(|c| c.pos == condition.pos) {
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
        self
    }

    /// Insert a bridge between `a` and `b`, replacing any bridge over the same pair.
    #[must_use]
    pub fn upsert_bridge(mut self, a: ToothId, b: ToothId) -> Self {
        let bridge = Bridge::new(a, b);
        match self.bridges.iter_mut().find(|br| br.spans_pair(a, b)) {
            Some(existing) => *existing = bridge,
            None => self.bridges.push(bridge),
        }
        self
    }

    /// Insert an indicator, replacing any with the same tooth and type.
    #[must_use]
    pub fn upsert_indicator(mut self, tooth: ToothId, indicator_type: IndicatorType) -> Self {
        let indicator = Indicator::new(tooth, indicator_type);
        match self
            .indicators
            .iter_mut()
            .find(|i| i.tooth == tooth && i.indicator_type == indicator_type)
        {
            Some(existing) => *existing = indicator,
            None => self.indicators.push(indicator),
        }
        self
    }

    /// Erase at a tooth.
    ///
    /// With a surface only the condition at that position key goes. Without
    /// one, every condition, bridge and indicator referencing the tooth goes.
    #[must_use]
    pub fn delete_at(mut self, tooth: ToothId, surface: Option<Surface>) -> Self {
        match surface {
            Some(_) => {
                let key = position_key(tooth, surface);
                self.conditions.retain(|c| c.pos != key);
            }
            None => {
                self.conditions.retain(|c| c.tooth != tooth);
                self.bridges.retain(|b| !b.references(tooth));
                self.indicators.retain(|i| i.tooth != tooth);
            }
        }
        self
    }

    /// Discard every item.
    #[must_use]
    pub fn reset(mut self) -> Self {
        self.conditions.clear();
        self.bridges.clear();
        self.indicators.clear();
        self
    }

    pub fn condition_at(&self, tooth: ToothId, surface: Option<Surface>) -> Option<&Condition> {
        let key = position_key(tooth, surface);
        self.conditions.iter().find(|c| c.pos == key)
    }

    /// Number of items of any family that reference `tooth`.
    pub fn references(&self, tooth: ToothId) -> usize {
        self.conditions.iter().filter(|c| c.tooth == tooth).count()
            + self.bridges.iter().filter(|b| b.references(tooth)).count()
            + self.indicators.iter().filter(|i| i.tooth == tooth).count()
    }
}

#[derive(Deserialize)]
struct SnapshotWire {
    #[serde(default)]
    conditions: Vec<Value>,
    #[serde(default)]
    bridges: Vec<Value>,
    #[serde(default)]
    indicators: Vec<Value>,
}

fn lenient<T: serde::de::DeserializeOwned>(family: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("skipping malformed {family} entry: {e}");
                None
            }
        })
        .collect()
}

impl From<SnapshotWire> for ChartSnapshot {
    fn from(w: SnapshotWire) -> Self {
        Self {
            conditions: lenient("condition", w.conditions),
            bridges: lenient("bridge", w.bridges),
            indicators: lenient("indicator", w.indicators),
        }
    }
}
