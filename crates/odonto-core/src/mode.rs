//! Mode taxonomy: every chart operation, its canonical code, numeric id,
//! label, UI group and symbol style.
//!
//! Numeric ids exist for toolbars and older payloads only. They are converted
//! here, at the taxonomy boundary, and never written back into chart data.

use crate::style::{Color, Glyph, Hatch, SymbolStyle};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── Condition codes ─────────────────────────────────────────────────────

/// Canonical condition codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCode {
    Amalgam,
    Composite,
    Sealant,
    Caries,
    NonVital,
    RootCanal,
    NotPresent,
    Unerupted,
    PartialEruption,
    Anomaly,
    Fracture,
    RootRemnant,
    Missing,
    MetalCrown,
    PorcelainCrown,
    Implant,
    PartialDenture,
    FullDenture,
}

impl ConditionCode {
    pub const ALL: [ConditionCode; 18] = [
        ConditionCode::Amalgam,
        ConditionCode::Composite,
        ConditionCode::Sealant,
        ConditionCode::Caries,
        ConditionCode::NonVital,
        ConditionCode::RootCanal,
        ConditionCode::NotPresent,
        ConditionCode::Unerupted,
        ConditionCode::PartialEruption,
        ConditionCode::Anomaly,
        ConditionCode::Fracture,
        ConditionCode::RootRemnant,
        ConditionCode::Missing,
        ConditionCode::MetalCrown,
        ConditionCode::PorcelainCrown,
        ConditionCode::Implant,
        ConditionCode::PartialDenture,
        ConditionCode::FullDenture,
    ];

    /// Fallback for codes that cannot be recognised.
    pub const DEFAULT: ConditionCode = ConditionCode::Caries;

    pub fn code(self) -> &'static str {
        match self {
            ConditionCode::Amalgam => "AMF",
            ConditionCode::Composite => "COF",
            ConditionCode::Sealant => "FIS",
            ConditionCode::Caries => "CAR",
            ConditionCode::NonVital => "NVT",
            ConditionCode::RootCanal => "RCT",
            ConditionCode::NotPresent => "NON",
            ConditionCode::Unerupted => "UNE",
            ConditionCode::PartialEruption => "PRE",
            ConditionCode::Anomaly => "ANO",
            ConditionCode::Fracture => "CFR",
            ConditionCode::RootRemnant => "RRX",
            ConditionCode::Missing => "MIS",
            ConditionCode::MetalCrown => "FMC",
            ConditionCode::PorcelainCrown => "POC",
            ConditionCode::Implant => "IPX",
            ConditionCode::PartialDenture => "PRD",
            ConditionCode::FullDenture => "FLD",
        }
    }

    /// Surface-scoped codes mark one region; everything else marks the tooth.
    pub fn is_surface(self) -> bool {
        matches!(
            self,
            ConditionCode::Amalgam
                | ConditionCode::Composite
                | ConditionCode::Sealant
                | ConditionCode::Caries
        )
    }

    /// Case-insensitive code lookup; numeric strings go through the mode table.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u16>() {
            return Self::from_number(n);
        }
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s))
    }

    pub fn from_number(n: u16) -> Option<Self> {
        match Mode::from_number(n)? {
            Mode::Condition(code) => Some(code),
            _ => None,
        }
    }

    /// Parse, falling back to [`ConditionCode::DEFAULT`].
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::warn!("unknown condition code {s:?}, using {}", Self::DEFAULT.code());
            Self::DEFAULT
        })
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ─── Indicator types ─────────────────────────────────────────────────────

/// The eight arrow variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    ArrowTopLeft,
    ArrowTopRight,
    ArrowBottomLeft,
    ArrowBottomRight,
    ArrowTopTurnLeft,
    ArrowTopTurnRight,
    ArrowBottomTurnLeft,
    ArrowBottomTurnRight,
}

impl IndicatorType {
    pub const ALL: [IndicatorType; 8] = [
        IndicatorType::ArrowTopLeft,
        IndicatorType::ArrowTopRight,
        IndicatorType::ArrowBottomLeft,
        IndicatorType::ArrowBottomRight,
        IndicatorType::ArrowTopTurnLeft,
        IndicatorType::ArrowTopTurnRight,
        IndicatorType::ArrowBottomTurnLeft,
        IndicatorType::ArrowBottomTurnRight,
    ];

    pub const DEFAULT: IndicatorType = IndicatorType::ArrowTopLeft;

    pub fn code(self) -> &'static str {
        match self {
            IndicatorType::ArrowTopLeft => "arrow_top_left",
            IndicatorType::ArrowTopRight => "arrow_top_right",
            IndicatorType::ArrowBottomLeft => "arrow_bottom_left",
            IndicatorType::ArrowBottomRight => "arrow_bottom_right",
            IndicatorType::ArrowTopTurnLeft => "arrow_top_turn_left",
            IndicatorType::ArrowTopTurnRight => "arrow_top_turn_right",
            IndicatorType::ArrowBottomTurnLeft => "arrow_bottom_turn_left",
            IndicatorType::ArrowBottomTurnRight => "arrow_bottom_turn_right",
        }
    }

    /// Drawn above the tooth (otherwise below).
    pub fn is_top(self) -> bool {
        matches!(
            self,
            IndicatorType::ArrowTopLeft
                | IndicatorType::ArrowTopRight
                | IndicatorType::ArrowTopTurnLeft
                | IndicatorType::ArrowTopTurnRight
        )
    }

    pub fn points_left(self) -> bool {
        matches!(
            self,
            IndicatorType::ArrowTopLeft
                | IndicatorType::ArrowBottomLeft
                | IndicatorType::ArrowTopTurnLeft
                | IndicatorType::ArrowBottomTurnLeft
        )
    }

    /// Curved ("turn") variants. Rendered as straight arrows.
    pub fn is_curved(self) -> bool {
        matches!(
            self,
            IndicatorType::ArrowTopTurnLeft
                | IndicatorType::ArrowTopTurnRight
                | IndicatorType::ArrowBottomTurnLeft
                | IndicatorType::ArrowBottomTurnRight
        )
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u16>() {
            return Self::from_number(n);
        }
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s))
    }

    pub fn from_number(n: u16) -> Option<Self> {
        match Mode::from_number(n)? {
            Mode::Indicator(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::warn!("unknown indicator type {s:?}, using {}", Self::DEFAULT.code());
            Self::DEFAULT
        })
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ─── Serde: canonical string out, string or number in ───────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Text(String),
    Number(u64),
}

impl RawCode {
    fn into_text(self) -> String {
        match self {
            RawCode::Text(s) => s,
            RawCode::Number(n) => n.to_string(),
        }
    }
}

impl Serialize for ConditionCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for ConditionCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCode::deserialize(deserializer)?.into_text();
        Ok(ConditionCode::parse_or_default(&raw))
    }
}

impl Serialize for IndicatorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for IndicatorType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCode::deserialize(deserializer)?.into_text();
        Ok(IndicatorType::parse_or_default(&raw))
    }
}

// ─── Modes ───────────────────────────────────────────────────────────────

/// UI grouping for toolbars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeGroup {
    Tools,
    Fillings,
    ToothConditions,
    Restorations,
    Prosthetics,
    Indicators,
}

impl ModeGroup {
    pub const ALL: [ModeGroup; 6] = [
        ModeGroup::Tools,
        ModeGroup::Fillings,
        ModeGroup::ToothConditions,
        ModeGroup::Restorations,
        ModeGroup::Prosthetics,
        ModeGroup::Indicators,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModeGroup::Tools => "Tools",
            ModeGroup::Fillings => "Fillings",
            ModeGroup::ToothConditions => "Tooth conditions",
            ModeGroup::Restorations => "Restorations",
            ModeGroup::Prosthetics => "Prosthetics",
            ModeGroup::Indicators => "Indicators",
        }
    }
}

/// A chart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    None,
    Erase,
    Condition(ConditionCode),
    Bridge,
    Indicator(IndicatorType),
}

const fn condition(code: ConditionCode) -> Mode {
    Mode::Condition(code)
}

const fn indicator(kind: IndicatorType) -> Mode {
    Mode::Indicator(kind)
}

impl Mode {
    /// Every mode in toolbar order.
    pub const ALL: [Mode; 29] = [
        Mode::None,
        Mode::Erase,
        condition(ConditionCode::Amalgam),
        condition(ConditionCode::Composite),
        condition(ConditionCode::Sealant),
        condition(ConditionCode::Caries),
        condition(ConditionCode::NonVital),
        condition(ConditionCode::RootCanal),
        condition(ConditionCode::NotPresent),
        condition(ConditionCode::Unerupted),
        condition(ConditionCode::PartialEruption),
        condition(ConditionCode::Anomaly),
        condition(ConditionCode::Fracture),
        condition(ConditionCode::RootRemnant),
        condition(ConditionCode::Missing),
        condition(ConditionCode::MetalCrown),
        condition(ConditionCode::PorcelainCrown),
        condition(ConditionCode::Implant),
        condition(ConditionCode::PartialDenture),
        condition(ConditionCode::FullDenture),
        Mode::Bridge,
        indicator(IndicatorType::ArrowTopLeft),
        indicator(IndicatorType::ArrowTopRight),
        indicator(IndicatorType::ArrowBottomLeft),
        indicator(IndicatorType::ArrowBottomRight),
        indicator(IndicatorType::ArrowTopTurnLeft),
        indicator(IndicatorType::ArrowTopTurnRight),
        indicator(IndicatorType::ArrowBottomTurnLeft),
        indicator(IndicatorType::ArrowBottomTurnRight),
    ];

    /// Numeric toolbar id. The only numeric ↔ mode mapping in the crate.
    pub fn number(self) -> u16 {
        match self {
            Mode::None => 0,
            Mode::Erase => 1,
            Mode::Condition(code) => match code {
                ConditionCode::Amalgam => 10,
                ConditionCode::Composite => 11,
                ConditionCode::Sealant => 12,
                ConditionCode::Caries => 13,
                ConditionCode::NonVital => 20,
                ConditionCode::RootCanal => 21,
                ConditionCode::NotPresent => 22,
                ConditionCode::Unerupted => 23,
                ConditionCode::PartialEruption => 24,
                ConditionCode::Anomaly => 25,
                ConditionCode::Fracture => 26,
                ConditionCode::RootRemnant => 27,
                ConditionCode::Missing => 28,
                ConditionCode::MetalCrown => 30,
                ConditionCode::PorcelainCrown => 31,
                ConditionCode::Implant => 32,
                ConditionCode::PartialDenture => 33,
                ConditionCode::FullDenture => 34,
            },
            Mode::Bridge => 40,
            Mode::Indicator(kind) => match kind {
                IndicatorType::ArrowTopLeft => 50,
                IndicatorType::ArrowTopRight => 51,
                IndicatorType::ArrowBottomLeft => 52,
                IndicatorType::ArrowBottomRight => 53,
                IndicatorType::ArrowTopTurnLeft => 54,
                IndicatorType::ArrowTopTurnRight => 55,
                IndicatorType::ArrowBottomTurnLeft => 56,
                IndicatorType::ArrowBottomTurnRight => 57,
            },
        }
    }

    pub fn from_number(n: u16) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.number() == n)
    }

    /// Canonical string tag.
    pub fn code(self) -> &'static str {
        match self {
            Mode::None => "none",
            Mode::Erase => "erase",
            Mode::Condition(code) => code.code(),
            Mode::Bridge => "bridge",
            Mode::Indicator(kind) => kind.code(),
        }
    }

    /// Look up a mode by code (case-insensitive) or numeric id.
    pub fn parse(s: &str) -> Option<Mode> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u16>() {
            return Mode::from_number(n);
        }
        Mode::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(s))
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::None => "Pointer",
            Mode::Erase => "Erase",
            Mode::Condition(code) => match code {
                ConditionCode::Amalgam => "Amalgam filling",
                ConditionCode::Composite => "Composite filling",
                ConditionCode::Sealant => "Fissure sealant",
                ConditionCode::Caries => "Caries",
                ConditionCode::NonVital => "Non-vital tooth",
                ConditionCode::RootCanal => "Root canal treatment",
                ConditionCode::NotPresent => "Not present",
                ConditionCode::Unerupted => "Unerupted",
                ConditionCode::PartialEruption => "Partial eruption",
                ConditionCode::Anomaly => "Anomaly",
                ConditionCode::Fracture => "Fracture",
                ConditionCode::RootRemnant => "Root remnant",
                ConditionCode::Missing => "Missing tooth",
                ConditionCode::MetalCrown => "Full metal crown",
                ConditionCode::PorcelainCrown => "Porcelain crown",
                ConditionCode::Implant => "Implant",
                ConditionCode::PartialDenture => "Partial denture",
                ConditionCode::FullDenture => "Full denture",
            },
            Mode::Bridge => "Bridge",
            Mode::Indicator(kind) => match kind {
                IndicatorType::ArrowTopLeft => "Arrow top left",
                IndicatorType::ArrowTopRight => "Arrow top right",
                IndicatorType::ArrowBottomLeft => "Arrow bottom left",
                IndicatorType::ArrowBottomRight => "Arrow bottom right",
                IndicatorType::ArrowTopTurnLeft => "Turn arrow top left",
                IndicatorType::ArrowTopTurnRight => "Turn arrow top right",
                IndicatorType::ArrowBottomTurnLeft => "Turn arrow bottom left",
                IndicatorType::ArrowBottomTurnRight => "Turn arrow bottom right",
            },
        }
    }

    pub fn group(self) -> ModeGroup {
        match self {
            Mode::None | Mode::Erase => ModeGroup::Tools,
            Mode::Condition(code) if code.is_surface() => ModeGroup::Fillings,
            Mode::Condition(
                ConditionCode::MetalCrown
                | ConditionCode::PorcelainCrown
                | ConditionCode::Implant
                | ConditionCode::RootCanal,
            ) => ModeGroup::Restorations,
            Mode::Condition(ConditionCode::PartialDenture | ConditionCode::FullDenture) => {
                ModeGroup::Prosthetics
            }
            Mode::Condition(_) => ModeGroup::ToothConditions,
            Mode::Bridge => ModeGroup::Prosthetics,
            Mode::Indicator(_) => ModeGroup::Indicators,
        }
    }

    /// Modes in a toolbar group, in `ALL` order.
    pub fn in_group(group: ModeGroup) -> impl Iterator<Item = Mode> {
        Mode::ALL.into_iter().filter(move |m| m.group() == group)
    }

    /// Whole-tooth modes skip region resolution during hit testing.
    ///
    /// Enumerated explicitly: every mode except the surface fillings and the
    /// no-op pointer.
    pub fn is_whole_tooth(self) -> bool {
        match self {
            Mode::None => false,
            Mode::Condition(code) => !code.is_surface(),
            Mode::Erase | Mode::Bridge | Mode::Indicator(_) => true,
        }
    }

    pub fn style(self) -> SymbolStyle {
        let ink = Color::rgb8(0x21, 0x21, 0x21);
        match self {
            Mode::None | Mode::Erase => SymbolStyle::Nothing,
            Mode::Condition(code) => condition_style(code, ink),
            Mode::Bridge => SymbolStyle::Strut {
                color: Color::rgb8(0x6D, 0x4C, 0x41),
                width: 3.0,
            },
            Mode::Indicator(_) => SymbolStyle::Arrow {
                color: Color::rgb8(0x15, 0x65, 0xC0),
                width: 2.0,
            },
        }
    }
}

fn condition_style(code: ConditionCode, ink: Color) -> SymbolStyle {
    let badge = |text: &'static str| SymbolStyle::Badge { color: ink, text };
    let glyph = |glyph: Glyph| SymbolStyle::Glyph { color: ink, glyph };
    match code {
        ConditionCode::Amalgam => SymbolStyle::Fill {
            color: Color::rgb8(0x37, 0x47, 0x4F),
            outline: None,
        },
        ConditionCode::Composite => SymbolStyle::Fill {
            color: Color::rgb8(0x66, 0xBB, 0x6A),
            outline: Some(Color::rgb8(0x2E, 0x7D, 0x32)),
        },
        ConditionCode::Sealant => SymbolStyle::Pattern {
            color: Color::rgb8(0xAD, 0x14, 0x57),
            hatch: Hatch::Diagonal,
        },
        ConditionCode::Caries => SymbolStyle::Stroke {
            color: Color::rgb8(0xC6, 0x28, 0x28),
            width: 2.5,
        },
        ConditionCode::NonVital => glyph(Glyph::RootTriangle { filled: false }),
        ConditionCode::RootCanal => glyph(Glyph::RootTriangle { filled: true }),
        ConditionCode::Fracture => glyph(Glyph::Fracture),
        ConditionCode::MetalCrown => glyph(Glyph::Crown { porcelain: false }),
        ConditionCode::PorcelainCrown => glyph(Glyph::Crown { porcelain: true }),
        ConditionCode::RootRemnant => glyph(Glyph::RootRemnant),
        ConditionCode::Missing => glyph(Glyph::Missing),
        ConditionCode::NotPresent => badge("NON"),
        ConditionCode::Unerupted => badge("UNE"),
        ConditionCode::PartialEruption => badge("PRE"),
        ConditionCode::Anomaly => badge("ANO"),
        ConditionCode::Implant => badge("IPX"),
        ConditionCode::PartialDenture => badge("PRD"),
        ConditionCode::FullDenture => badge("FLD"),
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
