//! Tooth identifiers and the fixed chart notation.
//!
//! The chart is a 4 × 16 grid of two-digit FDI identifiers. Rows 0 and 3 hold
//! the permanent dentition; rows 1 and 2 hold the deciduous teeth, which only
//! occupy the ten columns around the midline so each primary tooth lines up
//! with its permanent successor.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for tooth identifiers.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An interned tooth identifier (`"16"`, `"61"`, ...).
/// 4 bytes, `Copy`, O(1) `Eq`/`Hash`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToothId(Spur);

impl ToothId {
    /// Intern a tooth identifier, or return the existing handle.
    pub fn intern(s: &str) -> Self {
        ToothId(INTERNER.get_or_intern(s.trim()))
    }

    /// Resolve back to the notation string.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Quadrant digit (1–8), if the identifier is a well-formed FDI code.
    pub fn quadrant(&self) -> Option<u8> {
        let first = *self.as_str().as_bytes().first()?;
        match first {
            b'1'..=b'8' => Some(first - b'0'),
            _ => None,
        }
    }

    /// Position digit within the quadrant (1 = central incisor).
    pub fn position(&self) -> Option<u8> {
        let bytes = self.as_str().as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        match bytes[1] {
            b'1'..=b'8' => Some(bytes[1] - b'0'),
            _ => None,
        }
    }

    /// Incisors and canines use the narrow "center" region geometry.
    pub fn kind(&self) -> ToothKind {
        match self.position() {
            Some(1..=3) => ToothKind::Center,
            _ => ToothKind::Side,
        }
    }

    /// Upper-arch teeth (quadrants 1, 2, 5, 6).
    pub fn is_upper(&self) -> bool {
        matches!(self.quadrant(), Some(1 | 2 | 5 | 6))
    }
}

impl fmt::Debug for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ToothId {
    fn from(s: &str) -> Self {
        Self::intern(s)
    }
}

impl Serialize for ToothId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Accepts both `"16"` and `16`; older charts stored tooth numbers as integers.
impl<'de> Deserialize<'de> for ToothId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ToothId::intern(&s),
            Raw::Number(n) => ToothId::intern(&n.to_string()),
        })
    }
}

/// Internal geometry variant of a tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothKind {
    /// Incisors and canines.
    Center,
    /// Premolars and molars.
    Side,
}

// ─── Surfaces ────────────────────────────────────────────────────────────

/// One of the five named zones of a tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Surface {
    Top,
    Right,
    Bottom,
    Left,
    Middle,
}

impl Surface {
    /// Hit-test and storage order.
    pub const ALL: [Surface; 5] = [
        Surface::Top,
        Surface::Right,
        Surface::Bottom,
        Surface::Left,
        Surface::Middle,
    ];

    pub fn letter(self) -> char {
        match self {
            Surface::Top => 'T',
            Surface::Right => 'R',
            Surface::Bottom => 'B',
            Surface::Left => 'L',
            Surface::Middle => 'M',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'T' => Some(Surface::Top),
            'R' => Some(Surface::Right),
            'B' => Some(Surface::Bottom),
            'L' => Some(Surface::Left),
            'M' => Some(Surface::Middle),
            _ => None,
        }
    }

    /// Parse a letter or a full name (`"top"`, `"M"`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "top" => Some(Surface::Top),
            "right" => Some(Surface::Right),
            "bottom" => Some(Surface::Bottom),
            "left" => Some(Surface::Left),
            "middle" => Some(Surface::Middle),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_letter(c),
                    _ => None,
                }
            }
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Serialize for Surface {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.letter().encode_utf8(&mut buf))
    }
}

impl<'de> Deserialize<'de> for Surface {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Surface::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown tooth surface {s:?}")))
    }
}

// ─── Notation grid ───────────────────────────────────────────────────────

pub const ROWS: usize = 4;
pub const COLUMNS: usize = 16;
/// Columns per arch half; the quadrant boundary falls after this many.
pub const SECTION_COLUMNS: usize = 8;

/// The chart's tooth sequence: `ROWS` rows of `COLUMNS` optional cells.
pub type ToothSequence = [[Option<&'static str>; COLUMNS]; ROWS];

/// Standard FDI chart: permanent rows outside, deciduous rows inside.
#[rustfmt::skip]
pub const FDI_SEQUENCE: ToothSequence = [
    [
        Some("18"), Some("17"), Some("16"), Some("15"), Some("14"), Some("13"), Some("12"), Some("11"),
        Some("21"), Some("22"), Some("23"), Some("24"), Some("25"), Some("26"), Some("27"), Some("28"),
    ],
    [
        None, None, None, Some("55"), Some("54"), Some("53"), Some("52"), Some("51"),
        Some("61"), Some("62"), Some("63"), Some("64"), Some("65"), None, None, None,
    ],
    [
        None, None, None, Some("85"), Some("84"), Some("83"), Some("82"), Some("81"),
        Some("71"), Some("72"), Some("73"), Some("74"), Some("75"), None, None, None,
    ],
    [
        Some("48"), Some("47"), Some("46"), Some("45"), Some("44"), Some("43"), Some("42"), Some("41"),
        Some("31"), Some("32"), Some("33"), Some("34"), Some("35"), Some("36"), Some("37"), Some("38"),
    ],
];

/// Iterate the occupied cells of a sequence as `(row, col, tooth)`.
pub fn occupied_cells(
    sequence: &ToothSequence,
) -> impl Iterator<Item = (usize, usize, ToothId)> + '_ {
    sequence.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter_map(move |(col, cell)| cell.map(|id| (row, col, ToothId::intern(id))))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ToothId::intern("16");
        let b = ToothId::intern(" 16 ");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "16");
    }

    #[test]
    fn fdi_sequence_has_52_teeth() {
        assert_eq!(occupied_cells(&FDI_SEQUENCE).count(), 52);
        let permanent = occupied_cells(&FDI_SEQUENCE)
            .filter(|(row, _, _)| *row == 0 || *row == 3)
            .count();
        assert_eq!(permanent, 32);
    }

    #[test]
    fn deciduous_rows_stay_near_the_midline() {
        for (row, col, _) in occupied_cells(&FDI_SEQUENCE) {
            if row == 1 || row == 2 {
                assert!((3..=12).contains(&col), "column {col} in row {row}");
            }
        }
    }

    #[test]
    fn center_and_side_kinds() {
        assert_eq!(ToothId::intern("11").kind(), ToothKind::Center);
        assert_eq!(ToothId::intern("43").kind(), ToothKind::Center);
        assert_eq!(ToothId::intern("53").kind(), ToothKind::Center);
        assert_eq!(ToothId::intern("14").kind(), ToothKind::Side);
        assert_eq!(ToothId::intern("75").kind(), ToothKind::Side);
    }

    #[test]
    fn surface_parsing() {
        assert_eq!(Surface::parse("T"), Some(Surface::Top));
        assert_eq!(Surface::parse("m"), Some(Surface::Middle));
        assert_eq!(Surface::parse("left"), Some(Surface::Left));
        assert_eq!(Surface::parse("X"), None);
        assert_eq!(Surface::parse("TR"), None);
    }

    #[test]
    fn numeric_tooth_ids_deserialize() {
        let id: ToothId = serde_json::from_str("16").unwrap();
        assert_eq!(id.as_str(), "16");
        let id: ToothId = serde_json::from_str("\"21\"").unwrap();
        assert_eq!(id.as_str(), "21");
    }
}
