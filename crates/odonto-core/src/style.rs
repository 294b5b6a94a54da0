//! Colors and symbol style descriptors.
//!
//! Every chart mode carries a `SymbolStyle` describing how its symbol is
//! painted. Renderers read these descriptors; they never pick colors per call
//! site.

use serde::{Deserialize, Serialize};

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// CSS `rgba(...)` string for Canvas2D style setters.
    pub fn to_css(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({r}, {g}, {b}, {:.3})", self.a.clamp(0.0, 1.0))
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Repeating line patterns used inside filled shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hatch {
    /// 45° lines (fissure sealant).
    Diagonal,
    /// Vertical lines (porcelain texture).
    Vertical,
}

/// Whole-tooth glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Root triangle below the tooth; `filled` for root-canal treated.
    RootTriangle { filled: bool },
    /// Centered `#`.
    Fracture,
    /// Heavy box outline, optionally with porcelain texture.
    Crown { porcelain: bool },
    /// Diagonals across the root half of the box.
    RootRemnant,
    /// Diagonals across the whole box.
    Missing,
}

/// How a mode's symbol is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolStyle {
    /// Solid region fill, optionally outlined.
    Fill { color: Color, outline: Option<Color> },
    /// Region outline only.
    Stroke { color: Color, width: f32 },
    /// Region hatch pattern over a light wash.
    Pattern { color: Color, hatch: Hatch },
    Glyph { color: Color, glyph: Glyph },
    /// Short text badge next to the tooth.
    Badge { color: Color, text: &'static str },
    /// Bridge struts.
    Strut { color: Color, width: f32 },
    /// Directional arrow.
    Arrow { color: Color, width: f32 },
    /// Tools (erase, none) draw nothing.
    Nothing,
}

impl SymbolStyle {
    pub fn color(&self) -> Option<Color> {
        match *self {
            SymbolStyle::Fill { color, .. }
            | SymbolStyle::Stroke { color, .. }
            | SymbolStyle::Pattern { color, .. }
            | SymbolStyle::Glyph { color, .. }
            | SymbolStyle::Badge { color, .. }
            | SymbolStyle::Strut { color, .. }
            | SymbolStyle::Arrow { color, .. } => Some(color),
            SymbolStyle::Nothing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string() {
        assert_eq!(
            Color::rgb8(255, 0, 0).with_alpha(0.5).to_css(),
            "rgba(255, 0, 0, 0.500)"
        );
    }
}
