use odonto_core::Color;

/// Colors for the parts of the chart that are not item symbols.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    pub background: Color,
    pub tooth_fill: Color,
    pub tooth_outline: Color,
    pub region_line: Color,
    pub label: Color,
    pub hover: Color,
    pub preview: Color,
}

impl ChartTheme {
    /// Light theme: white paper, grey outlines.
    pub fn light() -> Self {
        Self {
            background: Color::rgb8(0xF5, 0xF5, 0xF7),
            tooth_fill: Color::WHITE,
            tooth_outline: Color::rgb8(0x86, 0x86, 0x8B),
            region_line: Color::rgb8(0xC7, 0xC7, 0xCC),
            label: Color::rgb8(0x3A, 0x3A, 0x3C),
            hover: Color::rgb8(0x0A, 0x84, 0xFF).with_alpha(0.25),
            preview: Color::rgb8(0x6D, 0x4C, 0x41).with_alpha(0.6),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::rgb8(0x1C, 0x1C, 0x1E),
            tooth_fill: Color::rgb8(0x2C, 0x2C, 0x2E),
            tooth_outline: Color::rgb8(0x98, 0x98, 0x9D),
            region_line: Color::rgb8(0x48, 0x48, 0x4A),
            label: Color::rgb8(0xE5, 0xE5, 0xEA),
            hover: Color::rgb8(0x0A, 0x84, 0xFF).with_alpha(0.35),
            preview: Color::rgb8(0xBC, 0xAA, 0xA4).with_alpha(0.7),
        }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::light()
    }
}
