//! Platform-agnostic input events and keyboard shortcuts.

use odonto_core::Mode;

/// Input event from the host (browser, native window, tests).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved over the chart surface.
    PointerMove { x: f32, y: f32 },
    /// Primary button pressed and released on the chart.
    Click { x: f32, y: f32 },
    /// Pointer left the chart surface.
    PointerLeave,
    /// `KeyboardEvent.key` value, e.g. `"Escape"`.
    Key { key: String },
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Drop a pending bridge start.
    Cancel,
    SwitchMode(Mode),
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a `KeyboardEvent.key` value. Unbound keys give `None`.
    pub fn resolve(key: &str) -> Option<ShortcutAction> {
        match key {
            "Escape" => Some(ShortcutAction::Cancel),
            "v" | "V" => Some(ShortcutAction::SwitchMode(Mode::None)),
            "e" | "E" | "Delete" | "Backspace" => Some(ShortcutAction::SwitchMode(Mode::Erase)),
            "b" | "B" => Some(ShortcutAction::SwitchMode(Mode::Bridge)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_cancels() {
        assert_eq!(ShortcutMap::resolve("Escape"), Some(ShortcutAction::Cancel));
    }

    #[test]
    fn mode_keys() {
        assert_eq!(
            ShortcutMap::resolve("B"),
            Some(ShortcutAction::SwitchMode(Mode::Bridge))
        );
        assert_eq!(
            ShortcutMap::resolve("Delete"),
            Some(ShortcutAction::SwitchMode(Mode::Erase))
        );
        assert_eq!(ShortcutMap::resolve("q"), None);
    }
}
