//! Chart engine: the single owner of chart state.
//!
//! Holds the snapshot, surface size, cached layout and interaction state.
//! Input goes in through `handle_event` (or the pointer helpers); edits are
//! applied immediately; `render` paints a full frame on any `DrawSurface`.

use crate::controller::{self, Cursor, InteractionState};
use crate::edit::{ChartEdit, apply_edit};
use crate::input::{InputEvent, ShortcutAction, ShortcutMap};
use crate::persist::{ChartPersistence, log_outcome};
use odonto_core::{
    ChartLayout, ChartSnapshot, FDI_SEQUENCE, LayoutConfig, Mode, ToothSequence, Viewport,
    Worklists, partition, prepare_save,
};
use odonto_render::{ChartPainter, ChartTheme, DrawSurface};

pub struct ChartEngine {
    snapshot: ChartSnapshot,
    viewport: Viewport,
    config: LayoutConfig,
    sequence: &'static ToothSequence,
    layout: ChartLayout,
    state: InteractionState,
    painter: ChartPainter,
    /// Bumped on every applied edit or load.
    revision: u64,
}

impl ChartEngine {
    /// Empty chart on the standard FDI grid.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_config(viewport, LayoutConfig::default(), ChartTheme::default())
    }

    pub fn with_config(viewport: Viewport, config: LayoutConfig, theme: ChartTheme) -> Self {
        let sequence = &FDI_SEQUENCE;
        Self {
            snapshot: ChartSnapshot::new(),
            viewport,
            config,
            sequence,
            layout: ChartLayout::compute(viewport, &config, sequence),
            state: InteractionState::default(),
            painter: ChartPainter::new(theme),
            revision: 0,
        }
    }

    /// Create an engine from snapshot JSON (legacy field names accepted).
    pub fn from_json(json: &str, viewport: Viewport) -> Result<Self, serde_json::Error> {
        let mut engine = Self::new(viewport);
        engine.load_json(json)?;
        Ok(engine)
    }

    // ─── Snapshot ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> &ChartSnapshot {
        &self.snapshot
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the chart. A pending bridge start refers to the old chart and is dropped.
    pub fn load(&mut self, snapshot: ChartSnapshot) {
        log::debug!("loaded {} items", snapshot.len());
        self.snapshot = snapshot;
        self.state = controller::cancel(self.state);
        self.revision += 1;
    }

    pub fn load_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let snapshot = ChartSnapshot::from_json(json)?;
        self.load(snapshot);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.snapshot.to_json()
    }

    pub fn apply(&mut self, edit: &ChartEdit) {
        let snapshot = std::mem::take(&mut self.snapshot);
        self.snapshot = apply_edit(snapshot, edit);
        self.revision += 1;
    }

    pub fn reset(&mut self) {
        self.apply(&ChartEdit::Reset);
    }

    pub fn worklists(&self) -> Worklists<'_> {
        partition(&self.snapshot)
    }

    /// Hand the current chart to `persistence`. Returns without waiting.
    pub fn save(&self, persistence: &mut dyn ChartPersistence) {
        let batches = prepare_save(&self.snapshot);
        persistence.submit(batches, Box::new(log_outcome));
    }

    // ─── Layout ──────────────────────────────────────────────────────────

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Recompute the layout for a new surface size.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport { width, height };
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.layout = ChartLayout::compute(viewport, &self.config, self.sequence);
        // hover was resolved against the old geometry
        self.state = controller::pointer_leave(self.state);
    }

    // ─── Interaction ─────────────────────────────────────────────────────

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state = controller::set_mode(self.state, mode);
    }

    pub fn cancel(&mut self) {
        self.state = controller::cancel(self.state);
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor()
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Cursor {
        self.state = controller::pointer_move(self.state, &self.layout, x, y);
        self.state.cursor()
    }

    /// Returns the edit that was applied, if any.
    pub fn pointer_click(&mut self, x: f32, y: f32) -> Option<ChartEdit> {
        let (state, edit) = controller::pointer_click(self.state, &self.layout, x, y);
        self.state = state;
        if let Some(edit) = &edit {
            self.apply(edit);
        }
        edit
    }

    /// Dispatch a host event. Returns the edit that was applied, if any.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<ChartEdit> {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.pointer_move(*x, *y);
                None
            }
            InputEvent::Click { x, y } => self.pointer_click(*x, *y),
            InputEvent::PointerLeave => {
                self.state = controller::pointer_leave(self.state);
                None
            }
            InputEvent::Key { key } => {
                match ShortcutMap::resolve(key) {
                    Some(ShortcutAction::Cancel) => self.cancel(),
                    Some(ShortcutAction::SwitchMode(mode)) => self.set_mode(mode),
                    None => log::trace!("unbound key {key:?}"),
                }
                None
            }
        }
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.painter.set_theme(theme);
    }

    /// Paint a full frame: static layer, items, overlay.
    pub fn render<S: DrawSurface + ?Sized>(&mut self, out: &mut S) {
        let overlay = self.state.overlay();
        self.painter
            .paint(out, &self.layout, &self.snapshot, &overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odonto_core::{ConditionCode, ToothId};
    use pretty_assertions::assert_eq;

    #[test]
    fn resize_recomputes_layout() {
        let mut engine = ChartEngine::new(Viewport::default());
        let before = engine.layout().box_size;
        engine.resize(1600.0, 1200.0);
        assert!(engine.layout().box_size > before);
        assert_eq!(engine.viewport(), Viewport { width: 1600.0, height: 1200.0 });
    }

    #[test]
    fn escape_key_cancels_pending_bridge() {
        let mut engine = ChartEngine::new(Viewport::default());
        engine.set_mode(Mode::Bridge);
        let c = engine.layout().get(ToothId::intern("11")).unwrap().center;
        engine.pointer_click(c.x, c.y);
        assert_eq!(engine.state().bridge_start, Some(ToothId::intern("11")));

        engine.handle_event(&InputEvent::Key {
            key: "Escape".into(),
        });
        assert_eq!(engine.state().bridge_start, None);
        assert_eq!(engine.mode(), Mode::Bridge);
    }

    #[test]
    fn edits_bump_revision() {
        let mut engine = ChartEngine::new(Viewport::default());
        engine.set_mode(Mode::Condition(ConditionCode::Missing));
        let c = engine.layout().get(ToothId::intern("38")).unwrap().center;
        assert!(engine.pointer_click(c.x, c.y).is_some());
        assert_eq!(engine.revision(), 1);
        assert!(engine.pointer_click(0.0, 0.0).is_none());
        assert_eq!(engine.revision(), 1);
    }
}
