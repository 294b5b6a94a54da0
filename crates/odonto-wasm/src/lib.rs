//! WASM bridge for Odonto: exposes the chart engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host page owns the
//! `<canvas>`, forwards pointer and key events, and calls `render` on every
//! animation frame.

mod render2d;

use odonto_core::{
    ChartItem, ChartSnapshot, Mode, ModeGroup, SaveBatches, Viewport, Worklists, classify,
    prepare_save,
};
use odonto_editor::{ChartEngine, ChartPersistence, InputEvent, SaveCallback};
use odonto_render::ChartTheme;
use serde_json::json;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The WASM-facing chart controller.
///
/// Holds the engine and the host surface size. All interaction from the
/// page goes through this struct.
#[wasm_bindgen]
pub struct ChartCanvas {
    engine: ChartEngine,
    width: f64,
    height: f64,
    /// Dark mode flag: `false` = light (default), `true` = dark.
    dark_mode: bool,
}

#[wasm_bindgen]
impl ChartCanvas {
    /// Create an empty chart with the given dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();

        let viewport = Viewport {
            width: width as f32,
            height: height as f32,
        };
        Self {
            engine: ChartEngine::new(viewport),
            width,
            height,
            dark_mode: false,
        }
    }

    // ─── Chart data ──────────────────────────────────────────────────────

    /// Replace the chart with snapshot JSON.
    /// Returns `{"ok":true,"items":n}` or `{"ok":false,"error":"..."}`.
    pub fn load_json(&mut self, json: &str) -> String {
        match self.engine.load_json(json) {
            Ok(()) => format!(r#"{{"ok":true,"items":{}}}"#, self.engine.snapshot().len()),
            Err(e) => {
                log::warn!("chart JSON rejected: {e}");
                error_json(&e.to_string())
            }
        }
    }

    /// Current chart as snapshot JSON.
    pub fn get_json(&self) -> String {
        self.engine.to_json().unwrap_or_else(|e| {
            log::warn!("chart serialization failed: {e}");
            String::from("{}")
        })
    }

    /// Bumped on every edit or load; lets the host skip redundant saves.
    pub fn revision(&self) -> f64 {
        self.engine.revision() as f64
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Worklists as JSON: `{"needs_action":{"label":..,"items":[..]},..}`.
    pub fn get_worklists_json(&self) -> String {
        worklists_value(&self.engine.worklists()).to_string()
    }

    /// The three save batches as JSON, without submitting them anywhere.
    pub fn get_save_batches_json(&self) -> String {
        match serde_json::to_string(&prepare_save(self.engine.snapshot())) {
            Ok(json) => json,
            Err(e) => error_json(&e.to_string()),
        }
    }

    /// Hand the save batches to `callback(batchesJson)`. Returns immediately;
    /// failures thrown by the callback are logged.
    pub fn save(&self, callback: &js_sys::Function) {
        let mut persistence = JsPersistence { callback };
        self.engine.save(&mut persistence);
    }

    // ─── Modes ───────────────────────────────────────────────────────────

    /// Switch mode by code (`"CAR"`, `"bridge"`) or numeric id (`"13"`).
    /// Returns `false` for unknown modes.
    pub fn set_mode(&mut self, mode: &str) -> bool {
        match Mode::parse(mode) {
            Some(mode) => {
                self.engine.set_mode(mode);
                true
            }
            None => {
                log::debug!("unknown mode {mode:?}");
                false
            }
        }
    }

    pub fn get_mode(&self) -> String {
        self.engine.mode().code().to_string()
    }

    /// Toolbar description: groups in display order, each with its modes.
    pub fn get_modes_json(&self) -> String {
        modes_value().to_string()
    }

    /// Drop a pending bridge start.
    pub fn cancel(&mut self) {
        self.engine.cancel();
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Returns the CSS cursor for the new hover state.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> String {
        self.engine.pointer_move(x, y).as_css().to_string()
    }

    pub fn handle_pointer_leave(&mut self) {
        self.engine.handle_event(&InputEvent::PointerLeave);
    }

    /// Handle a click. Returns `true` if the chart changed.
    pub fn handle_pointer_click(&mut self, x: f32, y: f32) -> bool {
        self.engine.pointer_click(x, y).is_some()
    }

    /// Handle a key press. Returns JSON: `{"mode":"<code>","pending":bool}`.
    pub fn handle_key(&mut self, key: &str) -> String {
        self.engine.handle_event(&InputEvent::Key {
            key: key.to_string(),
        });
        json!({
            "mode": self.engine.mode().code(),
            "pending": self.engine.state().bridge_start.is_some(),
        })
        .to_string()
    }

    /// Hovered target as JSON: `{"tooth":"16","surface":"T"}` or `null`.
    pub fn get_hover_json(&self) -> String {
        match self.engine.state().hovered {
            Some(hit) => json!({
                "tooth": hit.tooth.as_str(),
                "surface": hit.surface.map(|s| s.letter().to_string()),
            })
            .to_string(),
            None => String::from("null"),
        }
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Render the chart to a Canvas2D context.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) {
        let mut surface = render2d::Canvas2dSurface::new(ctx, self.width, self.height);
        self.engine.render(&mut surface);
    }

    /// Set the canvas theme.
    pub fn set_theme(&mut self, is_dark: bool) {
        if is_dark == self.dark_mode {
            return;
        }
        self.dark_mode = is_dark;
        let theme = if is_dark {
            ChartTheme::dark()
        } else {
            ChartTheme::light()
        };
        self.engine.set_theme(theme);
    }

    /// Resize the canvas.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.engine.resize(width as f32, height as f32);
    }
}

// ─── JS persistence ──────────────────────────────────────────────────────

struct JsPersistence<'a> {
    callback: &'a js_sys::Function,
}

impl ChartPersistence for JsPersistence<'_> {
    fn submit(&mut self, batches: SaveBatches, done: SaveCallback) {
        let result = serde_json::to_string(&batches)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.callback
                    .call1(&JsValue::NULL, &JsValue::from_str(&json))
                    .map(|_| ())
                    .map_err(|e| format!("{e:?}"))
            });
        done(result);
    }
}

// ─── JSON helpers ────────────────────────────────────────────────────────

fn error_json(message: &str) -> String {
    json!({ "ok": false, "error": message }).to_string()
}

fn modes_value() -> serde_json::Value {
    let groups: Vec<serde_json::Value> = ModeGroup::ALL
        .into_iter()
        .map(|group| {
            let modes: Vec<serde_json::Value> = Mode::in_group(group)
                .map(|m| json!({ "code": m.code(), "number": m.number(), "label": m.label() }))
                .collect();
            json!({ "group": group.label(), "modes": modes })
        })
        .collect();
    serde_json::Value::Array(groups)
}

fn item_value(item: ChartItem<'_>) -> serde_json::Value {
    let status = classify(item);
    json!({
        "family": item.family(),
        "id": item.id(),
        "tooth": item.tooth().map(|t| t.as_str().to_string()),
        "label": item.label(),
        "diagnosis_status": status.diagnosis,
        "treatment_status": status.treatment,
    })
}

fn worklists_value(lists: &Worklists<'_>) -> serde_json::Value {
    let mut out = serde_json::Map::new();
    for (list, items) in lists.iter() {
        let key = serde_json::to_value(list)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let items: Vec<serde_json::Value> = items.iter().copied().map(item_value).collect();
        out.insert(key, json!({ "label": list.label(), "items": items }));
    }
    serde_json::Value::Object(out)
}

// ─── Panic hook ──────────────────────────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Odonto WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Validate snapshot JSON. Returns `{"ok":true,"items":n}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate(json: &str) -> String {
    match ChartSnapshot::from_json(json) {
        Ok(snapshot) => format!(r#"{{"ok":true,"items":{}}}"#, snapshot.len()),
        Err(e) => error_json(&e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(s: &str) -> serde_json::Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn validate_reports_items_and_errors() {
        assert_eq!(
            parse(&validate(r#"{"conditions":[{"tooth":"16","condition":"CAR"}]}"#)),
            json!({ "ok": true, "items": 1 })
        );
        let err = parse(&validate(r#"{ "broken": "#));
        assert_eq!(err["ok"], false);
        assert!(err["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn error_json_escapes_quotes() {
        let v = parse(&error_json(r#"expected "}" at line 1"#));
        assert_eq!(v["error"], r#"expected "}" at line 1"#);
    }

    #[test]
    fn modes_cover_every_mode_once() {
        let groups = modes_value();
        let groups = groups.as_array().unwrap();
        assert_eq!(groups.len(), ModeGroup::ALL.len());
        let count: usize = groups
            .iter()
            .map(|g| g["modes"].as_array().map_or(0, Vec::len))
            .sum();
        assert_eq!(count, Mode::ALL.len());
    }

    #[test]
    fn canvas_click_flow() {
        let mut canvas = ChartCanvas::new(1024.0, 768.0);
        assert!(canvas.set_mode("MIS"));
        assert!(!canvas.set_mode("nonsense"));
        assert_eq!(canvas.get_mode(), "MIS");

        let c = canvas
            .engine
            .layout()
            .get(odonto_core::ToothId::intern("48"))
            .unwrap()
            .center;
        assert_eq!(canvas.handle_pointer_move(c.x, c.y), "pointer");
        assert_eq!(parse(&canvas.get_hover_json())["tooth"], "48");
        assert!(canvas.handle_pointer_click(c.x, c.y));
        assert!(!canvas.handle_pointer_click(-5.0, -5.0));

        let lists = parse(&canvas.get_worklists_json());
        assert_eq!(lists["needs_action"]["items"][0]["tooth"], "48");

        let key = parse(&canvas.handle_key("Escape"));
        assert_eq!(key["pending"], false);

        canvas.reset();
        assert_eq!(parse(&canvas.get_json())["conditions"], json!([]));
    }

    #[test]
    fn load_json_status() {
        let mut canvas = ChartCanvas::new(800.0, 600.0);
        let ok = parse(&canvas.load_json(r#"{"bridges":[{"from":"11","to":"21"}]}"#));
        assert_eq!(ok, json!({ "ok": true, "items": 1 }));
        let bad = parse(&canvas.load_json("nope"));
        assert_eq!(bad["ok"], false);
        assert_eq!(canvas.revision(), 1.0);
        let batches = parse(&canvas.get_save_batches_json());
        assert_eq!(batches["bridges"][0]["connected_teeth"], json!(["11", "21"]));
    }
}
