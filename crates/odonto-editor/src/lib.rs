pub mod controller;
pub mod edit;
pub mod engine;
pub mod input;
pub mod persist;

pub use controller::{Cursor, InteractionState};
pub use edit::{ChartEdit, apply_edit};
pub use engine::ChartEngine;
pub use input::{InputEvent, ShortcutAction, ShortcutMap};
pub use persist::{ChartPersistence, MemoryPersistence, SaveCallback, SaveResult};
