//! Persistence hand-off.
//!
//! Saving is fire-and-forget: the engine hands three batches to a
//! `ChartPersistence` implementation together with a completion callback and
//! carries on. The callback may run immediately or much later.

use odonto_core::SaveBatches;

pub type SaveResult = Result<(), String>;

/// Called once per submission with the outcome.
pub type SaveCallback = Box<dyn FnOnce(SaveResult)>;

pub trait ChartPersistence {
    fn submit(&mut self, batches: SaveBatches, done: SaveCallback);
}

/// Keeps every submission in memory. Completes immediately.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    pub submissions: Vec<SaveBatches>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&SaveBatches> {
        self.submissions.last()
    }
}

impl ChartPersistence for MemoryPersistence {
    fn submit(&mut self, batches: SaveBatches, done: SaveCallback) {
        self.submissions.push(batches);
        done(Ok(()));
    }
}

/// Log the outcome of a save.
pub fn log_outcome(result: SaveResult) {
    match result {
        Ok(()) => log::debug!("chart saved"),
        Err(e) => log::warn!("chart save failed: {e}"),
    }
}
