//! Whiteboard log: the authoritative, replayable history of the canvas.
//!
//! `reset` discards history instead of appending a tombstone. The only reader
//! of the log is replay to a new joiner, which needs exactly what is on the
//! canvas now.

use super::entity::DrawAction;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhiteboardLog {
    actions: Vec<DrawAction>,
}

impl WhiteboardLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke at the tail.
    pub fn append(&mut self, action: DrawAction) {
        self.actions.push(action);
    }

    /// Drop every stroke drawn so far.
    pub fn reset(&mut self) {
        self.actions.clear();
    }

    /// Current strokes in arrival order.
    pub fn snapshot(&self) -> Vec<DrawAction> {
        self.actions.clone()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
