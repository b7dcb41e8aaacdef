//! Event sequencer: the single global order of inbound events.
//!
//! Every use-case entry point takes a turn before touching the connection
//! registry or the whiteboard log, and holds it until its fan-out is pushed.
//! The runtime is multi-threaded, so this is what keeps one event from
//! interleaving with another.

use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct EventSequencer {
    last_seq: Mutex<u64>,
}

/// Exclusive slot for processing one event.
pub struct Turn<'a> {
    _guard: MutexGuard<'a, u64>,
    seq: u64,
}

impl Turn<'_> {
    /// Global sequence number of the event being processed.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl EventSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the previous event to finish, then start the next one.
    pub async fn begin(&self) -> Turn<'_> {
        let mut guard = self.last_seq.lock().await;
        *guard += 1;
        let seq = *guard;
        Turn { _guard: guard, seq }
    }
}
