//! Wait registry for human replies
//!
//! Maps a decision id to a single-shot signal. The entry is removed on the
//! first signal, so a late second reply finds nothing to wake.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::oneshot;

#[derive(Debug, Default)]
pub struct WaitRegistry {
    waiters: DashMap<String, oneshot::Sender<()>>,
}

impl WaitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a waiter. Returns `None` when `id` already has one.
    pub fn register(&self, id: &str) -> Option<oneshot::Receiver<()>> {
        match self.waiters.entry(id.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let (tx, rx) = oneshot::channel();
                slot.insert(tx);
                Some(rx)
            }
        }
    }

    /// Wake the waiter for `id`. Returns false when nobody was waiting.
    pub fn signal(&self, id: &str) -> bool {
        match self.waiters.remove(id) {
            Some((_, tx)) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Drop the waiter without waking it
    pub fn remove(&self, id: &str) {
        self.waiters.remove(id);
    }

    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }
}
