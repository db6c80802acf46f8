//! Depth-1 coalescing slot for per-frame visual updates.
//!
//! High-frequency input (pointer moves) schedules into the slot; the host's
//! frame tick takes whatever is there. A newer item replaces an older one that
//! was never applied, so at most one update runs per frame.

#[derive(Debug, Clone, PartialEq)]
pub struct Coalesced<T> {
    pending: Option<T>,
    superseded: u64,
}

impl<T> Default for Coalesced<T> {
    fn default() -> Self {
        Self {
            pending: None,
            superseded: 0,
        }
    }
}

impl<T> Coalesced<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `item` in the slot. Returns true if it replaced an unapplied item.
    pub fn schedule(&mut self, item: T) -> bool {
        let replaced = self.pending.replace(item).is_some();
        if replaced {
            self.superseded += 1;
        }
        replaced
    }

    /// Take the pending item, leaving the slot empty.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending item without applying it. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// How many scheduled items were replaced before being applied.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}
