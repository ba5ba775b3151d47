//! Recent key history for repeated-key and sequence patterns.

use tracing::trace;

use crate::key_event::ModifierSet;
use crate::layout;

/// One remembered key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Physical key, lowercase
    pub key: char,
    pub modifiers: ModifierSet,
    pub time_ms: u64,
    /// The press produced a letter that may still be pending
    pub live: bool,
}

impl HistoryEntry {
    /// Pattern token for this press: the key, or its shifted character.
    /// Presses with AltGr held have no token.
    pub fn token(&self) -> Option<char> {
        if self.modifiers.altgr {
            None
        } else if self.modifiers.shift {
            Some(layout::shifted(self.key))
        } else {
            Some(self.key)
        }
    }
}

/// Bounded, age-windowed key history.
#[derive(Debug, Clone)]
pub struct KeyHistory {
    entries: Vec<HistoryEntry>,
    capacity: usize,
    window_ms: u64,
}

impl KeyHistory {
    pub fn new(capacity: usize, window_ms: u64) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
            window_ms,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remember a key press.
    ///
    /// If the gap since the previous press exceeds the window the history is
    /// cleared first. Entries older than the window relative to this press
    /// are then dropped, and the oldest ones go once capacity is reached.
    pub fn record(&mut self, key: char, modifiers: ModifierSet, time_ms: u64) {
        if let Some(last) = self.entries.last() {
            if time_ms.saturating_sub(last.time_ms) > self.window_ms {
                trace!("key gap {}ms exceeds window, history reset", time_ms - last.time_ms);
                self.entries.clear();
            }
        }

        let window = self.window_ms;
        self.entries.retain(|e| time_ms.saturating_sub(e.time_ms) <= window);

        self.entries.push(HistoryEntry {
            key,
            modifiers,
            time_ms,
            live: false,
        });
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
    }

    /// Last `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> Option<&[HistoryEntry]> {
        let len = self.entries.len();
        (n <= len).then(|| &self.entries[len - n..])
    }

    /// Pattern tokens of the last `n` entries, if every one has a token.
    pub fn tail_tokens(&self, n: usize) -> Option<Vec<char>> {
        self.tail(n)?.iter().map(HistoryEntry::token).collect()
    }

    /// Mark whether the newest press produced a letter.
    pub fn set_last_live(&mut self, live: bool) {
        if let Some(last) = self.entries.last_mut() {
            last.live = live;
        }
    }

    /// How many of the `n` entries before the newest one produced a letter.
    pub fn live_before_last(&self, n: usize) -> usize {
        let len = self.entries.len();
        if len == 0 {
            return 0;
        }
        let end = len - 1;
        let start = end.saturating_sub(n);
        self.entries[start..end].iter().filter(|e| e.live).count()
    }

    /// Drop the newest `n` entries (the keys a pattern consumed).
    pub fn evict_last(&mut self, n: usize) {
        let keep = self.entries.len().saturating_sub(n);
        self.entries.truncate(keep);
    }
}
