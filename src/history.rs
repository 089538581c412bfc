//! Checkpoint-based undo/redo history.
//!
//! Unlike a two-stack undo/redo design, the history is a single list of
//! snapshots plus a cursor. Undo and redo only move the cursor; pushing a new
//! snapshot discards everything after the cursor first.

use crate::constants::HISTORY_LIMIT;

/// Configuration for the history
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of snapshots to keep
    pub max_history: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history: HISTORY_LIMIT,
        }
    }
}

/// Ordered snapshots with a cursor pointing at the current one.
///
/// Always holds at least one snapshot.
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    entries: Vec<T>,
    cursor: usize,
    config: HistoryConfig,
}

impl<T: Clone + Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> History<T> {
    /// Create a history holding only `initial`.
    pub fn new(initial: T) -> Self {
        Self::with_config(initial, HistoryConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(initial: T, config: HistoryConfig) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            config,
        }
    }

    /// Append a snapshot after the cursor, discarding any redo entries.
    pub fn push(&mut self, snapshot: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);

        // Limit history size, keeping the cursor on the same snapshot
        let limit = self.config.max_history.max(1);
        if self.entries.len() > limit {
            let excess = self.entries.len() - limit;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
        log::debug!("📝 History: checkpoint {} of {}", self.cursor + 1, self.entries.len());
    }

    /// Step back one snapshot. Returns None when already at the start.
    pub fn undo(&mut self) -> Option<&T> {
        if self.cursor == 0 {
            log::debug!("⏪ History: nothing to undo");
            return None;
        }
        self.cursor -= 1;
        log::debug!("⏪ History: undo to {}", self.cursor + 1);
        self.entries.get(self.cursor)
    }

    /// Step forward one snapshot. Returns None when already at the end.
    pub fn redo(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.entries.len() {
            log::debug!("⏩ History: nothing to redo");
            return None;
        }
        self.cursor += 1;
        log::debug!("⏩ History: redo to {}", self.cursor + 1);
        self.entries.get(self.cursor)
    }

    /// Replace the whole history with a single snapshot.
    pub fn reset(&mut self, snapshot: T) {
        self.entries.clear();
        self.entries.push(snapshot);
        self.cursor = 0;
        log::debug!("🗑️ History reset");
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: a history always holds its current snapshot.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
