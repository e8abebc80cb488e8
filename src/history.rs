//! Article navigation history — linear back/forward stack
//!
//! A linear undo-log over visited articles. Loading a new article while
//! the cursor sits behind the tip discards every forward entry (branch
//! truncation); `back` and `next` only ever move the cursor. Hitting an
//! edge is a defined no-op, not an error.

use serde::{Deserialize, Serialize};

/// One visited article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    pub language: String,
}

impl HistoryEntry {
    pub fn new(title: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
        }
    }
}

/// Ordered sequence of visited articles plus a cursor.
///
/// Invariant: the cursor is `None` exactly when the history is empty,
/// and `load_new` always leaves it at the tip.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly loaded article. If the cursor is behind the tip,
    /// every forward entry is discarded first.
    pub fn load_new(&mut self, entry: HistoryEntry) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back. Returns the entry the cursor now points at, or `None`
    /// when already at the start.
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.entries.get(cursor - 1)
            }
            _ => None,
        }
    }

    /// Step forward. Returns the entry the cursor now points at, or
    /// `None` when already at the tip.
    pub fn next(&mut self) -> Option<&HistoryEntry> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                self.entries.get(cursor + 1)
            }
            _ => None,
        }
    }

    /// Clear everything. Triggered by a content-language change upstream.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// The entry under the cursor, if any.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn can_back(&self) -> bool {
        self.cursor.map_or(false, |c| c > 0)
    }

    pub fn can_next(&self) -> bool {
        self.cursor.map_or(false, |c| c + 1 < self.entries.len())
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> HistoryEntry {
        HistoryEntry::new(title, "en")
    }

    #[test]
    fn starts_empty() {
        let history = NavigationHistory::new();
        assert!(history.is_empty());
        assert!(history.current().is_none());
        assert!(!history.can_back());
        assert!(!history.can_next());
    }

    #[test]
    fn load_new_moves_cursor_to_tip() {
        let mut history = NavigationHistory::new();
        history.load_new(entry("A"));
        history.load_new(entry("B"));
        assert_eq!(history.current().unwrap().title, "B");
        assert!(history.can_back());
        assert!(!history.can_next());
    }

    // === Scenario: back, then a fresh load truncates the forward branch ===
    #[test]
    fn branch_truncation() {
        let mut history = NavigationHistory::new();
        history.load_new(entry("A"));
        history.load_new(entry("B"));

        let back = history.back().cloned();
        assert_eq!(back.unwrap().title, "A");
        assert_eq!(history.current().unwrap().title, "A");

        history.load_new(entry("C"));
        let titles: Vec<&str> = history.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(history.current().unwrap().title, "C");

        // next() from the tip is a no-op.
        assert!(history.next().is_none());
        assert_eq!(history.current().unwrap().title, "C");
    }

    #[test]
    fn back_at_start_is_noop() {
        let mut history = NavigationHistory::new();
        history.load_new(entry("A"));
        assert!(history.back().is_none());
        assert_eq!(history.current().unwrap().title, "A");
    }

    #[test]
    fn back_and_next_never_mutate_entries() {
        let mut history = NavigationHistory::new();
        history.load_new(entry("A"));
        history.load_new(entry("B"));
        history.load_new(entry("C"));
        history.back();
        history.back();
        history.next();
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().unwrap().title, "B");
    }

    #[test]
    fn reset_clears_everything() {
        let mut history = NavigationHistory::new();
        history.load_new(entry("A"));
        history.reset();
        assert!(history.is_empty());
        assert!(history.current().is_none());
    }
}
