//! Append-only decision log.
//!
//! Entries are created once per decision and never edited or removed.
//! Only the engine can append.

use serde::Serialize;

use crate::types::DecisionLogEntry;

/// Insertion-ordered, unbounded record of every decision in a session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DecisionLog {
    entries: Vec<DecisionLogEntry>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: DecisionLogEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[DecisionLogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecisionLogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&DecisionLogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DecisionLog {
    type Item = &'a DecisionLogEntry;
    type IntoIter = std::slice::Iter<'a, DecisionLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
