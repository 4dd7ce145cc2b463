//! Coalesces rapid document changes into one write per quiet period.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};

use super::Document;

/// Dirty set plus a deadline that every new change pushes back.
#[derive(Debug, Clone)]
pub struct DebouncedWriter {
    delay: Duration,
    dirty: BTreeSet<Document>,
    deadline: Option<DateTime<Utc>>,
}

impl DebouncedWriter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::milliseconds(i64::try_from(delay_ms).unwrap_or(i64::MAX / 1_000_000)),
            dirty: BTreeSet::new(),
            deadline: None,
        }
    }

    pub fn mark(&mut self, doc: Document, now: DateTime<Utc>) {
        self.dirty.insert(doc);
        self.deadline = now.checked_add_signed(self.delay);
    }

    pub fn is_dirty(&self, doc: Document) -> bool {
        self.dirty.contains(&doc)
    }

    pub fn has_pending(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// True once the quiet period after the last change has passed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.has_pending() && self.deadline.map_or(true, |deadline| now >= deadline)
    }

    /// Dirty documents, in a stable order.
    pub fn pending(&self) -> Vec<Document> {
        self.dirty.iter().copied().collect()
    }

    /// A document made it to the store.
    pub fn written(&mut self, doc: Document) {
        self.dirty.remove(&doc);
        if self.dirty.is_empty() {
            self.deadline = None;
        }
    }

    /// Some writes failed; try again after another quiet period.
    pub fn retry_later(&mut self, now: DateTime<Utc>) {
        if self.has_pending() {
            self.deadline = now.checked_add_signed(self.delay);
        }
    }
}
