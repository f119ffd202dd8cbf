//! Formulas discovered during the current session

use std::collections::HashSet;

use crate::catalog::FormulaKey;

/// Result of offering a formula to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    Recorded,
    AlreadyPresent,
}

/// Insertion-ordered set of discovered formulas. Only ever grows.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    order: Vec<FormulaKey>,
    seen: HashSet<FormulaKey>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_if_new(&mut self, key: FormulaKey) -> Discovery {
        if self.seen.insert(key) {
            self.order.push(key);
            Discovery::Recorded
        } else {
            Discovery::AlreadyPresent
        }
    }

    pub fn contains(&self, key: FormulaKey) -> bool {
        self.seen.contains(&key)
    }

    /// Discovered formulas, oldest first
    pub fn discovered(&self) -> &[FormulaKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
