#![forbid(unsafe_code)]

//! Ordered, identity-keyed selection set.
//!
//! # Invariants
//!
//! 1. Membership is by [`RecordId`], never by record contents, so two equal
//!    records are still selected independently.
//! 2. Iteration yields ids in the order they were first (re)selected.
//! 3. `toggle` twice with the same id restores the previous membership.
//!    Equality compares membership only: a re-selected id moves to the end
//!    of the iteration order.
//! 4. Toggling one id never changes membership of another.

use std::collections::HashSet;

use beeswarm_core::record::RecordId;

/// Selected records in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    order: Vec<RecordId>,
    members: HashSet<RecordId>,
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for Selection {}

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|&other| other != id);
            false
        } else {
            self.members.insert(id);
            self.order.push(id);
            true
        }
    }

    /// Copy of this selection with `id` toggled.
    #[must_use]
    pub fn toggled(&self, id: RecordId) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    #[inline]
    pub fn contains(&self, id: RecordId) -> bool {
        self.members.contains(&id)
    }

    /// Ids in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = RecordId> + '_ {
        self.order.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}
