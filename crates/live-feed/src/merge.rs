//! Merge policies applied to incoming events.

use serde::{Deserialize, Serialize};

use crate::event::FeedEvent;

/// How an incoming event joins the current collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Insert at the head. Every event is kept, newest first; the collection
    /// grows without bound.
    Append,
    /// Replace the entry with the same key in place, or append at the tail.
    UpsertByKey,
}

/// What a merge did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Prepended,
    Replaced { index: usize },
    Appended,
}

/// Ordered events of one feed, merged under a fixed policy.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedCollection<E> {
    policy: MergePolicy,
    items: Vec<E>,
}

impl<E: FeedEvent> FeedCollection<E> {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            items: Vec::new(),
        }
    }

    pub fn with_items(policy: MergePolicy, items: Vec<E>) -> Self {
        Self { policy, items }
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    /// Swap in a fresh snapshot.
    pub fn replace(&mut self, items: Vec<E>) {
        self.items = items;
    }

    pub fn merge(&mut self, event: E) -> MergeOutcome {
        match self.policy {
            MergePolicy::Append => {
                self.items.insert(0, event);
                MergeOutcome::Prepended
            }
            MergePolicy::UpsertByKey => {
                let key = event.key();
                match self.items.iter().position(|existing| existing.key() == key) {
                    Some(index) => {
                        self.items[index] = event;
                        MergeOutcome::Replaced { index }
                    }
                    None => {
                        self.items.push(event);
                        MergeOutcome::Appended
                    }
                }
            }
        }
    }
}

impl<'a, E> IntoIterator for &'a FeedCollection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
