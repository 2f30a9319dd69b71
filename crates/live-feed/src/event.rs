//! Event types a live feed can carry.

use std::fmt::Debug;

use serde::de::DeserializeOwned;

use kitchen_client::{
    NOTIFICATIONS_SNAPSHOT_PATH, NOTIFICATIONS_STREAM_PATH, PORTIONS_SNAPSHOT_PATH,
    PORTIONS_STREAM_PATH,
};
use kitchen_core::{Notification, PortionEstimate};

use crate::merge::MergePolicy;
use crate::notice::Notice;

/// Where a feed reads from and how it merges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDescriptor {
    /// Short name used in log lines
    pub label: &'static str,
    /// REST path of the initial snapshot
    pub snapshot_path: &'static str,
    /// Path of the push stream on the same origin
    pub stream_path: &'static str,
    pub policy: MergePolicy,
    /// Notice description raised when the snapshot cannot be fetched
    pub snapshot_error: &'static str,
    /// Whether each pushed event is also raised as a notice
    pub announce_events: bool,
}

/// A record with a stable identity key, deliverable through a live feed.
pub trait FeedEvent: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    type Key: PartialEq + Debug;

    fn key(&self) -> Self::Key;

    /// Default endpoints and merge policy for this event type.
    fn descriptor() -> FeedDescriptor;

    /// Transient notice to raise when this event is pushed.
    fn notice(&self) -> Option<Notice> {
        None
    }
}

impl FeedEvent for Notification {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn descriptor() -> FeedDescriptor {
        FeedDescriptor {
            label: "notifications",
            snapshot_path: NOTIFICATIONS_SNAPSHOT_PATH,
            stream_path: NOTIFICATIONS_STREAM_PATH,
            policy: MergePolicy::Append,
            snapshot_error: "Failed to fetch notifications",
            announce_events: true,
        }
    }

    fn notice(&self) -> Option<Notice> {
        let notice = if self.is_error() {
            Notice::destructive(&self.kind, &self.message)
        } else {
            Notice::new(&self.kind, &self.message)
        };
        Some(notice)
    }
}

impl FeedEvent for PortionEstimate {
    type Key = i64;

    fn key(&self) -> i64 {
        self.meal_id
    }

    fn descriptor() -> FeedDescriptor {
        FeedDescriptor {
            label: "portions",
            snapshot_path: PORTIONS_SNAPSHOT_PATH,
            stream_path: PORTIONS_STREAM_PATH,
            policy: MergePolicy::UpsertByKey,
            snapshot_error: "Failed to fetch portion estimates",
            announce_events: false,
        }
    }
}
