//! Transient notices raised by live feeds and the sinks that receive them.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    #[default]
    Default,
    Destructive,
}

/// A short-lived message for the operator (a toast, a log line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Destructive,
            ..Self::new(title, description)
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.level == NoticeLevel::Destructive
    }
}

/// Receiver of feed notices.
///
/// Feeds call `emit()` from their background task, so implementations must
/// return quickly and must not block. Delivery is best-effort.
pub trait NoticeSink: Send + Sync {
    fn emit(&self, notice: Notice);
}

/// Discards every notice.
#[derive(Clone, Default)]
pub struct NoOpNoticeSink;

impl NoticeSink for NoOpNoticeSink {
    fn emit(&self, _notice: Notice) {}
}

/// Collects notices in memory, for tests.
#[derive(Clone, Default)]
pub struct MockNoticeSink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MockNoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns all collected notices, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl NoticeSink for MockNoticeSink {
    fn emit(&self, notice: Notice) {
        self.lock().push(notice);
    }
}
