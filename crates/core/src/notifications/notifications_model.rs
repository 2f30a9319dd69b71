use serde::{Deserialize, Serialize};

/// How loudly a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    /// Any level this client does not know; shown like `Info`.
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Unknown => "unknown",
        }
    }
}

/// System alert pushed by the backend (low stock, potential misuse, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
