//! Core error types for the kitchen dashboard.
//!
//! Transport errors live in `kitchen-client`; this module only covers what the
//! domain layer itself can reject.

use thiserror::Error;

use crate::access::{Role, Tab};

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for domain-level checks.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The role's capability table does not include the requested tab.
    #[error("Role '{role}' may not open the '{tab}' tab")]
    AccessDenied { role: Role, tab: Tab },

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    /// Report periods are calendar months; anything else is rejected.
    #[error("Invalid report period {year}-{month:02}")]
    InvalidPeriod { year: i32, month: u32 },
}

impl Error {
    pub fn access_denied(role: Role, tab: Tab) -> Self {
        Self::AccessDenied { role, tab }
    }

    pub fn unknown_role(value: impl Into<String>) -> Self {
        Self::UnknownRole(value.into())
    }
}
