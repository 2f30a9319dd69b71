//! Kitchen Core - Domain entities and role capabilities.
//!
//! This crate holds the shapes the kitchen-inventory backend exchanges with
//! the dashboard (ingredients, meals, portion estimates, notifications,
//! reports, users) plus the closed role/tab capability table. It performs no
//! I/O; `kitchen-client` and `kitchen-live-feed` build on these types.

pub mod access;
pub mod constants;
pub mod errors;
pub mod ingredients;
pub mod meals;
pub mod notifications;
pub mod portions;
pub mod reports;
pub mod users;

pub use access::{DashboardSession, Role, Tab};
pub use ingredients::*;
pub use meals::*;
pub use notifications::*;
pub use portions::*;
pub use reports::*;
pub use users::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
