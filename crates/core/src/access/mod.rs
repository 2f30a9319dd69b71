//! Role-gated navigation.
//!
//! Every dashboard tab is gated by a closed capability table keyed on
//! [`Role`]. The table is checked when navigating, so a session can never
//! hold an active tab its role is not allowed to see.

mod access_model;
mod session;

pub use access_model::*;
pub use session::*;
