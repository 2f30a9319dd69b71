//! Notifications domain models.

mod notifications_model;

pub use notifications_model::*;
