//! Reports domain models.

mod reports_model;

pub use reports_model::*;
