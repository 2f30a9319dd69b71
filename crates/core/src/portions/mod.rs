//! Portions domain models.

mod portions_model;

pub use portions_model::*;
