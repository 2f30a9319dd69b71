//! Meals domain models.

mod meals_model;

pub use meals_model::*;
