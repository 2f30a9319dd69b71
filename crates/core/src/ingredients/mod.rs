//! Ingredients domain models.

mod ingredients_model;

pub use ingredients_model::*;
