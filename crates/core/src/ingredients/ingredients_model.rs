use serde::{Deserialize, Serialize};

/// Domain model representing an ingredient and its stock weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub weight: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for creating a new ingredient
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewIngredient {
    pub name: String,
}

impl NewIngredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
