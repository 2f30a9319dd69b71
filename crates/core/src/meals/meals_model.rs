use serde::{Deserialize, Serialize};

/// Domain model representing a meal with its recipe lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub ingredients: Vec<MealIngredient>,
}

/// One recipe line: how much of an ingredient a single portion uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealIngredient {
    pub meal_id: i64,
    pub ingredient_id: i64,
    pub weight: f64,
    pub ingredient: IngredientRef,
}

/// Ingredient summary embedded in a recipe line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientRef {
    pub id: i64,
    pub name: String,
    pub weight: f64,
}

/// Input model for creating a new meal
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub name: String,
}

impl NewMeal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Input model for attaching an ingredient to a meal
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewMealIngredient {
    pub meal_id: i64,
    pub ingredient_id: i64,
    pub weight: f64,
}

/// Body of a single serve request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServeMealRequest {
    pub meal_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_without_ingredients_field() {
        let json = r#"{"id":1,"name":"Soup","created_at":"a","updated_at":"b"}"#;
        let meal: Meal = serde_json::from_str(json).unwrap();
        assert!(meal.ingredients.is_empty());
    }

    #[test]
    fn test_meal_with_recipe_lines() {
        let json = r#"{
            "id": 2,
            "name": "Plov",
            "created_at": "a",
            "updated_at": "b",
            "ingredients": [
                {"meal_id": 2, "ingredient_id": 5, "weight": 120.0,
                 "ingredient": {"id": 5, "name": "Rice", "weight": 9000.0}}
            ]
        }"#;
        let meal: Meal = serde_json::from_str(json).unwrap();
        assert_eq!(meal.ingredients.len(), 1);
        assert_eq!(meal.ingredients[0].ingredient.name, "Rice");
    }
}
