use serde::{Deserialize, Serialize};

use crate::constants::{GOOD_STOCK_THRESHOLD, MEDIUM_STOCK_THRESHOLD};

/// How many portions of a meal current inventory can cover.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortionEstimate {
    pub meal_id: i64,
    pub meal_name: String,
    pub estimated_portions: i64,
    pub updated_at: String,
}

impl PortionEstimate {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_portions(self.estimated_portions)
    }
}

/// Coarse bucket for an estimated portion count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Good,
    Medium,
    Low,
}

impl StockLevel {
    pub fn from_portions(portions: i64) -> Self {
        if portions > GOOD_STOCK_THRESHOLD {
            StockLevel::Good
        } else if portions > MEDIUM_STOCK_THRESHOLD {
            StockLevel::Medium
        } else {
            StockLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::Good => "Good Stock",
            StockLevel::Medium => "Medium Stock",
            StockLevel::Low => "Low Stock",
        }
    }
}
