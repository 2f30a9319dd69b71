use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Calendar month a report covers. Always a valid month; build it with
/// [`ReportPeriod::new`] or [`ReportPeriod::containing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

impl ReportPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(Error::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or(Error::InvalidPeriod {
            year: self.year,
            month: self.month,
        })
    }

    pub fn last_day(&self) -> Result<NaiveDate> {
        let next = if self.month == 12 {
            self.year.checked_add(1).map(|year| (year, 1))
        } else {
            Some((self.year, self.month + 1))
        };
        next.and_then(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
            .and_then(|next| next.pred_opt())
            .ok_or(Error::InvalidPeriod {
                year: self.year,
                month: self.month,
            })
    }
}

/// Per-meal row of the monthly summary report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub meal_name: String,
    pub portions_served: i64,
    pub total_possible_portions: i64,
    pub difference_rate: f64,
    #[serde(default)]
    pub potential_misuse: bool,
}

/// Ingredient movement for one reporting bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientUsage {
    pub date: String,
    pub ingredient_name: String,
    pub consumed: f64,
    pub delivered: f64,
    pub net_change: f64,
}

/// Month-level delivered/consumed totals for one ingredient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientAnalysis {
    pub ingredient_name: String,
    pub total_delivered: f64,
    pub total_consumed: f64,
    pub remaining_stock: f64,
    pub usage_efficiency: f64,
}
