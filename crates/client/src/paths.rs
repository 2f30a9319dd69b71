//! Backend endpoint paths.

pub const INGREDIENTS_PATH: &str = "/ingredient/";
pub const MEALS_PATH: &str = "/meal/";
pub const MEAL_INGREDIENTS_PATH: &str = "/meal-ingredient/";
pub const SERVE_MEAL_PATH: &str = "/serve-meal/";
pub const USERS_PATH: &str = "/user/";

pub const MONTHLY_SUMMARY_PATH: &str = "/report/monthly-summary/";
pub const INGREDIENT_USAGE_PATH: &str = "/report/ingredient-usage/";
pub const INGREDIENT_ANALYSIS_PATH: &str = "/report/ingredient-analysis/";

/// Snapshot of notifications the live feed starts from.
pub const NOTIFICATIONS_SNAPSHOT_PATH: &str = "/ws/notification/notifications";
/// Snapshot of portion estimates the live feed starts from.
pub const PORTIONS_SNAPSHOT_PATH: &str = "/ws/portion/portions";

/// Push stream of new notifications.
pub const NOTIFICATIONS_STREAM_PATH: &str = "/ws/notifications/alert";
/// Push stream of portion estimate updates.
pub const PORTIONS_STREAM_PATH: &str = "/ws/portion/stream";
