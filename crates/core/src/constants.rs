/// Portions above this count are reported as good stock.
pub const GOOD_STOCK_THRESHOLD: i64 = 10;

/// Portions above this count (and not above the good threshold) are medium stock.
pub const MEDIUM_STOCK_THRESHOLD: i64 = 5;

/// Grouping the ingredient-usage report is requested with.
pub const USAGE_GROUP_BY_DAY: &str = "day";
