use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: String,
    pub total: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SpendingSummary {
    pub total: Decimal,
    pub average: Decimal,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub month: Option<String>, // Format: "YYYY-MM", defaults to the current month
    pub user_name: Option<String>,
}
