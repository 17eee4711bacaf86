use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted expense row. `created_at` is when the expense is attributed,
/// not necessarily when the row was inserted: backdated entries carry
/// midnight UTC of the chosen date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExpenseRecord {
    pub id: i32,
    pub user_name: String,
    pub amount: Decimal,
    pub description: String,
    pub memo: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub user_name: String,
    pub amount: Decimal,
    pub description: String,
    pub memo: Option<String>,
    pub date: Option<String>, // Format: "YYYY-MM-DD", backdates the entry
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub memo: Option<String>,
}
