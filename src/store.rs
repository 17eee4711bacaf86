use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::database::Database;
use crate::models::expense::ExpenseRecord;

/// Optional row filters for `fetch_expenses`. `start`/`end` are inclusive
/// calendar dates applied to `created_at` as UTC day bounds.
#[derive(Debug, Default)]
pub struct ExpenseFilter {
    pub user_name: Option<String>,
    pub category: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub struct NewExpense {
    pub user_name: String,
    pub amount: Decimal,
    pub description: String,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct ExpenseChanges {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub memo: Option<String>,
}

pub async fn fetch_expenses(
    db: &Database,
    filter: &ExpenseFilter,
) -> Result<Vec<ExpenseRecord>, sqlx::Error> {
    let mut sql = String::from(
        "SELECT id, user_name, amount, description, memo, created_at FROM expenses WHERE 1 = 1",
    );

    let mut param_count = 1;

    if filter.user_name.is_some() {
        sql.push_str(&format!(" AND user_name = ${}", param_count));
        param_count += 1;
    }

    if filter.category.is_some() {
        sql.push_str(&format!(" AND description = ${}", param_count));
        param_count += 1;
    }

    if filter.start.is_some() {
        sql.push_str(&format!(" AND created_at >= ${}", param_count));
        param_count += 1;
    }

    if filter.end.is_some() {
        sql.push_str(&format!(" AND created_at < ${}", param_count));
        param_count += 1;
    }

    sql.push_str(" ORDER BY created_at DESC, id DESC");

    if filter.limit.is_some() {
        sql.push_str(&format!(" LIMIT ${}", param_count));
        param_count += 1;
    }

    if filter.offset.is_some() {
        sql.push_str(&format!(" OFFSET ${}", param_count));
    }

    let mut query = sqlx::query_as::<_, ExpenseRecord>(&sql);

    if let Some(user_name) = &filter.user_name {
        query = query.bind(user_name);
    }

    if let Some(category) = &filter.category {
        query = query.bind(category);
    }

    if let Some(start) = filter.start {
        query = query.bind(start.and_time(NaiveTime::MIN).and_utc());
    }

    if let Some(end) = filter.end {
        // Inclusive end date: bound at the start of the following day.
        let bound = end.succ_opt().unwrap_or(end);
        query = query.bind(bound.and_time(NaiveTime::MIN).and_utc());
    }

    if let Some(limit) = filter.limit {
        query = query.bind(limit);
    }

    if let Some(offset) = filter.offset {
        query = query.bind(offset);
    }

    query.fetch_all(db).await
}

pub async fn fetch_expense_by_id(
    db: &Database,
    id: i32,
) -> Result<Option<ExpenseRecord>, sqlx::Error> {
    sqlx::query_as::<_, ExpenseRecord>("SELECT * FROM expenses WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_expense(
    db: &Database,
    expense: &NewExpense,
) -> Result<ExpenseRecord, sqlx::Error> {
    sqlx::query_as::<_, ExpenseRecord>(
        "INSERT INTO expenses (user_name, amount, description, memo, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&expense.user_name)
    .bind(expense.amount)
    .bind(&expense.description)
    .bind(expense.memo.as_deref())
    .bind(expense.created_at)
    .fetch_one(db)
    .await
}

pub async fn update_expense(
    db: &Database,
    id: i32,
    changes: &ExpenseChanges,
) -> Result<Option<ExpenseRecord>, sqlx::Error> {
    sqlx::query_as::<_, ExpenseRecord>(
        r#"UPDATE expenses SET
           amount = COALESCE($1, amount),
           description = COALESCE($2, description),
           memo = COALESCE($3, memo)
           WHERE id = $4 RETURNING *"#,
    )
    .bind(changes.amount)
    .bind(changes.description.as_deref())
    .bind(changes.memo.as_deref())
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_expense(db: &Database, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
