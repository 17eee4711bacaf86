use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::expense::{CreateExpenseRequest, UpdateExpenseRequest};
use crate::routes::db_error;
use crate::state::AppState;
use crate::store::{self, ExpenseChanges, ExpenseFilter, NewExpense};

#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    pub user_name: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn parse_date_param(
    raw: Option<&str>,
    field: &str,
) -> Result<Option<NaiveDate>, (StatusCode, Json<Value>)> {
    match raw {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Ok(Some(date)),
            Err(_) => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "status": "error",
                    "message": format!("Invalid {field}. Use the YYYY-MM-DD format.")
                })),
            )),
        },
        None => Ok(None),
    }
}

// List expenses, newest first, with optional filters and paging
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let start = parse_date_param(query.start_date.as_deref(), "start_date")?;
    let end = parse_date_param(query.end_date.as_deref(), "end_date")?;

    let filter = ExpenseFilter {
        user_name: query.user_name,
        category: query.category,
        start,
        end,
        limit: Some(query.limit.unwrap_or(50)),
        offset: Some(query.offset.unwrap_or(0)),
    };

    let expenses = store::fetch_expenses(&state.db, &filter)
        .await
        .map_err(db_error)?;

    Ok(Json(json!({
        "status": "success",
        "expenses": expenses
    })))
}

// Record a new expense
pub async fn create_expense(
    State(state): State<AppState>,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    // Validate input
    if !state.config.targets.contains_key(payload.user_name.as_str()) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": "error",
                "message": "Unknown user."
            })),
        ));
    }

    if payload.amount <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": "error",
                "message": "Amount must be greater than 0."
            })),
        ));
    }

    if payload.description.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": "error",
                "message": "Description must not be empty."
            })),
        ));
    }

    // Backdated entries are pinned to midnight UTC of the chosen date
    let created_at = match parse_date_param(payload.date.as_deref(), "date")? {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    let memo = payload
        .memo
        .as_deref()
        .map(str::trim)
        .filter(|memo| !memo.is_empty())
        .map(str::to_string);

    let new_expense = NewExpense {
        user_name: payload.user_name,
        amount: payload.amount,
        description: payload.description.trim().to_string(),
        memo,
        created_at,
    };

    let expense = store::insert_expense(&state.db, &new_expense)
        .await
        .map_err(db_error)?;

    Ok(Json(json!({
        "status": "success",
        "message": "Expense recorded!",
        "data": expense
    })))
}

// Get a single expense by ID
pub async fn get_expense_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let expense = store::fetch_expense_by_id(&state.db, id)
        .await
        .map_err(db_error)?;

    match expense {
        Some(expense) => Ok(Json(json!({
            "status": "success",
            "data": expense
        }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "error",
                "message": "Expense not found."
            })),
        )),
    }
}

// Partially update an expense (amount, description, memo)
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    // Validate provided fields
    if let Some(amount) = payload.amount {
        if amount <= Decimal::ZERO {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "status": "error",
                    "message": "Amount must be greater than 0."
                })),
            ));
        }
    }

    if let Some(description) = &payload.description {
        if description.trim().is_empty() {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "status": "error",
                    "message": "Description must not be empty."
                })),
            ));
        }
    }

    let changes = ExpenseChanges {
        amount: payload.amount,
        description: payload.description.map(|description| description.trim().to_string()),
        memo: payload.memo,
    };

    let updated = store::update_expense(&state.db, id, &changes)
        .await
        .map_err(db_error)?;

    match updated {
        Some(expense) => Ok(Json(json!({
            "status": "success",
            "message": "Expense updated!",
            "data": expense
        }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "error",
                "message": "Expense not found."
            })),
        )),
    }
}

// Delete an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let deleted = store::delete_expense(&state.db, id)
        .await
        .map_err(db_error)?;

    if !deleted {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "error",
                "message": "Expense not found."
            })),
        ));
    }

    Ok(Json(json!({
        "status": "success",
        "message": "Expense deleted!"
    })))
}
