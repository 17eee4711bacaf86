use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::aggregate::{self, MonthWindow};
use crate::routes::db_error;
use crate::state::AppState;
use crate::store::{self, ExpenseFilter};

// Current-month budget status for every configured user. Totals are always
// re-derived from the rows, never read from a running counter.
pub async fn get_budget_status(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let records = store::fetch_expenses(&state.db, &ExpenseFilter::default())
        .await
        .map_err(db_error)?;

    let now = Utc::now();
    let tz = state.config.timezone;
    let window = MonthWindow::containing(now, tz);
    let statuses = aggregate::compute_monthly_totals(&records, &state.config.targets, now, tz);

    let users: Vec<Value> = statuses
        .iter()
        .map(|status| {
            json!({
                "user_name": status.user_name,
                "total": status.total,
                "target": status.target,
                "remaining": status.remaining,
                "percentage": status.percentage,
                "progress": status.progress(),
            })
        })
        .collect();

    Ok(Json(json!({
        "status": "success",
        "month": window.label(),
        "users": users
    })))
}
