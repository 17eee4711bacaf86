use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::aggregate::{self, MonthWindow};
use crate::models::stats::StatsQuery;
use crate::routes::db_error;
use crate::state::AppState;
use crate::store::{self, ExpenseFilter};

// Monthly statistics: spending summary plus per-category breakdown,
// optionally restricted to one user
pub async fn get_monthly_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let tz = state.config.timezone;

    let window = match query.month.as_deref() {
        Some(raw) => {
            match parse_month(raw).and_then(|(year, month)| MonthWindow::for_month(year, month, tz))
            {
                Some(window) => window,
                None => {
                    return Err((
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "status": "error",
                            "message": "Invalid month. Use the YYYY-MM format."
                        })),
                    ));
                }
            }
        }
        None => MonthWindow::containing(Utc::now(), tz),
    };

    let records = store::fetch_expenses(&state.db, &ExpenseFilter::default())
        .await
        .map_err(db_error)?;

    let user = query.user_name.as_deref();
    let summary = aggregate::spending_summary(&records, &window, user);
    let categories = aggregate::category_breakdown(&records, &window, user);

    Ok(Json(json!({
        "status": "success",
        "month": window.label(),
        "summary": summary,
        "categories": categories
    })))
}

fn parse_month(raw: &str) -> Option<(i32, u32)> {
    let (year, month) = raw.split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}
