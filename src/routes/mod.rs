pub mod categories;
pub mod expenses;
pub mod stats;
pub mod status;
pub mod users;

use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

/// Shared 500 envelope for failed store calls.
pub(crate) fn db_error(err: sqlx::Error) -> (StatusCode, Json<Value>) {
    tracing::error!("database error: {err:?}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "status": "error",
            "message": "Something went wrong on the server."
        })),
    )
}
