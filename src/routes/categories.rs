use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

// Configured category enumeration. Advisory: historical rows may carry
// free-text labels that are not in this list.
pub async fn get_categories(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "categories": state.config.categories
    }))
}
