use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

// Configured participants and their monthly targets, for the entry form
pub async fn get_users(State(state): State<AppState>) -> Json<Value> {
    let users: Vec<Value> = state
        .config
        .targets
        .iter()
        .map(|(user_name, target)| {
            json!({
                "user_name": user_name,
                "target": target
            })
        })
        .collect();

    Json(json!({
        "status": "success",
        "users": users
    }))
}
