use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use dotenvy::dotenv;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod aggregate;
#[cfg(test)]
mod aggregate_tests;
mod config;
mod database;
mod models;
mod routes;
mod state;
mod store;

use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    // Load environment from .env file
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration in environment");

    // Initialize connection pool and bring the schema up to date
    let pool = database::create_database_connection()
        .await
        .expect("Failed to connect to PostgreSQL database");

    database::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    // CORS middleware so the UI can call the API from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Error handler
    async fn handle_404() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    let state = AppState {
        db: pool,
        config: Arc::new(config),
    };

    // Define all backend API routes
    let app = Router::new()
        // Dashboard: per-user monthly totals and budget progress
        .route("/status", get(routes::status::get_budget_status))

        // Expense CRUD + history listing
        .route(
            "/expenses",
            get(routes::expenses::list_expenses).post(routes::expenses::create_expense),
        )
        .route(
            "/expenses/:id",
            get(routes::expenses::get_expense_by_id)
                .put(routes::expenses::update_expense)
                .delete(routes::expenses::delete_expense),
        )

        // Monthly statistics
        .route("/stats", get(routes::stats::get_monthly_stats))

        // Configuration surfaces for the entry form
        .route("/users", get(routes::users::get_users))
        .route("/categories", get(routes::categories::get_categories))

        // 404 handler
        .fallback(handle_404)

        // Inject shared state and middleware
        .with_state(state)
        .layer(cors);

    let addr = "127.0.0.1:3000";
    tracing::info!("server running at http://{addr}");

    // Binding listener
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, app).await.unwrap();
}
