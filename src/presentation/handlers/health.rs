use crate::infrastructure::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Health check endpoint. Pings the database when administrators are kept in
/// Postgres.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(pool) = state.pool else {
        return (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "store": "memory"
            })),
        );
    };

    match sqlx::query("SELECT 1").fetch_one(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "store": "connected"
            })),
        ),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "store": "disconnected"
                })),
            )
        }
    }
}
