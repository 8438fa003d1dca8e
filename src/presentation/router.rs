use crate::infrastructure::state::AppState;
use crate::presentation::handlers;
use crate::presentation::middleware::cors::cors_layer;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::routes;
use axum::{Json, Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub fn app(state: AppState, cors_allowed_origins: &str) -> anyhow::Result<Router> {
    Ok(Router::new()
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1/administrators", routes::administrators::routes())
        .layer(cors_layer(cors_allowed_origins)?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
