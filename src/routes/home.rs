use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner with the API surface")),
    tag = "Home"
)]
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Cinda API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/swagger-ui",
        "endpoints": {
            "auth": "/api/auth",
            "users": "/api/users",
            "courses": "/api/courses",
            "opportunities": "/api/opportunities",
            "portfolios": "/api/portfolios",
            "mentorships": "/api/mentorships",
            "search": "/api/search",
            "upload": "/api/upload",
            "health": "/api/health"
        }
    }))
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable")
    ),
    tag = "Home"
)]
pub async fn health(State(db): State<Arc<DatabaseConnection>>) -> (StatusCode, Json<Value>) {
    match db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Server is healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "Database connection failed"
                })),
            )
        }
    }
}
