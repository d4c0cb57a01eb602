use std::sync::Arc;

use axum::{
    extract::{Extension, OriginalUri},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::dto::{self, MessageResponse};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn root() -> impl IntoResponse {
    Json(dto::BANNER)
}

pub async fn healthz() -> impl IntoResponse {
    Json(MessageResponse::new("alive"))
}

pub async fn readyz(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.ready().await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("ready"))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            errors::json_error(StatusCode::SERVICE_UNAVAILABLE, "not_ready", e.to_string())
        }
    }
}

pub async fn summary(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.summary.summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Unmatched paths answer in the same error shape as every handler.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> axum::response::Response {
    errors::json_error(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("no route for {}", uri.path()),
    )
}
