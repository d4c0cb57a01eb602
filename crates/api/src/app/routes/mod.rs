use axum::{routing::get, Router};

pub mod inventory;
pub mod orders;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(system::healthz))
        .route("/readyz", get(system::readyz))
        .route("/summary", get(system::summary))
        .nest("/orders", orders::router())
        .nest("/inventory", inventory::router())
}
