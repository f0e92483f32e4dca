//! Axum route handlers and the route table.

pub mod stock;

use axum::{routing::get, Router};

use crate::state::SharedState;

/// Route table without middleware — `main` adds tracing / timeout layers.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/",           get(stock::get_stock))
        .route("/api/stock",  get(stock::get_stock))
        .route("/health",     get(stock::health_check))
        .with_state(state)
}
