//! Product API Module
//!
//! Read-only catalog access for the storefront. Product rows are written by
//! seeding/back-office tooling, not through this API.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Product router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}
