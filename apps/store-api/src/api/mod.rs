//! API routes module
//!
//! This module defines all HTTP API routes for the store API.

pub mod health;
pub mod products;
pub mod todos;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/todos", todos::router(state))
        .merge(health::router(state.clone()))
}
