//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod borrowers;
pub mod dashboard;
pub mod exports;
pub mod health;
pub mod imports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(imports::routes())
        .merge(borrowers::routes())
        .merge(dashboard::routes())
        .merge(exports::routes())
}
