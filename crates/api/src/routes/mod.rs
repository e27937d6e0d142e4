//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod documents;
pub mod health;
pub mod journals;
pub mod postings;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(accounts::routes())
        .merge(documents::routes())
        .merge(journals::routes())
        .merge(postings::routes())
}
