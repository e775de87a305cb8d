//! HTTP request handlers (route handlers) and the application router.
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Delegates to the account service
//! 3. Returns HTTP response (JSON, status code)

use axum::{
    Router,
    routing::{get, patch},
};
use tower_http::trace::TraceLayer;

use crate::services::AccountService;

/// Account management endpoints
pub mod accounts;
/// Service health endpoint
pub mod health;

/// State shared with every handler.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/accounts",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route(
            "/accounts/{account_number}",
            patch(accounts::update_balance),
        )
        // One tracing span per HTTP request
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
