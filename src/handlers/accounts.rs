//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /accounts - Create new account
//! - PATCH /accounts/{account_number} - Adjust an account balance
//! - GET /accounts - List all accounts

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::AppError,
    handlers::AppState,
    models::account::{
        AccountsResponse, CreateAccountRequest, CreateAccountResponse, UpdateBalanceRequest,
        UpdateBalanceResponse,
    },
};

/// Create a new account.
///
/// # Endpoint
///
/// `POST /accounts`
///
/// # Request Body
///
/// ```json
/// {
///   "account_number": "123456789",
///   "holder_name": "John Doe",
///   "account_type": "saving",
///   "balance": 1000.0,
///   "currency": "USD"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"id": "<store-assigned id>"}`
/// - **Error (400)**: Duplicate account number or invalid field
/// - **Error (500)**: Database error
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<CreateAccountResponse>, AppError> {
    request.validate()?;

    let created = state.accounts.create_account(request).await?;

    Ok(Json(created))
}

/// Add a signed delta to an account balance.
///
/// # Endpoint
///
/// `PATCH /accounts/{account_number}`
///
/// The account is addressed by the `id` in the body; the path segment is
/// accepted for route compatibility only. A path segment that does not
/// match the addressed account's number is not detected.
///
/// # Request Body
///
/// ```json
/// { "id": "550e8400-e29b-41d4-a716-446655440000", "balance": 500 }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"id": "...", "balance": 1500.0}`
/// - **Error (400)**: Account not found, delta rejected by policy, or
///   resulting balance out of range
/// - **Error (500)**: Database error
pub async fn update_balance(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
    Json(request): Json<UpdateBalanceRequest>,
) -> Result<Json<UpdateBalanceResponse>, AppError> {
    tracing::debug!(%account_number, account_id = %request.id, "Balance update requested");

    let updated = state.accounts.update_balance(request).await?;

    Ok(Json(updated))
}

/// List all accounts.
///
/// # Endpoint
///
/// `GET /accounts`
///
/// # Response
///
/// ```json
/// {
///   "accounts": [
///     {
///       "id": "550e8400-e29b-41d4-a716-446655440000",
///       "account_number": "123456789",
///       "holder_name": "John Doe",
///       "account_type": "saving",
///       "balance": 1000.0,
///       "currency": "USD"
///     }
///   ]
/// }
/// ```
///
/// Accounts come back in insertion order.
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<AccountsResponse>, AppError> {
    let accounts = state.accounts.list_accounts().await?;

    Ok(Json(accounts))
}
