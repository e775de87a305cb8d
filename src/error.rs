//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Business Errors**: duplicate account number, unknown account. These
///   are client errors carrying a fixed human-readable message.
/// - **Validation Errors**: request fields or balance deltas that are not
///   acceptable.
/// - **Database Errors**: any failure talking to the store. Logged, then
///   reported to the caller without detail.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Another account already uses the requested account number.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Account with this account number already exists.")]
    DuplicateAccountNumber,

    /// Requested account does not exist.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Account not found.")]
    AccountNotFound,

    /// Applying the delta would leave the balance outside the representable range.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Resulting balance is outside the supported range.")]
    BalanceOutOfRange,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `DuplicateAccountNumber` → 400 Bad Request
/// - `AccountNotFound` → 400 Bad Request
/// - `BalanceOutOfRange` → 400 Bad Request
/// - `InvalidRequest` → 400 Bad Request
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::DuplicateAccountNumber => (
                StatusCode::BAD_REQUEST,
                "duplicate_account_number",
                self.to_string(),
            ),
            AppError::AccountNotFound => (
                StatusCode::BAD_REQUEST,
                "account_not_found",
                self.to_string(),
            ),
            AppError::BalanceOutOfRange => (
                StatusCode::BAD_REQUEST,
                "balance_out_of_range",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "Database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
