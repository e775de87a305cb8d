//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Database entity representing an account
//! - `CreateAccountRequest` / `UpdateBalanceRequest`: Request bodies
//! - `AccountResponse` and friends: Response bodies returned to clients

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

const ACCOUNT_NUMBER_MIN_LEN: usize = 5;
const ACCOUNT_NUMBER_MAX_LEN: usize = 20;
const HOLDER_NAME_MAX_LEN: usize = 100;

/// Kind of bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_type", rename_all = "lowercase")]
pub enum AccountType {
    Saving,
    Checking,
}

/// Supported account currencies.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "currency")]
pub enum Currency {
    USD,
    EUR,
}

/// Represents an account record from the database.
///
/// Maps to the `accounts` table. The table's `created_at` column only orders
/// listings and is never loaded.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Account {
    /// Store-assigned identifier
    pub id: Uuid,

    /// Unique business identifier chosen by the client
    pub account_number: String,

    pub holder_name: String,

    pub account_type: AccountType,

    /// Current balance as an exact decimal
    pub balance: Decimal,

    pub currency: Currency,
}

/// Fields of an account that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub account_number: String,
    pub holder_name: String,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub currency: Currency,
}

/// Result of an atomic balance increment.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BalanceUpdate {
    pub id: Uuid,
    pub balance: Decimal,
}

/// Request body for creating a new account.
///
/// # JSON Example
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
/// # Validation
///
/// - `account_number`: 5 to 20 characters
/// - `holder_name`: at most 100 characters
/// - neither may contain control characters (the store rejects NUL)
/// - `account_type` / `currency`: rejected by deserialization when unknown
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub account_number: String,

    pub holder_name: String,

    pub account_type: AccountType,

    /// Opening balance
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    pub currency: Currency,
}

impl CreateAccountRequest {
    /// Check field contents that the JSON schema alone cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        let number_len = self.account_number.chars().count();
        if !(ACCOUNT_NUMBER_MIN_LEN..=ACCOUNT_NUMBER_MAX_LEN).contains(&number_len) {
            return Err(AppError::InvalidRequest(format!(
                "account_number must be between {ACCOUNT_NUMBER_MIN_LEN} and {ACCOUNT_NUMBER_MAX_LEN} characters"
            )));
        }

        if self.holder_name.chars().count() > HOLDER_NAME_MAX_LEN {
            return Err(AppError::InvalidRequest(format!(
                "holder_name must be at most {HOLDER_NAME_MAX_LEN} characters"
            )));
        }

        for (field, value) in [
            ("account_number", &self.account_number),
            ("holder_name", &self.holder_name),
        ] {
            if value.chars().any(char::is_control) {
                return Err(AppError::InvalidRequest(format!(
                    "{field} must not contain control characters"
                )));
            }
        }

        Ok(())
    }
}

impl From<CreateAccountRequest> for NewAccount {
    fn from(request: CreateAccountRequest) -> Self {
        Self {
            account_number: request.account_number,
            holder_name: request.holder_name,
            account_type: request.account_type,
            balance: request.balance,
            currency: request.currency,
        }
    }
}

/// Response body for account creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAccountResponse {
    pub id: String,
}

/// Request body for adjusting a balance.
///
/// `balance` is a signed delta added to the current balance, not a
/// replacement value.
///
/// ```json
/// { "id": "550e8400-e29b-41d4-a716-446655440000", "balance": 500 }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBalanceRequest {
    pub id: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Response body for a balance adjustment, carrying the new balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateBalanceResponse {
    pub id: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl From<BalanceUpdate> for UpdateBalanceResponse {
    fn from(update: BalanceUpdate) -> Self {
        Self {
            id: update.id.to_string(),
            balance: update.balance,
        }
    }
}

/// Account as returned to API clients.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "account_number": "123456789",
///   "holder_name": "John Doe",
///   "account_type": "saving",
///   "balance": 1000.0,
///   "currency": "USD"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub account_number: String,
    pub holder_name: String,
    pub account_type: AccountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub currency: Currency,
}

/// Convert database Account to API AccountResponse.
///
/// The store identifier is exposed as an opaque string.
impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            account_number: account.account_number,
            holder_name: account.holder_name,
            account_type: account.account_type,
            balance: account.balance,
            currency: account.currency,
        }
    }
}

/// Response body for the account listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountsResponse {
    pub accounts: Vec<AccountResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(account_number: &str, holder_name: &str) -> CreateAccountRequest {
        CreateAccountRequest {
            account_number: account_number.to_string(),
            holder_name: holder_name.to_string(),
            account_type: AccountType::Saving,
            balance: dec!(1000),
            currency: Currency::USD,
        }
    }

    #[test]
    fn create_request_deserializes_from_wire_format() {
        let request: CreateAccountRequest = serde_json::from_str(
            r#"{
                "account_number": "123456789",
                "holder_name": "John Doe",
                "account_type": "checking",
                "balance": 1000.5,
                "currency": "EUR"
            }"#,
        )
        .unwrap();

        assert_eq!(request.account_type, AccountType::Checking);
        assert_eq!(request.currency, Currency::EUR);
        assert_eq!(request.balance, dec!(1000.5));
    }

    #[test]
    fn unknown_account_type_is_rejected() {
        let result = serde_json::from_str::<CreateAccountRequest>(
            r#"{
                "account_number": "123456789",
                "holder_name": "John Doe",
                "account_type": "brokerage",
                "balance": 10,
                "currency": "USD"
            }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn account_number_length_is_bounded() {
        assert!(request("12345", "John Doe").validate().is_ok());
        assert!(request(&"9".repeat(20), "John Doe").validate().is_ok());
        assert!(matches!(
            request("1234", "John Doe").validate(),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            request(&"9".repeat(21), "John Doe").validate(),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn holder_name_length_is_bounded() {
        assert!(request("123456789", &"a".repeat(100)).validate().is_ok());
        assert!(matches!(
            request("123456789", &"a".repeat(101)).validate(),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(matches!(
            request("123456789", "A\u{0}B").validate(),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            request("1234\u{0}5678", "John Doe").validate(),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            request("123456789", "John\nDoe").validate(),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(request("123456789", "José Núñez").validate().is_ok());
    }

    #[test]
    fn account_response_omits_internal_fields() {
        let account = Account {
            id: Uuid::nil(),
            account_number: "123456789".to_string(),
            holder_name: "John Doe".to_string(),
            account_type: AccountType::Saving,
            balance: dec!(1500),
            currency: Currency::USD,
        };

        let value = serde_json::to_value(AccountResponse::from(account)).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 6);
        assert_eq!(value["id"], Uuid::nil().to_string());
        assert_eq!(value["account_type"], "saving");
        assert_eq!(value["currency"], "USD");
        assert_eq!(value["balance"], 1500.0);
    }
}
