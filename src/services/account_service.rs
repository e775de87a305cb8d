//! Account service - business rules in front of account storage.
//!
//! This service enforces:
//! - Account numbers are unique on create
//! - Balance updates target an existing account
//! - Balance deltas satisfy the configured `BalanceDeltaPolicy`

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    config::BalanceDeltaPolicy,
    error::AppError,
    models::account::{
        AccountResponse, AccountsResponse, CreateAccountRequest, CreateAccountResponse,
        UpdateBalanceRequest, UpdateBalanceResponse,
    },
    repositories::AccountRepository,
};

/// Account operations backed by an injected repository.
#[derive(Clone)]
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
    delta_policy: BalanceDeltaPolicy,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepository>, delta_policy: BalanceDeltaPolicy) -> Self {
        Self {
            repository,
            delta_policy,
        }
    }

    /// Storage health probe.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Create a new account.
    ///
    /// # Process
    ///
    /// 1. Look up the account number; reject if it is already taken
    /// 2. Insert the account and return its store-assigned identifier
    ///
    /// A concurrent create that slips past step 1 is still rejected by the
    /// store's unique index, surfacing as the same duplicate error.
    ///
    /// # Errors
    ///
    /// - `DuplicateAccountNumber`: account number already exists
    /// - `Database`: storage failure
    pub async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, AppError> {
        if self
            .repository
            .find_by_account_number(&request.account_number)
            .await?
            .is_some()
        {
            tracing::debug!(account_number = %request.account_number, "Duplicate account number");
            return Err(AppError::DuplicateAccountNumber);
        }

        let id = self.repository.create(request.into()).await?;
        tracing::info!(account_id = %id, "Account created");

        Ok(CreateAccountResponse { id })
    }

    /// Add a signed delta to an account's balance.
    ///
    /// # Process
    ///
    /// 1. Check the delta against the balance delta policy
    /// 2. Verify the account exists
    /// 3. Check the resulting balance is representable
    /// 4. Atomically increment the stored balance
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: delta rejected by the policy
    /// - `AccountNotFound`: no account with this identifier
    /// - `BalanceOutOfRange`: the new balance cannot be represented exactly
    /// - `Database`: storage failure
    pub async fn update_balance(
        &self,
        request: UpdateBalanceRequest,
    ) -> Result<UpdateBalanceResponse, AppError> {
        check_delta(self.delta_policy, request.balance)?;

        let Some(account) = self.repository.find_by_id(&request.id).await? else {
            return Err(AppError::AccountNotFound);
        };

        check_new_balance(account.balance, request.balance)?;

        match self
            .repository
            .increment_balance(&request.id, request.balance)
            .await?
        {
            Some(update) => {
                tracing::info!(account_id = %update.id, delta = %request.balance, "Balance updated");
                Ok(update.into())
            }
            None => {
                // Existed a moment ago but nothing was modified
                tracing::warn!(account_id = %request.id, "Balance increment matched no account");
                Err(AppError::AccountNotFound)
            }
        }
    }

    /// List every account in storage order.
    pub async fn list_accounts(&self) -> Result<AccountsResponse, AppError> {
        let accounts = self.repository.list_all().await?;

        Ok(AccountsResponse {
            accounts: accounts.into_iter().map(AccountResponse::from).collect(),
        })
    }
}

/// Apply the balance delta policy.
fn check_delta(policy: BalanceDeltaPolicy, delta: Decimal) -> Result<(), AppError> {
    let violated = match policy {
        BalanceDeltaPolicy::AtLeastOne if delta < Decimal::ONE => Some("at least 1"),
        BalanceDeltaPolicy::Positive if delta <= Decimal::ZERO => Some("greater than 0"),
        _ => None,
    };

    match violated {
        Some(rule) => Err(AppError::InvalidRequest(format!("balance must be {rule}"))),
        None => Ok(()),
    }
}

/// Reject a delta whose sum with `current` overflows `Decimal` or would be
/// rounded to fit it.
fn check_new_balance(current: Decimal, delta: Decimal) -> Result<Decimal, AppError> {
    current
        .checked_add(delta)
        .filter(|sum| sum.checked_sub(current) == Some(delta))
        .ok_or(AppError::BalanceOutOfRange)
}
