//! Storage adapters for accounts.
//!
//! Every operation is a single round trip to the store. An absent record
//! is `Ok(None)`; a failure to reach or query the store is an `Err`.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    error::AppError,
    models::account::{Account, BalanceUpdate, NewAccount},
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::{InMemoryAccountRepository, UnavailableAccountRepository};
pub use postgres::PgAccountRepository;

/// Account storage interface.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account and return its store-assigned identifier.
    ///
    /// Fails with `DuplicateAccountNumber` if the account number is taken.
    async fn create(&self, account: NewAccount) -> Result<String, AppError>;

    /// Look up an account by its business account number.
    async fn find_by_account_number(&self, account_number: &str)
    -> Result<Option<Account>, AppError>;

    /// Look up an account by store identifier.
    ///
    /// Identifiers the store could never have issued resolve to `None`.
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError>;

    /// Atomically add `delta` to the balance.
    ///
    /// Returns the new balance only if exactly one record was modified.
    async fn increment_balance(
        &self,
        id: &str,
        delta: Decimal,
    ) -> Result<Option<BalanceUpdate>, AppError>;

    /// All accounts in insertion order.
    async fn list_all(&self) -> Result<Vec<Account>, AppError>;

    /// Verify the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
