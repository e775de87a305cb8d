//! In-memory account repositories used by service and router tests.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AccountRepository;
use crate::{
    error::AppError,
    models::account::{Account, BalanceUpdate, NewAccount},
};

/// Accounts kept in insertion order behind a lock.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<String, AppError> {
        let mut accounts = self.accounts.write().await;

        // Mirrors the unique index of the real store
        if accounts
            .iter()
            .any(|existing| existing.account_number == account.account_number)
        {
            return Err(AppError::DuplicateAccountNumber);
        }

        let id = Uuid::new_v4();
        accounts.push(Account {
            id,
            account_number: account.account_number,
            holder_name: account.holder_name,
            account_type: account.account_type,
            balance: account.balance,
            currency: account.currency,
        });

        Ok(id.to_string())
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Account>, AppError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.account_number == account_number)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn increment_balance(
        &self,
        id: &str,
        delta: Decimal,
    ) -> Result<Option<BalanceUpdate>, AppError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        // Mirrors the balance range constraint of the real store
        account.balance = account
            .balance
            .checked_add(delta)
            .ok_or(AppError::BalanceOutOfRange)?;

        Ok(Some(BalanceUpdate {
            id: account.id,
            balance: account.balance,
        }))
    }

    async fn list_all(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.accounts.read().await.clone())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Repository whose every operation fails as if the store were unreachable.
#[derive(Debug, Default)]
pub struct UnavailableAccountRepository;

#[async_trait]
impl AccountRepository for UnavailableAccountRepository {
    async fn create(&self, _account: NewAccount) -> Result<String, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_account_number(
        &self,
        _account_number: &str,
    ) -> Result<Option<Account>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Account>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn increment_balance(
        &self,
        _id: &str,
        _delta: Decimal,
    ) -> Result<Option<BalanceUpdate>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list_all(&self) -> Result<Vec<Account>, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}
