//! PostgreSQL-backed account repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::AccountRepository;
use crate::{
    db::DbPool,
    error::AppError,
    models::account::{Account, BalanceUpdate, NewAccount},
};

/// Account repository over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgAccountRepository {
    pool: DbPool,
}

impl PgAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Translate a unique-index violation into the duplicate error.
///
/// The index on `account_number` is what actually guarantees uniqueness when
/// two creates race past the service's existence check.
fn map_insert_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateAccountNumber
        }
        _ => AppError::Database(err),
    }
}

/// Translate the balance range constraint into a client error.
///
/// A concurrent increment can push the balance past what `Decimal` decodes
/// even after the service checked it against a stale read.
fn map_update_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
            AppError::BalanceOutOfRange
        }
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<String, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO accounts (account_number, holder_name, account_type, balance, currency)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(account.account_number)
        .bind(account.holder_name)
        .bind(account.account_type)
        .bind(account.balance)
        .bind(account.currency)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(id.to_string())
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, account_number, holder_name, account_type, balance, currency
            FROM accounts
            WHERE account_number = $1
            "#,
        )
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, account_number, holder_name, account_type, balance, currency
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn increment_balance(
        &self,
        id: &str,
        delta: Decimal,
    ) -> Result<Option<BalanceUpdate>, AppError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        // Single statement, so the read-modify-write happens atomically in the store
        let update = sqlx::query_as::<_, BalanceUpdate>(
            r#"
            UPDATE accounts
            SET balance = balance + $1
            WHERE id = $2
            RETURNING id, balance
            "#,
        )
        .bind(delta)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_update_error)?;

        Ok(update)
    }

    async fn list_all(&self) -> Result<Vec<Account>, AppError> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, account_number, holder_name, account_type, balance, currency
            FROM accounts
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
