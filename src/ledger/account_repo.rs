//! Account repository

use sqlx::{PgExecutor, Postgres, Transaction};

use super::error::{StoreError, StoreResult};
use super::models::{Account, CreateAccountParams, ListParams};

const ENTITY: &str = "account";

/// Account repository for CRUD operations
///
/// Every function accepts any Postgres executor (pool, connection or open
/// transaction) except [`AccountRepository::get_by_id_for_update`], which
/// only makes sense inside a unit of work.
pub struct AccountRepository;

impl AccountRepository {
    /// Create a new account
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        params: &CreateAccountParams,
    ) -> StoreResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (owner, currency, balance)
               VALUES ($1, $2, $3)
               RETURNING id, owner, currency, balance, created_at"#,
        )
        .bind(&params.owner)
        .bind(&params.currency)
        .bind(params.balance)
        .fetch_one(executor)
        .await?;

        Ok(account)
    }

    /// Get account by ID
    pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i64) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, currency, balance, created_at
               FROM accounts WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// Get account by ID and hold a row lock until the transaction ends
    ///
    /// Uses `FOR NO KEY UPDATE`: it excludes other balance writers but does
    /// not conflict with the `FOR KEY SHARE` locks that foreign-key checks
    /// take when entries or transfers referencing this account are inserted.
    pub async fn get_by_id_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, currency, balance, created_at
               FROM accounts WHERE id = $1
               FOR NO KEY UPDATE"#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// List accounts ordered by ascending id
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        params: ListParams,
    ) -> StoreResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, currency, balance, created_at
               FROM accounts ORDER BY id LIMIT $1 OFFSET $2"#,
        )
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Apply a signed delta to the balance and return the updated row
    pub async fn add_balance<'e>(
        executor: impl PgExecutor<'e>,
        id: i64,
        delta: i64,
    ) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"UPDATE accounts SET balance = balance + $2
               WHERE id = $1
               RETURNING id, owner, currency, balance, created_at"#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// Overwrite the balance (administrative CRUD only, never used by transfers)
    pub async fn update_balance<'e>(
        executor: impl PgExecutor<'e>,
        id: i64,
        balance: i64,
    ) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"UPDATE accounts SET balance = $2
               WHERE id = $1
               RETURNING id, owner, currency, balance, created_at"#,
        )
        .bind(id)
        .bind(balance)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// Delete an account, returning the deleted id
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: i64) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("DELETE FROM accounts WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }
}
