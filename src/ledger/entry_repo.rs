//! Entry repository

use sqlx::PgExecutor;

use super::error::{StoreError, StoreResult};
use super::models::{CreateEntryParams, Entry, ListParams, UpdateEntryParams};

const ENTITY: &str = "entry";

/// Entry repository
///
/// The transfer flow only ever appends; `update` and `delete` back the
/// administrative CRUD surface.
pub struct EntryRepository;

impl EntryRepository {
    /// Append an entry
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        params: CreateEntryParams,
    ) -> StoreResult<Entry> {
        let entry = sqlx::query_as::<_, Entry>(
            r#"INSERT INTO entries (account_id, amount)
               VALUES ($1, $2)
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(params.account_id)
        .bind(params.amount)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i64) -> StoreResult<Entry> {
        sqlx::query_as::<_, Entry>(
            "SELECT id, account_id, amount, created_at FROM entries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        params: ListParams,
    ) -> StoreResult<Vec<Entry>> {
        let rows = sqlx::query_as::<_, Entry>(
            r#"SELECT id, account_id, amount, created_at
               FROM entries ORDER BY id LIMIT $1 OFFSET $2"#,
        )
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// List entries of one account ordered by ascending id
    pub async fn list_by_account<'e>(
        executor: impl PgExecutor<'e>,
        account_id: i64,
        params: ListParams,
    ) -> StoreResult<Vec<Entry>> {
        let rows = sqlx::query_as::<_, Entry>(
            r#"SELECT id, account_id, amount, created_at
               FROM entries WHERE account_id = $1
               ORDER BY id LIMIT $2 OFFSET $3"#,
        )
        .bind(account_id)
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        params: UpdateEntryParams,
    ) -> StoreResult<Entry> {
        sqlx::query_as::<_, Entry>(
            r#"UPDATE entries SET amount = $2
               WHERE id = $1
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(params.id)
        .bind(params.amount)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY, params.id))
    }

    /// Delete an entry, returning the deleted id
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: i64) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("DELETE FROM entries WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }
}
