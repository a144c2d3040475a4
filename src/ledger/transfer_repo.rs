//! Transfer record repository

use sqlx::PgExecutor;

use super::error::{StoreError, StoreResult};
use super::models::{CreateTransferParams, ListParams, Transfer};

const ENTITY: &str = "transfer";

/// Transfer records are create/read only
pub struct TransferRepository;

impl TransferRepository {
    /// Insert a transfer record
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        params: CreateTransferParams,
    ) -> StoreResult<Transfer> {
        let transfer = sqlx::query_as::<_, Transfer>(
            r#"INSERT INTO transfers (from_account_id, to_account_id, amount)
               VALUES ($1, $2, $3)
               RETURNING id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(params.from_account_id)
        .bind(params.to_account_id)
        .bind(params.amount)
        .fetch_one(executor)
        .await?;

        Ok(transfer)
    }

    pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i64) -> StoreResult<Transfer> {
        sqlx::query_as::<_, Transfer>(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        params: ListParams,
    ) -> StoreResult<Vec<Transfer>> {
        let rows = sqlx::query_as::<_, Transfer>(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers ORDER BY id LIMIT $1 OFFSET $2"#,
        )
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// List transfers where the account is either side
    pub async fn list_by_account<'e>(
        executor: impl PgExecutor<'e>,
        account_id: i64,
        params: ListParams,
    ) -> StoreResult<Vec<Transfer>> {
        let rows = sqlx::query_as::<_, Transfer>(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers
               WHERE from_account_id = $1 OR to_account_id = $1
               ORDER BY id LIMIT $2 OFFSET $3"#,
        )
        .bind(account_id)
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::{create_random_account, test_database};

    #[tokio::test]
    #[ignore = "requires PostgreSQL database"]
    async fn test_create_and_get_transfer() {
        let db = test_database().await;
        let from = create_random_account(db.pool()).await;
        let to = create_random_account(db.pool()).await;

        let transfer = TransferRepository::create(
            db.pool(),
            CreateTransferParams {
                from_account_id: from.id,
                to_account_id: to.id,
                amount: 10,
            },
        )
        .await
        .unwrap();
        assert_eq!(transfer.from_account_id, from.id);
        assert_eq!(transfer.to_account_id, to.id);
        assert_eq!(transfer.amount, 10);

        let fetched = TransferRepository::get_by_id(db.pool(), transfer.id)
            .await
            .unwrap();
        assert_eq!(fetched, transfer);

        let by_to = TransferRepository::list_by_account(db.pool(), to.id, ListParams::new(5, 0))
            .await
            .unwrap();
        assert_eq!(by_to, vec![transfer]);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL database"]
    async fn test_table_rejects_non_positive_amount() {
        let db = test_database().await;
        let from = create_random_account(db.pool()).await;
        let to = create_random_account(db.pool()).await;

        let result = TransferRepository::create(
            db.pool(),
            CreateTransferParams {
                from_account_id: from.id,
                to_account_id: to.id,
                amount: 0,
            },
        )
        .await;
        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL database"]
    async fn test_get_transfer_not_found() {
        let db = test_database().await;

        let err = TransferRepository::get_by_id(db.pool(), i64::MAX)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
