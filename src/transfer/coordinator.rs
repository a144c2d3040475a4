//! Transfer Coordinator
//!
//! Moves money between two accounts as one PostgreSQL transaction:
//!
//! ```text
//! INSERT transfer → INSERT entry(from, -amount) → INSERT entry(to, +amount)
//!   → guard → lock accounts (lower id first) → from += -amount → to += +amount
//!   → COMMIT
//! ```
//!
//! Any failure rolls the whole transaction back. Dropping the future before
//! commit (client disconnect, timeout) drops the open `Transaction`, which
//! sqlx rolls back as well.

use std::time::{Duration, Instant};

use sqlx::{Postgres, Transaction};
use tracing::{debug, error, info, instrument, warn};

use super::error::TransferError;
use super::guard::{BalanceGuard, GuardMode};
use super::types::{TransferRequest, TransferResult};
use crate::config::TransferConfig;
use crate::db::Database;
use crate::ledger::{
    AccountRepository, CreateEntryParams, CreateTransferParams, EntryRepository, StoreError,
    TransferRepository,
};

/// Transfer Coordinator - the only writer of account balances
pub struct TransferCoordinator {
    db: Database,
    guard: BalanceGuard,
    timeout: Option<Duration>,
}

impl TransferCoordinator {
    /// Create a coordinator without a timeout
    pub fn new(db: Database, mode: GuardMode) -> Self {
        Self {
            db,
            guard: BalanceGuard::new(mode),
            timeout: None,
        }
    }

    pub fn from_config(db: Database, config: &TransferConfig) -> Self {
        Self::new(db, config.guard).with_timeout(config.timeout())
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn guard_mode(&self) -> GuardMode {
        self.guard.mode()
    }

    /// Execute a transfer
    ///
    /// Either all five rows are committed or none are.
    #[instrument(
        skip(self),
        fields(
            from = req.from_account_id,
            to = req.to_account_id,
            amount = req.amount
        )
    )]
    pub async fn transfer(&self, req: TransferRequest) -> Result<TransferResult, TransferError> {
        req.validate()?;

        let started = Instant::now();
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.execute(req)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(timeout_ms = limit.as_millis() as u64, "Transfer timed out, rolled back");
                    return Err(TransferError::Timeout(limit.as_millis() as u64));
                }
            },
            None => self.execute(req).await,
        };

        match &outcome {
            Ok(result) => info!(
                transfer_id = result.transfer.id,
                from_balance = result.from_account.balance,
                to_balance = result.to_account.balance,
                elapsed_us = started.elapsed().as_micros() as u64,
                "Transfer committed"
            ),
            Err(e) if e.http_status() >= 500 => error!(code = e.code(), error = %e, "Transfer failed"),
            Err(e) => warn!(code = e.code(), error = %e, "Transfer rejected"),
        }
        outcome
    }

    async fn execute(&self, req: TransferRequest) -> Result<TransferResult, TransferError> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| TransferError::storage("begin transaction", e))?;

        match self.apply(&mut tx, req).await {
            Ok(result) => {
                tx.commit()
                    .await
                    .map_err(|e| TransferError::storage("commit", e))?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    // The connection is discarded; the server aborts the transaction.
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    async fn apply(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        req: TransferRequest,
    ) -> Result<TransferResult, TransferError> {
        let from = req.from_account_id;
        let to = req.to_account_id;
        let store_err = move |op: &'static str, account_id: Option<i64>| {
            move |e: StoreError| TransferError::from_store(op, e, from, to, account_id)
        };

        let transfer = TransferRepository::create(
            &mut **tx,
            CreateTransferParams {
                from_account_id: from,
                to_account_id: to,
                amount: req.amount,
            },
        )
        .await
        .map_err(store_err("insert transfer", None))?;

        let from_entry = EntryRepository::create(
            &mut **tx,
            CreateEntryParams {
                account_id: from,
                amount: -req.amount,
            },
        )
        .await
        .map_err(store_err("insert source entry", Some(from)))?;

        let to_entry = EntryRepository::create(
            &mut **tx,
            CreateEntryParams {
                account_id: to,
                amount: req.amount,
            },
        )
        .await
        .map_err(store_err("insert target entry", Some(to)))?;

        debug!(transfer_id = transfer.id, "Transfer and entries inserted");

        let _permit = self.guard.enter(from, to).await;

        let (first, second) = req.lock_order();
        let first_locked = AccountRepository::get_by_id_for_update(tx, first)
            .await
            .map_err(store_err("lock account", Some(first)))?;
        let second_locked = AccountRepository::get_by_id_for_update(tx, second)
            .await
            .map_err(store_err("lock account", Some(second)))?;
        let (from_before, to_before) = if first == from {
            (first_locked.balance, second_locked.balance)
        } else {
            (second_locked.balance, first_locked.balance)
        };

        let from_account = AccountRepository::add_balance(&mut **tx, from, -req.amount)
            .await
            .map_err(store_err("debit account", Some(from)))?;
        let to_account = AccountRepository::add_balance(&mut **tx, to, req.amount)
            .await
            .map_err(store_err("credit account", Some(to)))?;

        let expected_from = from_before.checked_sub(req.amount);
        let expected_to = to_before.checked_add(req.amount);
        if expected_from != Some(from_account.balance) || expected_to != Some(to_account.balance) {
            return Err(TransferError::Invariant(format!(
                "balances moved under row lock: from {} -> {}, to {} -> {}",
                from_before, from_account.balance, to_before, to_account.balance
            )));
        }

        Ok(TransferResult {
            transfer,
            from_entry,
            to_entry,
            from_account,
            to_account,
        })
    }
}

impl std::fmt::Debug for TransferCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferCoordinator")
            .field("guard", &self.guard)
            .field("timeout", &self.timeout)
            .finish()
    }
}
