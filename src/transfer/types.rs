//! Transfer request and result types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::TransferError;
use crate::ledger::{Account, Entry, Transfer};

/// Request to move `amount` from one account to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

impl TransferRequest {
    pub fn new(from_account_id: i64, to_account_id: i64, amount: i64) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
        }
    }

    /// Reject requests that can never succeed, before any I/O
    pub fn validate(&self) -> Result<(), TransferError> {
        if self.amount <= 0 {
            return Err(TransferError::InvalidAmount);
        }
        if self.from_account_id == self.to_account_id {
            return Err(TransferError::SameAccount);
        }
        Ok(())
    }

    /// Account ids in row-lock order (lower id first)
    pub fn lock_order(&self) -> (i64, i64) {
        if self.from_account_id < self.to_account_id {
            (self.from_account_id, self.to_account_id)
        } else {
            (self.to_account_id, self.from_account_id)
        }
    }
}

/// Everything a committed transfer wrote
///
/// `from_account` and `to_account` carry the balances as of commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransferResult {
    pub transfer: Transfer,
    pub from_entry: Entry,
    pub to_entry: Entry,
    pub from_account: Account,
    pub to_account: Account,
}
