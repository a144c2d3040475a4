//! Transfer Error Types

use thiserror::Error;

use crate::ledger::StoreError;
use crate::ledger::error::{ENTRIES_ACCOUNT_FK, TRANSFERS_FROM_FK, TRANSFERS_TO_FK};

/// Error taxonomy shared with the API layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Storage,
    Internal,
}

/// Transfer error types
///
/// Any error aborts the whole unit of work; nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    // === Validation Errors ===
    #[error("Source and target account cannot be the same")]
    SameAccount,

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    // === Account Errors ===
    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    // === System Errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Transfer timed out after {0}ms")]
    Timeout(u64),

    #[error("Ledger invariant violated: {0}")]
    Invariant(String),
}

impl TransferError {
    /// Wrap a storage failure with the step that produced it
    pub fn storage(op: &str, err: impl std::fmt::Display) -> Self {
        TransferError::DatabaseError(format!("{}: {}", op, err))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TransferError::SameAccount | TransferError::InvalidAmount => ErrorKind::InvalidArgument,
            TransferError::AccountNotFound(_) => ErrorKind::NotFound,
            TransferError::DatabaseError(_) | TransferError::Timeout(_) => ErrorKind::Storage,
            TransferError::Invariant(_) => ErrorKind::Internal,
        }
    }

    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::SameAccount => "SAME_ACCOUNT",
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            TransferError::DatabaseError(_) => "DATABASE_ERROR",
            TransferError::Timeout(_) => "TIMEOUT",
            TransferError::Invariant(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status for the transfer endpoint
    ///
    /// A missing account is a bad transfer request (400), not a missing resource.
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidArgument | ErrorKind::NotFound => 400,
            ErrorKind::Storage | ErrorKind::Internal => 500,
        }
    }

    /// Classify a repository error raised during `op`
    ///
    /// Foreign-key violations name the account that does not exist: the
    /// transfer insert reports which side via its constraint name, an entry
    /// insert reports `account_id`.
    pub(crate) fn from_store(
        op: &str,
        err: StoreError,
        from_account_id: i64,
        to_account_id: i64,
        account_id: Option<i64>,
    ) -> Self {
        if let StoreError::NotFound { entity, id } = &err {
            return if *entity == "account" {
                TransferError::AccountNotFound(*id)
            } else {
                TransferError::Invariant(format!("{}: {} {} vanished", op, entity, id))
            };
        }

        match (err.foreign_key_violation(), account_id) {
            (Some(TRANSFERS_FROM_FK), _) => TransferError::AccountNotFound(from_account_id),
            (Some(TRANSFERS_TO_FK), _) => TransferError::AccountNotFound(to_account_id),
            (Some(ENTRIES_ACCOUNT_FK), Some(id)) => TransferError::AccountNotFound(id),
            _ => TransferError::storage(op, &err),
        }
    }
}
