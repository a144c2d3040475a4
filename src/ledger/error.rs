//! Ledger store error types

use thiserror::Error;

/// PostgreSQL SQLSTATE for `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Foreign key names declared in `migrations/`
pub const TRANSFERS_FROM_FK: &str = "transfers_from_account_id_fkey";
pub const TRANSFERS_TO_FK: &str = "transfers_to_account_id_fkey";
pub const ENTRIES_ACCOUNT_FK: &str = "entries_account_id_fkey";

/// Repository errors
///
/// Missing rows are always reported as [`StoreError::NotFound`], never as a
/// zero-valued record.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StoreError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Name of the violated foreign key, if this error is an FK violation
    pub fn foreign_key_violation(&self) -> Option<&str> {
        match self {
            StoreError::Database(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
            {
                Some(db_err.constraint().unwrap_or_default())
            }
            _ => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
