//! Ledger store repositories
//!
//! PostgreSQL-backed storage for accounts, entries and transfers.
//! Repositories are stateless unit structs whose functions take any
//! `sqlx::PgExecutor`, so the same code runs against the pool or inside a
//! transfer's transaction.

pub mod account_repo;
pub mod entry_repo;
pub mod error;
pub mod models;
pub mod transfer_repo;

#[cfg(test)]
pub(crate) mod test_support;

pub use account_repo::AccountRepository;
pub use entry_repo::EntryRepository;
pub use error::{StoreError, StoreResult};
pub use models::{
    Account, CreateAccountParams, CreateEntryParams, CreateTransferParams, Entry, ListParams,
    Transfer, UpdateEntryParams,
};
pub use transfer_repo::TransferRepository;
