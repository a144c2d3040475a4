//! Atomic money transfers
//!
//! A transfer debits one account, credits another and appends the matching
//! ledger rows inside a single PostgreSQL transaction.
//!
//! # Safety Invariants
//!
//! 1. **All or nothing**: the transfer row, both entries and both balance
//!    updates commit together or not at all
//! 2. **Lock order**: account rows are locked lower id first, whatever the
//!    transfer direction
//! 3. **No cached balances**: every balance read happens under a row lock

pub mod coordinator;
pub mod error;
pub mod guard;
pub mod types;

pub use coordinator::TransferCoordinator;
pub use error::{ErrorKind, TransferError};
pub use guard::{BalanceGuard, GuardMode};
pub use types::{TransferRequest, TransferResult};
