//! Simple Ledger - accounts, entries and atomic transfers on PostgreSQL
//!
//! # Modules
//!
//! - [`config`] - YAML configuration (`config/{env}.yaml`)
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - PostgreSQL pool and migrations
//! - [`ledger`] - Account, entry and transfer repositories
//! - [`transfer`] - Transfer coordinator (the only balance writer)
//! - [`gateway`] - HTTP API

pub mod config;
pub mod db;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod transfer;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use ledger::{Account, Entry, StoreError, Transfer};
pub use transfer::{GuardMode, TransferCoordinator, TransferError, TransferRequest, TransferResult};
