//! HTTP handlers
//!
//! Glob re-exports keep the `utoipa` path structs reachable as
//! `crate::gateway::handlers::*` for the OpenAPI document.

pub mod account;
pub mod entry;
pub mod health;
pub mod transfer;

pub use account::*;
pub use entry::*;
pub use health::*;
pub use transfer::*;
