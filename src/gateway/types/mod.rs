//! Gateway types module
//!
//! ## Input Types
//! - [`ValidatedJson`], [`ValidatedQuery`], [`ValidatedPath`]: Axum extractors
//!   that run `validator` rules before the handler
//! - Request DTOs for accounts and transfers
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`ApiError`]: Error rendered as `{code, msg}`

pub mod request;
pub mod response;

pub use request::{
    CreateAccountRequest, CreateTransferRequest, IdPath, ListAccountsQuery, SUPPORTED_CURRENCIES,
    ValidatedJson, ValidatedPath, ValidatedQuery,
};
pub use response::{ApiError, ApiResponse, ApiResult, error_codes, ok};
