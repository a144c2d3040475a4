//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `ApiError`: Handler error, rendered as `{code, msg}`
//! - `error_codes`: Standard error code constants

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ledger::StoreError;
use crate::transfer::TransferError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or absent (error)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Handler Errors
// ============================================================================

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Wrap handler output in a success envelope
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Error returned by handlers and extractors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn not_found(code: i32, msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, msg)
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            msg,
        )
    }

    pub fn db_error(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::DATABASE_ERROR,
            msg,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.code, msg = %self.msg, "Request failed");
        }
        let body = Json(ApiResponse::<()>::error(self.code, self.msg));
        (self.status, body).into_response()
    }
}

/// Plain reads: a missing row is 404
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::NotFound { entity, .. } => {
                let code = match *entity {
                    "account" => error_codes::ACCOUNT_NOT_FOUND,
                    "entry" => error_codes::ENTRY_NOT_FOUND,
                    "transfer" => error_codes::TRANSFER_NOT_FOUND,
                    _ => error_codes::RESOURCE_NOT_FOUND,
                };
                ApiError::not_found(code, err.to_string())
            }
            StoreError::Database(_) => ApiError::db_error(err.to_string()),
        }
    }
}

/// Transfers: a missing account is a bad request, see [`TransferError::http_status`]
impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        let code = match err {
            TransferError::SameAccount => error_codes::SAME_ACCOUNT,
            TransferError::InvalidAmount => error_codes::INVALID_AMOUNT,
            TransferError::AccountNotFound(_) => error_codes::ACCOUNT_NOT_FOUND,
            TransferError::DatabaseError(_) => error_codes::DATABASE_ERROR,
            TransferError::Timeout(_) => error_codes::TIMEOUT,
            TransferError::Invariant(_) => error_codes::INTERNAL_ERROR,
        };
        let status = StatusCode::from_u16(err.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        ApiError::new(status, code, err.to_string())
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const SAME_ACCOUNT: i32 = 1002;
    pub const INVALID_AMOUNT: i32 = 1003;

    // Resource errors (4xxx)
    pub const RESOURCE_NOT_FOUND: i32 = 4000;
    pub const ACCOUNT_NOT_FOUND: i32 = 4001;
    pub const ENTRY_NOT_FOUND: i32 = 4002;
    pub const TRANSFER_NOT_FOUND: i32 = 4003;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
    pub const DATABASE_ERROR: i32 = 5002;
    pub const TIMEOUT: i32 = 5003;
}
