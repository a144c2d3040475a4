//! Transfer handlers

use std::sync::Arc;

use axum::extract::State;

use super::super::state::AppState;
use super::super::types::{
    ApiResult, CreateTransferRequest, IdPath, ValidatedJson, ValidatedPath, ok,
};
use crate::ledger::{Transfer, TransferRepository};
use crate::transfer::TransferResult;

/// Move money between two accounts
///
/// POST /api/v1/transfers
///
/// The transfer row, both entries and both balance updates commit together.
/// An unknown account is reported as 400, not 404.
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 200, description = "Transfer committed", body = TransferResult, content_type = "application/json"),
        (status = 400, description = "Same account, non-positive amount or unknown account"),
        (status = 500, description = "Database error or timeout; nothing was written")
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateTransferRequest>,
) -> ApiResult<TransferResult> {
    let result = state.coordinator.transfer(req.into()).await?;
    ok(result)
}

/// Get a transfer record by id
///
/// GET /api/v1/transfers/{id}
#[utoipa::path(
    get,
    path = "/api/v1/transfers/{id}",
    params(
        ("id" = i64, Path, description = "Transfer ID")
    ),
    responses(
        (status = 200, description = "Transfer record", body = Transfer, content_type = "application/json"),
        (status = 404, description = "Transfer not found")
    ),
    tag = "Transfer"
)]
pub async fn get_transfer(
    State(state): State<Arc<AppState>>,
    ValidatedPath(path): ValidatedPath<IdPath>,
) -> ApiResult<Transfer> {
    ok(TransferRepository::get_by_id(state.db.pool(), path.id).await?)
}
