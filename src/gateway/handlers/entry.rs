//! Entry handlers

use std::sync::Arc;

use axum::extract::State;

use super::super::state::AppState;
use super::super::types::{ApiResult, IdPath, ValidatedPath, ok};
use crate::ledger::{Entry, EntryRepository};

/// Get a ledger entry by id
///
/// GET /api/v1/entries/{id}
#[utoipa::path(
    get,
    path = "/api/v1/entries/{id}",
    params(
        ("id" = i64, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry", body = Entry, content_type = "application/json"),
        (status = 404, description = "Entry not found")
    ),
    tag = "Entry"
)]
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    ValidatedPath(path): ValidatedPath<IdPath>,
) -> ApiResult<Entry> {
    ok(EntryRepository::get_by_id(state.db.pool(), path.id).await?)
}
