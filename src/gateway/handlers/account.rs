//! Account handlers

use std::sync::Arc;

use axum::extract::State;

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, CreateAccountRequest, IdPath, ListAccountsQuery, ValidatedJson,
    ValidatedPath, ValidatedQuery, ok,
};
use crate::ledger::{Account, AccountRepository, CreateAccountParams, ListParams};

/// Open a new account with a zero balance
///
/// POST /api/v1/accounts
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created", body = Account, content_type = "application/json"),
        (status = 400, description = "Missing owner or unsupported currency"),
        (status = 500, description = "Database error")
    ),
    tag = "Account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateAccountRequest>,
) -> ApiResult<Account> {
    let params = CreateAccountParams {
        owner: req.owner,
        currency: req.currency,
        balance: 0,
    };
    let account = AccountRepository::create(state.db.pool(), &params).await?;
    tracing::info!(account_id = account.id, currency = %account.currency, "Account created");
    ok(account)
}

/// Get an account by id
///
/// GET /api/v1/accounts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details", body = Account, content_type = "application/json"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Account not found")
    ),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    ValidatedPath(path): ValidatedPath<IdPath>,
) -> ApiResult<Account> {
    ok(AccountRepository::get_by_id(state.db.pool(), path.id).await?)
}

/// List accounts by page
///
/// GET /api/v1/accounts?page_id=1&page_size=5
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    params(ListAccountsQuery),
    responses(
        (status = 200, description = "Accounts ordered by id", body = Vec<Account>, content_type = "application/json"),
        (status = 400, description = "page_id < 1, page_id too large, or page_size outside 5..=10")
    ),
    tag = "Account"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<ListAccountsQuery>,
) -> ApiResult<Vec<Account>> {
    let params = ListParams::from_page(query.page_id, query.page_size)
        .ok_or_else(|| ApiError::bad_request("page_id out of range"))?;
    ok(AccountRepository::list(state.db.pool(), params).await?)
}
