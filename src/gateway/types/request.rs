//! Request DTOs and validating extractors
//!
//! Handlers never see a request that failed `validator` rules: the
//! extractors reject it with a 400 `{code, msg}` body first.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use axum::http::request::Parts;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::response::ApiError;
use crate::transfer::TransferRequest;

/// Currencies accepted for new accounts
pub const SUPPORTED_CURRENCIES: [&str; 3] = ["USD", "EUR", "CAD"];

fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if SUPPORTED_CURRENCIES.contains(&currency) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_currency"))
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Open an account with a zero balance
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[schema(example = "alice")]
    #[validate(length(min = 1, max = 128))]
    pub owner: String,
    /// One of USD, EUR, CAD
    #[schema(example = "USD")]
    #[validate(custom(function = "validate_currency"))]
    pub currency: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAccountsQuery {
    /// 1-based page number
    #[validate(range(min = 1))]
    pub page_id: i64,
    /// Rows per page, 5 to 10
    #[validate(range(min = 5, max = 10))]
    pub page_size: i64,
}

/// Move `amount` (smallest currency unit) between two accounts
///
/// Amount and account rules are enforced by the transfer coordinator so the
/// response carries its specific error code.
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct CreateTransferRequest {
    #[validate(range(min = 1))]
    pub from_account_id: i64,
    #[validate(range(min = 1))]
    pub to_account_id: i64,
    #[schema(example = 10)]
    pub amount: i64,
}

impl From<CreateTransferRequest> for TransferRequest {
    fn from(req: CreateTransferRequest) -> Self {
        TransferRequest::new(req.from_account_id, req.to_account_id, req.amount)
    }
}

/// Row id taken from the URI
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct IdPath {
    #[validate(range(min = 1))]
    pub id: i64,
}

// ============================================================================
// Validating Extractors
// ============================================================================

/// JSON body that passed its `Validate` rules
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;
        value
            .validate()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        Ok(Self(value))
    }
}

/// Query string that passed its `Validate` rules
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        value
            .validate()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        Ok(Self(value))
    }
}

/// Path parameters that passed their `Validate` rules
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        value
            .validate()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_account_validation() {
        let valid = CreateAccountRequest {
            owner: "alice".into(),
            currency: "EUR".into(),
        };
        assert!(valid.validate().is_ok());

        let empty_owner = CreateAccountRequest {
            owner: String::new(),
            currency: "USD".into(),
        };
        assert!(empty_owner.validate().is_err());

        let bad_currency = CreateAccountRequest {
            owner: "bob".into(),
            currency: "usd".into(),
        };
        let errors = bad_currency.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("currency"));
    }

    #[test]
    fn test_list_query_bounds() {
        let q = |page_id, page_size| ListAccountsQuery { page_id, page_size };
        assert!(q(1, 5).validate().is_ok());
        assert!(q(3, 10).validate().is_ok());
        assert!(q(0, 5).validate().is_err());
        assert!(q(1, 4).validate().is_err());
        assert!(q(1, 11).validate().is_err());
    }

    #[test]
    fn test_transfer_request_leaves_amount_to_coordinator() {
        let req = CreateTransferRequest {
            from_account_id: 1,
            to_account_id: 1,
            amount: 0,
        };
        assert!(req.validate().is_ok());
        assert_eq!(TransferRequest::from(req), TransferRequest::new(1, 1, 0));
    }

    #[test]
    fn test_id_path_must_be_positive() {
        assert!(IdPath { id: 1 }.validate().is_ok());
        assert!(IdPath { id: 0 }.validate().is_err());
    }
}
