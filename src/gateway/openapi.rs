//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{CreateAccountRequest, CreateTransferRequest};
use crate::ledger::{Account, Entry, Transfer};
use crate::transfer::TransferResult;

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Simple Ledger API",
        version = "1.0.0",
        description = "Accounts, append-only entries and atomic transfers on PostgreSQL.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::create_account,
        crate::gateway::handlers::get_account,
        crate::gateway::handlers::list_accounts,
        crate::gateway::handlers::create_transfer,
        crate::gateway::handlers::get_transfer,
        crate::gateway::handlers::get_entry,
    ),
    components(
        schemas(
            HealthResponse,
            Account,
            Entry,
            Transfer,
            TransferResult,
            CreateAccountRequest,
            CreateTransferRequest,
        )
    ),
    tags(
        (name = "Account", description = "Account creation and queries"),
        (name = "Transfer", description = "Atomic transfers between accounts"),
        (name = "Entry", description = "Ledger entry queries"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Simple Ledger API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let json = ApiDoc::openapi().to_json();
        assert!(json.is_ok());
        assert!(json.unwrap().contains("TransferResult"));
    }

    #[test]
    fn test_endpoints_registered() {
        let paths = ApiDoc::openapi().paths;
        for path in [
            "/api/v1/health",
            "/api/v1/accounts",
            "/api/v1/accounts/{id}",
            "/api/v1/transfers",
            "/api/v1/transfers/{id}",
            "/api/v1/entries/{id}",
        ] {
            assert!(paths.paths.contains_key(path), "missing {path}");
        }
    }
}
