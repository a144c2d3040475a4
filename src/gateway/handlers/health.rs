//! Health check handler

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::State;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ok};

const DB_PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    /// Git commit the binary was built from
    #[schema(example = "3f2a9c1")]
    pub version: &'static str,
}

/// Health check endpoint
///
/// Pings PostgreSQL but does NOT expose any internal details in the response.
///
/// - Healthy: 200 OK + {code: 0, data: {timestamp_ms, version}}
/// - Unhealthy: 503 Service Unavailable + {code: 5001, msg: "unavailable"}
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let healthy = match tokio::time::timeout(DB_PING_TIMEOUT, state.db.health_check()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::error!("[HEALTH] PostgreSQL ping failed: {}", e);
            false
        }
        Err(_) => {
            tracing::error!("[HEALTH] PostgreSQL ping timed out");
            false
        }
    };

    if !healthy {
        return Err(ApiError::service_unavailable("unavailable"));
    }
    ok(HealthResponse {
        timestamp_ms: now_ms,
        version: env!("GIT_HASH"),
    })
}
