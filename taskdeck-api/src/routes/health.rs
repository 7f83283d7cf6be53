/// Health check endpoint
///
/// Provides a simple health check endpoint that verifies:
/// - The server is running
/// - Database connectivity
///
/// # Endpoint
///
/// ```text
/// GET /api/health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2026-03-01T12:00:00Z",
///   "components": {
///     "database": { "status": "healthy", "message": "connected" }
///   }
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health status of a single component
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component status ("healthy" or "unhealthy")
    pub status: String,

    /// Human-readable detail
    pub message: String,
}

/// Component statuses
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthComponents {
    /// Database connectivity
    pub database: ComponentHealth,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// When the check ran
    pub timestamp: DateTime<Utc>,

    /// Per-component health
    pub components: HealthComponents,
}

/// Health check handler
///
/// Returns service health status including database connectivity. Always
/// responds 200; a failing dependency is reported in the body.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    // Check database connectivity
    let database = match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => ComponentHealth {
            status: "healthy".to_string(),
            message: "connected".to_string(),
        },
        Err(e) => ComponentHealth {
            status: "unhealthy".to_string(),
            message: format!("connection failed: {}", e),
        },
    };

    let status = if database.status == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        components: HealthComponents { database },
    }))
}
