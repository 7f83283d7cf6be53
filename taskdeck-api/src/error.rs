/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers should return `Result<T, ApiError>` which automatically
/// converts to appropriate HTTP status codes.
///
/// Access denial never surfaces as 403: the access layer reports it as
/// [`AccessError::NotFound`], which maps to 404 here, so responses do not
/// reveal whether a resource exists.
///
/// # Example
///
/// ```ignore
/// use taskdeck_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     let data = fetch_data().await?;
///     Ok(Json(json!({ "data": data })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use taskdeck_shared::access::AccessError;
use taskdeck_shared::auth::jwt::JwtError;
use taskdeck_shared::auth::middleware::AuthError;
use taskdeck_shared::auth::password::PasswordError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404) - also covers access denial
    NotFound(String),

    /// Conflict (409) - e.g., duplicate email or duplicate membership
    Conflict(String),

    /// Validation errors (400)
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Only unique violations are client-visible conflicts.
                // Foreign-key and check violations stay internal, and
                // constraint names are never echoed to the client.
                if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation {
                    let constraint = db_err.constraint().unwrap_or_default();
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already exists".to_string());
                    }
                    if constraint.contains("project_members") {
                        return ApiError::Conflict(
                            "User is already a member of this project".to_string(),
                        );
                    }
                    return ApiError::Conflict("Resource already exists".to_string());
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert validator errors to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}

/// Convert auth errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => {
                ApiError::Unauthorized("Missing credentials".to_string())
            }
            AuthError::InvalidFormat(msg) => ApiError::BadRequest(msg),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        }
    }
}

/// Convert access errors to API errors
///
/// Both absence and denial arrive as `NotFound`.
impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            AccessError::DatabaseError(db_err) => ApiError::from(db_err),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert JWT errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::InvalidIssuer { .. } => {
                ApiError::Unauthorized("Invalid token issuer".to_string())
            }
            _ => ApiError::Unauthorized(format!("Invalid token: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Resource not found".to_string());
        assert_eq!(err.to_string(), "Not found: Resource not found");
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let errors = vec![ValidationErrorDetail {
            field: "email".to_string(),
            message: "Invalid email format".to_string(),
        }];

        let response = ApiError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_access_denial_maps_to_404() {
        let response = ApiError::from(AccessError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let response = ApiError::from(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[derive(Debug)]
    struct StubDbError {
        kind: sqlx::error::ErrorKind,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for StubDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "stub database error")
        }
    }

    impl std::error::Error for StubDbError {}

    impl sqlx::error::DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "stub database error"
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.kind {
                sqlx::error::ErrorKind::UniqueViolation => {
                    sqlx::error::ErrorKind::UniqueViolation
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    sqlx::error::ErrorKind::ForeignKeyViolation
                }
                sqlx::error::ErrorKind::NotNullViolation => {
                    sqlx::error::ErrorKind::NotNullViolation
                }
                sqlx::error::ErrorKind::CheckViolation => sqlx::error::ErrorKind::CheckViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    fn db_error(kind: sqlx::error::ErrorKind, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(StubDbError { kind, constraint }))
    }

    #[test]
    fn test_unique_violation_on_email_maps_to_409() {
        let err = ApiError::from(db_error(
            sqlx::error::ErrorKind::UniqueViolation,
            Some("users_email_key"),
        ));

        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(err.to_string(), "Conflict: Email already exists");
    }

    #[test]
    fn test_unique_violation_on_membership_maps_to_409() {
        let err = ApiError::from(db_error(
            sqlx::error::ErrorKind::UniqueViolation,
            Some("project_members_pkey"),
        ));

        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(
            err.to_string(),
            "Conflict: User is already a member of this project"
        );
    }

    #[test]
    fn test_unique_violation_never_echoes_constraint_name() {
        let err = ApiError::from(db_error(
            sqlx::error::ErrorKind::UniqueViolation,
            Some("projects_some_unique_key"),
        ));

        assert!(matches!(err, ApiError::Conflict(_)));
        assert!(!err.to_string().contains("projects_some_unique_key"));
    }

    #[test]
    fn test_foreign_key_violation_is_not_a_conflict() {
        let err = ApiError::from(db_error(
            sqlx::error::ErrorKind::ForeignKeyViolation,
            Some("comments_task_id_fkey"),
        ));

        assert!(matches!(err, ApiError::InternalError(_)));
        assert!(!err.to_string().contains("comments_task_id_fkey"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_check_violation_is_not_a_conflict() {
        let err = ApiError::from(db_error(
            sqlx::error::ErrorKind::CheckViolation,
            Some("tasks_due_date_check"),
        ));

        assert!(matches!(err, ApiError::InternalError(_)));
    }
}
