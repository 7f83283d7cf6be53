/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register new user
/// - `POST /api/auth/login` - Login and get a token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    extract::ApiJson,
};
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User, UserRole},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (will be validated for strength)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// User representation returned by the API
///
/// Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Account role
    pub role: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Response for register and login: a token plus the account it belongs to
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// JWT access token (24h)
    pub token: String,

    /// The authenticated user
    pub user: UserResponse,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "name": "Jane Doe",
///   "email": "jane@example.com",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or password too weak
/// - `409 Conflict`: Email already exists
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    // Validate password strength
    password::validate_password_strength(&req.password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message: e,
        }])
    })?;

    // Hash password
    let password_hash = password::hash_password(&req.password)?;

    // Duplicate email surfaces as a unique constraint violation (409)
    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
            role: UserRole::User,
        },
    )
    .await?;

    let claims = jwt::Claims::new(user.id);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Login endpoint
///
/// Authenticates a user and returns a JWT token. A wrong email and a wrong
/// password produce the same response, so the endpoint does not reveal which
/// accounts exist.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "jane@example.com",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Invalid credentials
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    // Find user by email
    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    // Verify password
    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let claims = jwt::Claims::new(user.id);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
