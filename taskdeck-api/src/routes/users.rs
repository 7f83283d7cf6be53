/// User endpoints
///
/// Listing users (for member pick lists), fetching a single user, and
/// editing the caller's own profile.
///
/// # Endpoints
///
/// - `GET /api/users` - List all users
/// - `GET /api/users/:id` - Get a user by ID
/// - `PUT /api/users/me` - Update the authenticated user's profile

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use taskdeck_shared::auth::middleware::AuthContext;
use taskdeck_shared::models::user::{UpdateProfile, User};
use uuid::Uuid;
use validator::Validate;

use super::auth::UserResponse;

/// Profile update request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Lists all users
///
/// Password hashes never appear in the response.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = User::list(&state.db).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Gets a user by ID
///
/// # Errors
///
/// - `404 Not Found`: No such user
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Updates the authenticated user's profile
///
/// Only name and email are profile fields; role and password are not
/// editable here.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: New email already belongs to another account
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate()?;

    let user = User::update_profile(
        &state.db,
        auth.user_id,
        UpdateProfile {
            name: req.name,
            email: req.email,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
