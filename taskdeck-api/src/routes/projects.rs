/// Project endpoints
///
/// Project CRUD plus membership management. Every read is scoped to the
/// caller: a project the caller may not see responds 404, identical to a
/// project that does not exist. Mutations are restricted to the creator.
///
/// # Endpoints
///
/// - `GET /api/projects` - List projects visible to the caller
/// - `POST /api/projects` - Create a project
/// - `GET /api/projects/:id` - Get a project with members and task count
/// - `PUT /api/projects/:id` - Update a project (creator only)
/// - `DELETE /api/projects/:id` - Delete a project and its contents (creator only)
/// - `POST /api/projects/:id/members` - Add a member (creator only)
/// - `DELETE /api/projects/:id/members/:member_id` - Remove a member (creator only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    access::{can_remove_member, require_project_owner},
    auth::middleware::AuthContext,
    models::{
        member::{MemberWithUser, ProjectMember},
        project::{CreateProject, Project, UpdateProject},
        task::Task,
        user::User,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Planned start date
    pub start_date: DateTime<Utc>,

    /// Planned end date
    pub end_date: DateTime<Utc>,
}

/// Update project request; all fields are overwritten
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    /// New project name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// New description
    #[serde(default)]
    pub description: String,

    /// New start date
    pub start_date: DateTime<Utc>,

    /// New end date
    pub end_date: DateTime<Utc>,
}

/// Add member request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    /// User to add to the project
    pub member_id: Uuid,
}

/// Project member representation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    /// Member user ID
    pub user_id: Uuid,

    /// Member display name
    pub name: String,

    /// Member email address
    pub email: String,

    /// When the user joined the project
    pub joined_at: DateTime<Utc>,
}

impl From<MemberWithUser> for MemberResponse {
    fn from(member: MemberWithUser) -> Self {
        Self {
            user_id: member.user_id,
            name: member.name,
            email: member.email,
            joined_at: member.joined_at,
        }
    }
}

/// Project representation with members and task count
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    /// Project ID
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Creator user ID
    pub created_by: Uuid,

    /// Creator display name
    pub creator_name: String,

    /// Planned start date
    pub start_date: DateTime<Utc>,

    /// Planned end date
    pub end_date: DateTime<Utc>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// Project members
    pub members: Vec<MemberResponse>,

    /// Number of tasks in the project
    pub task_count: i64,
}

/// Assembles the full project representation (members + task count)
async fn project_response(state: &AppState, project: Project) -> ApiResult<ProjectResponse> {
    let members = ProjectMember::list_with_users(&state.db, project.id).await?;
    let task_count = Task::count_by_project(&state.db, project.id).await?;

    // The creator is always a member, so their name is in the list
    let creator_name = members
        .iter()
        .find(|m| m.user_id == project.created_by)
        .map(|m| m.name.clone())
        .unwrap_or_default();

    Ok(ProjectResponse {
        id: project.id,
        name: project.name,
        description: project.description,
        created_by: project.created_by,
        creator_name,
        start_date: project.start_date,
        end_date: project.end_date,
        created_at: project.created_at,
        members: members.into_iter().map(MemberResponse::from).collect(),
        task_count,
    })
}

/// Lists all projects the caller created or is a member of
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = Project::list_for_user(&state.db, auth.user_id).await?;

    let mut responses = Vec::with_capacity(projects.len());
    for project in projects {
        responses.push(project_response(&state, project).await?);
    }

    Ok(Json(responses))
}

/// Creates a project
///
/// The caller becomes the creator and is added to the member list in the
/// same transaction.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    req.validate()?;

    let project = Project::create_with_creator(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
        },
        auth.user_id,
    )
    .await?;

    let response = project_response(&state, project).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Gets a project with its members and task count
///
/// # Errors
///
/// - `404 Not Found`: Project is absent or the caller has no access
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = Project::find_for_user(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project_response(&state, project).await?))
}

/// Updates a project's details
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `404 Not Found`: Project is absent or the caller is not its creator
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    req.validate()?;

    let project = Project::update_details(
        &state.db,
        id,
        auth.user_id,
        UpdateProject {
            name: req.name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project_response(&state, project).await?))
}

/// Deletes a project and everything in it
///
/// Comments, tasks and memberships are removed in the same transaction as
/// the project itself.
///
/// # Errors
///
/// - `404 Not Found`: Project is absent or the caller is not its creator
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Project::delete_cascade(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Adds a user to a project's member list
///
/// # Errors
///
/// - `400 Bad Request`: The user does not exist
/// - `404 Not Found`: Project is absent or the caller is not its creator
/// - `409 Conflict`: The user is already a member
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<AddMemberRequest>,
) -> ApiResult<StatusCode> {
    require_project_owner(&state.db, id, auth.user_id).await?;

    if !User::exists(&state.db, req.member_id).await? {
        return Err(ApiError::BadRequest("User does not exist".to_string()));
    }

    if ProjectMember::exists(&state.db, id, req.member_id).await? {
        return Err(ApiError::Conflict(
            "User is already a member of this project".to_string(),
        ));
    }

    ProjectMember::add(&state.db, id, req.member_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Removes a user from a project's member list
///
/// The creator's own membership can never be removed.
///
/// # Errors
///
/// - `400 Bad Request`: Target is the creator, or is not a member
/// - `404 Not Found`: Project is absent or the caller is not its creator
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    // Owner-scoped fetch also proves the project exists
    let project = Project::find_owned(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    if !can_remove_member(member_id, &project) {
        return Err(ApiError::BadRequest(
            "Cannot remove the project creator".to_string(),
        ));
    }

    let removed = ProjectMember::remove(&state.db, id, member_id).await?;
    if !removed {
        return Err(ApiError::BadRequest(
            "User is not a member of this project".to_string(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}
