/// Task endpoints
///
/// Task CRUD, assignment, status changes, and comments. Tasks inherit their
/// project's access rules: anyone with project access may read and edit
/// tasks, only the project creator may delete them, and a task may only be
/// assigned to a project member.
///
/// # Endpoints
///
/// - `GET /api/tasks/project/:project_id` - List a project's tasks
/// - `POST /api/tasks` - Create a task
/// - `GET /api/tasks/:id` - Get a task with assignee and comments
/// - `PUT /api/tasks/:id` - Update a task's details
/// - `DELETE /api/tasks/:id` - Delete a task (project creator only)
/// - `PUT /api/tasks/:id/assign/:user_id` - Assign a task to a member
/// - `PUT /api/tasks/:id/status/:status` - Change a task's status
/// - `POST /api/tasks/:id/comments` - Comment on a task

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
    access::{can_assign, require_project_access, require_project_owner},
    auth::middleware::AuthContext,
    models::{
        comment::{Comment, CommentWithAuthor},
        member::ProjectMember,
        project::Project,
        task::{CreateTask, Task, TaskStatus, TaskWithAssignee, UpdateTask},
        user::User,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Project the task belongs to
    pub project_id: Uuid,

    /// Initial assignee; must be a project member
    pub assigned_to: Option<Uuid>,

    /// When the task is due
    pub due_date: DateTime<Utc>,
}

/// Update task request; status changes go through the status endpoint
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// New description
    #[serde(default)]
    pub description: String,

    /// New assignee, or null to unassign; must be a project member
    pub assigned_to: Option<Uuid>,

    /// New due date
    pub due_date: DateTime<Utc>,
}

/// Add comment request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    /// Comment text
    #[validate(length(min = 1, message = "Comment must not be empty"))]
    pub content: String,
}

/// Comment representation with author name
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// Comment ID
    pub id: Uuid,

    /// Comment text
    pub content: String,

    /// Task the comment belongs to
    pub task_id: Uuid,

    /// Author user ID
    pub user_id: Uuid,

    /// Author display name
    pub user_name: String,

    /// When the comment was written
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            task_id: comment.task_id,
            user_id: comment.user_id,
            user_name: comment.user_name,
            created_at: comment.created_at,
        }
    }
}

/// Task representation with assignee name and comments
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Project the task belongs to
    pub project_id: Uuid,

    /// Assignee user ID, if any
    pub assigned_to: Option<Uuid>,

    /// Assignee display name, if any
    pub assigned_to_name: Option<String>,

    /// Lifecycle status token
    pub status: TaskStatus,

    /// When the task is due
    pub due_date: DateTime<Utc>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,

    /// Comments, oldest first
    pub comments: Vec<CommentResponse>,
}

/// Assembles the full task representation (assignee name + comments)
async fn task_response(state: &AppState, task: TaskWithAssignee) -> ApiResult<TaskResponse> {
    let comments = Comment::list_by_task(&state.db, task.id).await?;

    Ok(TaskResponse {
        id: task.id,
        title: task.title,
        description: task.description,
        project_id: task.project_id,
        assigned_to: task.assigned_to,
        assigned_to_name: task.assigned_to_name,
        status: task.status,
        due_date: task.due_date,
        created_at: task.created_at,
        updated_at: task.updated_at,
        comments: comments.into_iter().map(CommentResponse::from).collect(),
    })
}

/// Loads a task and verifies the caller has access to its project
///
/// Absent task and inaccessible project both surface as 404.
async fn load_accessible_task(state: &AppState, id: Uuid, user_id: Uuid) -> ApiResult<Task> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    require_project_access(&state.db, task.project_id, user_id)
        .await
        .map_err(|_| ApiError::NotFound("Task not found".to_string()))?;

    Ok(task)
}

/// Verifies that a prospective assignee is a member of the project
async fn check_assignee(
    state: &AppState,
    project_id: Uuid,
    assigned_to: Option<Uuid>,
) -> ApiResult<()> {
    if let Some(assignee) = assigned_to {
        let member_ids = ProjectMember::member_ids(&state.db, project_id).await?;
        if !can_assign(assignee, &member_ids) {
            return Err(ApiError::BadRequest(
                "Assignee must be a member of the project".to_string(),
            ));
        }
    }

    Ok(())
}

/// Lists a project's tasks with assignee names and comments
///
/// A caller without access to the project receives an empty list with 200,
/// not an error.
pub async fn list_project_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    if !Project::has_access(&state.db, project_id, auth.user_id).await? {
        return Ok(Json(Vec::new()));
    }

    let tasks = Task::list_by_project(&state.db, project_id).await?;

    let mut responses = Vec::with_capacity(tasks.len());
    for task in tasks {
        responses.push(task_response(&state, task).await?);
    }

    Ok(Json(responses))
}

/// Creates a task in a project the caller has access to
///
/// Status always starts as `pending`.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or the assignee is not a member
/// - `404 Not Found`: Project is absent or the caller has no access
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    require_project_access(&state.db, req.project_id, auth.user_id).await?;
    check_assignee(&state, req.project_id, req.assigned_to).await?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            project_id: req.project_id,
            assigned_to: req.assigned_to,
            due_date: req.due_date,
        },
    )
    .await?;

    let task = Task::find_with_assignee(&state.db, task.id)
        .await?
        .ok_or_else(|| ApiError::InternalError("Task disappeared after insert".to_string()))?;

    Ok((StatusCode::CREATED, Json(task_response(&state, task).await?)))
}

/// Gets a task with its assignee name and comments
///
/// # Errors
///
/// - `404 Not Found`: Task is absent or the caller has no access to its project
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let task = load_accessible_task(&state, id, auth.user_id).await?;

    let task = Task::find_with_assignee(&state.db, task.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task_response(&state, task).await?))
}

/// Updates a task's title, description, due date and assignee
///
/// The assignee, when set, is re-validated against the member list the same
/// way it is at creation.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or the assignee is not a member
/// - `404 Not Found`: Task is absent or the caller has no access
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let task = load_accessible_task(&state, id, auth.user_id).await?;
    check_assignee(&state, task.project_id, req.assigned_to).await?;

    let task = Task::update_details(
        &state.db,
        task.id,
        UpdateTask {
            title: req.title,
            description: req.description,
            assigned_to: req.assigned_to,
            due_date: req.due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let task = Task::find_with_assignee(&state.db, task.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task_response(&state, task).await?))
}

/// Deletes a task and its comments
///
/// Only the project creator may delete tasks; for everyone else the task
/// does not exist.
///
/// # Errors
///
/// - `404 Not Found`: Task is absent or the caller is not the project creator
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    require_project_owner(&state.db, task.project_id, auth.user_id)
        .await
        .map_err(|_| ApiError::NotFound("Task not found".to_string()))?;

    let deleted = Task::delete(&state.db, task.id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Assigns a task to a project member
///
/// # Errors
///
/// - `400 Bad Request`: The target user is not a member of the project
/// - `404 Not Found`: Task is absent or the caller has no access
pub async fn assign_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<TaskResponse>> {
    let task = load_accessible_task(&state, id, auth.user_id).await?;
    check_assignee(&state, task.project_id, Some(user_id)).await?;

    let task = Task::set_assignee(&state.db, task.id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let task = Task::find_with_assignee(&state.db, task.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task_response(&state, task).await?))
}

/// Changes a task's status
///
/// The status token must be one of `pending`, `in_progress`, `completed`,
/// `blocked`. An unknown token is rejected, never coerced.
///
/// # Errors
///
/// - `400 Bad Request`: Unknown status token
/// - `404 Not Found`: Task is absent or the caller has no access
pub async fn set_task_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((id, status)): Path<(Uuid, String)>,
) -> ApiResult<Json<TaskResponse>> {
    let status = TaskStatus::parse_token(&status)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown status: {}", status)))?;

    let task = load_accessible_task(&state, id, auth.user_id).await?;

    let task = Task::set_status(&state.db, task.id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let task = Task::find_with_assignee(&state.db, task.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task_response(&state, task).await?))
}

/// Appends a comment to a task, authored by the caller
///
/// # Errors
///
/// - `400 Bad Request`: Empty comment
/// - `404 Not Found`: Task is absent or the caller has no access
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<AddCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    req.validate()?;

    let task = load_accessible_task(&state, id, auth.user_id).await?;

    let comment = Comment::create(&state.db, task.id, auth.user_id, req.content).await?;

    let author = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::InternalError("Comment author not found".to_string()))?;

    Ok(Json(CommentResponse {
        id: comment.id,
        content: comment.content,
        task_id: comment.task_id,
        user_id: comment.user_id,
        user_name: author.name,
        created_at: comment.created_at,
    }))
}
