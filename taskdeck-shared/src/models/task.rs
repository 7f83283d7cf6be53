/// Task model and database operations
///
/// Tasks belong to a project and move through a closed status lifecycle:
/// `pending`, `in_progress`, `completed`, `blocked`. A task may be assigned
/// to at most one user, and only to a member of its project.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'completed', 'blocked');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     assigned_to UUID REFERENCES users(id) ON DELETE SET NULL,
///     status task_status NOT NULL DEFAULT 'pending',
///     due_date TIMESTAMPTZ NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```
/// use taskdeck_shared::models::task::TaskStatus;
///
/// assert_eq!(TaskStatus::parse_token("in_progress"), Some(TaskStatus::InProgress));
/// assert_eq!(TaskStatus::parse_token("archived"), None);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task created, not yet started
    Pending,

    /// Task actively being worked on
    InProgress,

    /// Task finished
    Completed,

    /// Task waiting on something external
    Blocked,
}

impl TaskStatus {
    /// Every status token the API accepts
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Blocked,
    ];

    /// Converts the status to its wire token
    pub fn as_token(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }

    /// Parses a wire token into a status
    ///
    /// The mapping is exhaustive over [`ALL`](Self::ALL); an unknown token
    /// yields None and must be rejected by the caller, never coerced to a
    /// default.
    pub fn parse_token(token: &str) -> Option<Self> {
        match token {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            "blocked" => Some(TaskStatus::Blocked),
            _ => None,
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Project the task belongs to
    pub project_id: Uuid,

    /// User the task is assigned to, if any; must be a project member
    pub assigned_to: Option<Uuid>,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// When the task is due
    pub due_date: DateTime<Utc>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,
}

/// Task joined with its assignee's display name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithAssignee {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Project the task belongs to
    pub project_id: Uuid,

    /// User the task is assigned to, if any
    pub assigned_to: Option<Uuid>,

    /// Display name of the assignee, if any
    pub assigned_to_name: Option<String>,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// When the task is due
    pub due_date: DateTime<Utc>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last modified
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Project the task belongs to
    pub project_id: Uuid,

    /// Initial assignee, if any
    pub assigned_to: Option<Uuid>,

    /// When the task is due
    pub due_date: DateTime<Utc>,
}

/// Input for updating a task's details
///
/// Status is excluded; it changes only through
/// [`Task::set_status`]. Title, description, due date and assignee are
/// overwritten.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    /// New title
    pub title: String,

    /// New description
    pub description: String,

    /// New assignee, or None to unassign
    pub assigned_to: Option<Uuid>,

    /// New due date
    pub due_date: DateTime<Utc>,
}

impl Task {
    /// Creates a new task; status starts as `pending`
    ///
    /// Assignment eligibility is the caller's responsibility; route handlers
    /// verify project membership before calling this.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, project_id, assigned_to, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, project_id, assigned_to, status,
                      due_date, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.project_id)
        .bind(data.assigned_to)
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, project_id, assigned_to, status,
                   due_date, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID with its assignee's name
    pub async fn find_with_assignee(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<TaskWithAssignee>, sqlx::Error> {
        let task = sqlx::query_as::<_, TaskWithAssignee>(
            r#"
            SELECT t.id, t.title, t.description, t.project_id, t.assigned_to,
                   u.name AS assigned_to_name, t.status, t.due_date,
                   t.created_at, t.updated_at
            FROM tasks t
            LEFT JOIN users u ON u.id = t.assigned_to
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks of a project with assignee names, oldest first
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<TaskWithAssignee>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithAssignee>(
            r#"
            SELECT t.id, t.title, t.description, t.project_id, t.assigned_to,
                   u.name AS assigned_to_name, t.status, t.due_date,
                   t.created_at, t.updated_at
            FROM tasks t
            LEFT JOIN users u ON u.id = t.assigned_to
            WHERE t.project_id = $1
            ORDER BY t.created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Overwrites a task's details and bumps `updated_at`
    pub async fn update_details(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                assigned_to = $4,
                due_date = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, project_id, assigned_to, status,
                      due_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.assigned_to)
        .bind(data.due_date)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Sets a task's status and bumps `updated_at`
    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, project_id, assigned_to, status,
                      due_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Assigns a task to a user and bumps `updated_at`
    ///
    /// Membership of the assignee is verified by the caller.
    pub async fn set_assignee(
        pool: &PgPool,
        id: Uuid,
        assigned_to: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET assigned_to = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, project_id, assigned_to, status,
                      due_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(assigned_to)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task and its comments
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if it didn't exist.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts the tasks of a project
    pub async fn count_by_project(pool: &PgPool, project_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_token_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse_token(status.as_token()), Some(status));
        }
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        assert_eq!(TaskStatus::parse_token("archived"), None);
        assert_eq!(TaskStatus::parse_token("PENDING"), None);
        assert_eq!(TaskStatus::parse_token("in progress"), None);
        assert_eq!(TaskStatus::parse_token(""), None);
    }

    #[test]
    fn test_status_serializes_as_token() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
