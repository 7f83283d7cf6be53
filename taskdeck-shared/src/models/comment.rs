/// Comment model and database operations
///
/// Comments hang off tasks and are authored by the authenticated caller.
/// They are append-only over HTTP; deletion happens only as part of the
/// task and project cascades.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     content TEXT NOT NULL,
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment on a task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID
    pub id: Uuid,

    /// Comment text
    pub content: String,

    /// Task the comment belongs to
    pub task_id: Uuid,

    /// Author of the comment
    pub user_id: Uuid,

    /// When the comment was written
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's display name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    /// Unique comment ID
    pub id: Uuid,

    /// Comment text
    pub content: String,

    /// Task the comment belongs to
    pub task_id: Uuid,

    /// Author of the comment
    pub user_id: Uuid,

    /// Author display name
    pub user_name: String,

    /// When the comment was written
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Appends a comment to a task
    pub async fn create(
        pool: &PgPool,
        task_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, task_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, task_id, user_id, created_at
            "#,
        )
        .bind(content)
        .bind(task_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Lists a task's comments with author names, oldest first
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.task_id, c.user_id, u.name AS user_name, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.task_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_with_author_serialization() {
        let comment = CommentWithAuthor {
            id: Uuid::new_v4(),
            content: "Looks good".to_string(),
            task_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: "Jane Doe".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&comment).unwrap();
        assert!(json.contains("Looks good"));
        assert!(json.contains("Jane Doe"));
    }
}
