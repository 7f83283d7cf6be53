/// Project membership model and database operations
///
/// Membership links users to projects. The member list decides who can read a
/// project and who is eligible for task assignment. The project creator is
/// inserted here at project creation and can never be removed.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE project_members (
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (project_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Project membership record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMember {
    /// Project the user belongs to
    pub project_id: Uuid,

    /// Member user ID
    pub user_id: Uuid,

    /// When the user joined the project
    pub joined_at: DateTime<Utc>,
}

/// Membership joined with the member's account details
///
/// Used by the project detail response, which lists members by name and email
/// rather than bare IDs.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberWithUser {
    /// Member user ID
    pub user_id: Uuid,

    /// Member display name
    pub name: String,

    /// Member email address
    pub email: String,

    /// When the user joined the project
    pub joined_at: DateTime<Utc>,
}

impl ProjectMember {
    /// Adds a user to a project
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user is already a member (primary key violation)
    /// - The user or project does not exist (foreign key violation)
    pub async fn add(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let member = sqlx::query_as::<_, ProjectMember>(
            r#"
            INSERT INTO project_members (project_id, user_id)
            VALUES ($1, $2)
            RETURNING project_id, user_id, joined_at
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(member)
    }

    /// Removes a user from a project
    ///
    /// # Returns
    ///
    /// True if a membership row was deleted, false if none existed.
    pub async fn remove(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether a user is a member of a project
    pub async fn exists(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM project_members WHERE project_id = $1 AND user_id = $2)",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Lists members of a project with their account details
    pub async fn list_with_users(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<MemberWithUser>, sqlx::Error> {
        let members = sqlx::query_as::<_, MemberWithUser>(
            r#"
            SELECT pm.user_id, u.name, u.email, pm.joined_at
            FROM project_members pm
            JOIN users u ON u.id = pm.user_id
            WHERE pm.project_id = $1
            ORDER BY pm.joined_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    /// Lists member user IDs of a project
    ///
    /// Cheaper than [`list_with_users`](Self::list_with_users) when only the
    /// IDs matter, such as assignment eligibility checks.
    pub async fn member_ids(pool: &PgPool, project_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM project_members WHERE project_id = $1")
                .bind(project_id)
                .fetch_all(pool)
                .await?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_with_user_serializes_details() {
        let member = MemberWithUser {
            user_id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            joined_at: Utc::now(),
        };

        let json = serde_json::to_string(&member).unwrap();
        assert!(json.contains("jane@example.com"));
        assert!(json.contains("Jane Doe"));
    }
}
