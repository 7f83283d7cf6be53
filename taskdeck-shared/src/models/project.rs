/// Project model and database operations
///
/// This module provides the Project model. A project is owned by its creator,
/// who is uniquely authorized to modify it and manage its membership. All
/// read queries are scoped to the requesting user so that a project the user
/// may not see behaves exactly like a project that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     created_by UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
///     start_date TIMESTAMPTZ NOT NULL,
///     end_date TIMESTAMPTZ NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::project::{Project, CreateProject};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let creator = Uuid::new_v4();
///
/// // Creates the project and the creator's membership atomically
/// let project = Project::create_with_creator(&pool, CreateProject {
///     name: "Website".to_string(),
///     description: "Company website rebuild".to_string(),
///     start_date: Utc::now(),
///     end_date: Utc::now(),
/// }, creator).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// User who created the project; sole authority for mutations
    pub created_by: Uuid,

    /// Planned start date
    pub start_date: DateTime<Utc>,

    /// Planned end date
    pub end_date: DateTime<Utc>,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Planned start date
    pub start_date: DateTime<Utc>,

    /// Planned end date
    pub end_date: DateTime<Utc>,
}

/// Input for updating a project
///
/// All fields are overwritten, matching the PUT semantics of the API.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    /// New project name
    pub name: String,

    /// New description
    pub description: String,

    /// New start date
    pub start_date: DateTime<Utc>,

    /// New end date
    pub end_date: DateTime<Utc>,
}

impl Project {
    /// Creates a project and inserts the creator as its first member
    ///
    /// Both inserts run in a single transaction so a project can never exist
    /// without its creator's membership.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create_with_creator(
        pool: &PgPool,
        data: CreateProject,
        created_by: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, created_by, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, created_by, start_date, end_date, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(created_by)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO project_members (project_id, user_id) VALUES ($1, $2)")
            .bind(project.id)
            .bind(created_by)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(project)
    }

    /// Finds a project visible to a user
    ///
    /// Returns the project only if the user is its creator or a member;
    /// otherwise None, indistinguishable from an absent project.
    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, created_by, start_date, end_date, created_at
            FROM projects
            WHERE id = $1
              AND (created_by = $2 OR EXISTS(
                  SELECT 1 FROM project_members
                  WHERE project_id = projects.id AND user_id = $2
              ))
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project owned by a user
    ///
    /// Returns None for projects the user did not create, including ones they
    /// are a member of.
    pub async fn find_owned(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, created_by, start_date, end_date, created_at
            FROM projects
            WHERE id = $1 AND created_by = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects where the user is creator or member
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, created_by, start_date, end_date, created_at
            FROM projects
            WHERE created_by = $1 OR EXISTS(
                SELECT 1 FROM project_members
                WHERE project_id = projects.id AND user_id = $1
            )
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Overwrites a project's details, scoped to its creator
    ///
    /// # Returns
    ///
    /// The updated project, or None if the project is absent or not owned by
    /// the user.
    pub async fn update_details(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $3,
                description = $4,
                start_date = $5,
                end_date = $6
            WHERE id = $1 AND created_by = $2
            RETURNING id, name, description, created_by, start_date, end_date, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project and everything it owns, scoped to its creator
    ///
    /// The dependent rows are removed explicitly in a single transaction, in
    /// the order comments -> tasks -> members -> project, rather than relying
    /// on the foreign-key cascade.
    ///
    /// # Returns
    ///
    /// True if the project was deleted, false if it is absent or not owned by
    /// the user.
    pub async fn delete_cascade(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1 AND created_by = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if !owned {
            return Ok(false);
        }

        sqlx::query(
            r#"
            DELETE FROM comments
            WHERE task_id IN (SELECT id FROM tasks WHERE project_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM project_members WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }

    /// Checks whether a user may read a project (creator or member)
    pub async fn has_access(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let allowed: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM projects
                WHERE id = $1
                  AND (created_by = $2 OR EXISTS(
                      SELECT 1 FROM project_members
                      WHERE project_id = $1 AND user_id = $2
                  ))
            )
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(allowed)
    }

    /// Checks whether a user is the creator of a project
    pub async fn is_creator(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let is_creator: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1 AND created_by = $2)",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(is_creator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_struct() {
        let data = CreateProject {
            name: "Website".to_string(),
            description: "Rebuild".to_string(),
            start_date: Utc::now(),
            end_date: Utc::now(),
        };

        assert_eq!(data.name, "Website");
        assert_eq!(data.description, "Rebuild");
    }

    // Database round trips are exercised through the API integration surface;
    // the access predicates over loaded projects are tested in crate::access.
}
