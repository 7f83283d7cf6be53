/// Access-control rules for projects and tasks
///
/// This module decides read/write eligibility for projects and the tasks that
/// belong to them. The rules are:
///
/// 1. **Project access**: the creator and every explicit member may read a
///    project and its tasks.
/// 2. **Project modification**: only the creator may update or delete a
///    project, manage its membership, or delete its tasks.
/// 3. **Assignment**: a task may only be assigned to a member of its project.
///
/// The `can_*` functions are pure predicates over loaded entities and carry no
/// side effects; the `require_*` functions are database-backed gates used by
/// the route handlers. Both report denial as [`AccessError::NotFound`], so an
/// unauthorized caller cannot distinguish a resource that exists from one that
/// does not.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::access::{require_project_access, require_project_owner};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// async fn check(pool: &PgPool, project_id: Uuid, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
///     // Any member (or the creator) may read
///     require_project_access(pool, project_id, user_id).await?;
///
///     // Only the creator may mutate
///     require_project_owner(pool, project_id, user_id).await?;
///     Ok(())
/// }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project::Project;
use crate::models::task::Task;

/// Error type for access checks
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// Resource is absent or the caller is not allowed to see it.
    ///
    /// Absence and denial are deliberately merged so responses never leak
    /// whether a project exists.
    #[error("Resource not found")]
    NotFound,

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Checks whether a user may read a project
///
/// True iff the user created the project or appears in its member list.
/// The creator is inserted as a member at project creation, but this
/// predicate does not rely on that invariant.
pub fn can_access_project(user_id: Uuid, project: &Project, member_ids: &[Uuid]) -> bool {
    project.created_by == user_id || member_ids.contains(&user_id)
}

/// Checks whether a user may modify a project
///
/// Only the creator may update or delete a project or manage its membership.
pub fn can_modify_project(user_id: Uuid, project: &Project) -> bool {
    project.created_by == user_id
}

/// Checks whether a user may read a task
///
/// Tasks inherit their project's access rules.
pub fn can_access_task(user_id: Uuid, task: &Task, project: &Project, member_ids: &[Uuid]) -> bool {
    task.project_id == project.id && can_access_project(user_id, project, member_ids)
}

/// Checks whether a user may delete a task of a project
///
/// Stricter than general task access: only the project creator may delete.
pub fn can_delete_task(user_id: Uuid, project: &Project) -> bool {
    project.created_by == user_id
}

/// Checks whether a user may be removed from a project's member list
///
/// The creator's membership is permanent: removing it would orphan the
/// project's access rules, so it is refused even as self-removal.
pub fn can_remove_member(target_user_id: Uuid, project: &Project) -> bool {
    target_user_id != project.created_by
}

/// Checks whether a task may be assigned to a user
///
/// The assignee must be an explicit member of the project. The creator is
/// always a member by construction, so the member list alone decides.
pub fn can_assign(target_user_id: Uuid, member_ids: &[Uuid]) -> bool {
    member_ids.contains(&target_user_id)
}

/// Requires that a user may read a project
///
/// Single EXISTS round trip; does not load the project.
///
/// # Errors
///
/// Returns [`AccessError::NotFound`] if the project is absent or the user is
/// neither its creator nor a member.
pub async fn require_project_access(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<(), AccessError> {
    let allowed = Project::has_access(pool, project_id, user_id).await?;

    if !allowed {
        return Err(AccessError::NotFound);
    }

    Ok(())
}

/// Requires that a user is the creator of a project
///
/// # Errors
///
/// Returns [`AccessError::NotFound`] if the project is absent or the user is
/// not its creator.
pub async fn require_project_owner(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<(), AccessError> {
    let is_creator = Project::is_creator(pool, project_id, user_id).await?;

    if !is_creator {
        return Err(AccessError::NotFound);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn project(created_by: Uuid) -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Website".to_string(),
            description: String::new(),
            created_by,
            start_date: Utc::now(),
            end_date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_creator_can_access_and_modify() {
        let creator = Uuid::new_v4();
        let p = project(creator);

        assert!(can_access_project(creator, &p, &[]));
        assert!(can_modify_project(creator, &p));
        assert!(can_delete_task(creator, &p));
    }

    #[test]
    fn test_member_can_access_but_not_modify() {
        let creator = Uuid::new_v4();
        let member = Uuid::new_v4();
        let p = project(creator);

        assert!(can_access_project(member, &p, &[creator, member]));
        assert!(!can_modify_project(member, &p));
        assert!(!can_delete_task(member, &p));
    }

    #[test]
    fn test_outsider_cannot_access() {
        let creator = Uuid::new_v4();
        let member = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let p = project(creator);

        assert!(!can_access_project(outsider, &p, &[creator, member]));
        assert!(!can_modify_project(outsider, &p));
    }

    #[test]
    fn test_creator_membership_is_permanent() {
        let creator = Uuid::new_v4();
        let member = Uuid::new_v4();
        let p = project(creator);

        // Refused no matter who asks, including the creator themselves
        assert!(!can_remove_member(creator, &p));
        assert!(can_remove_member(member, &p));
    }

    #[test]
    fn test_task_access_follows_project_access() {
        let creator = Uuid::new_v4();
        let member = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let p = project(creator);

        let task = Task {
            id: Uuid::new_v4(),
            title: "Write docs".to_string(),
            description: String::new(),
            project_id: p.id,
            assigned_to: None,
            status: crate::models::task::TaskStatus::Pending,
            due_date: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(can_access_task(creator, &task, &p, &[creator, member]));
        assert!(can_access_task(member, &task, &p, &[creator, member]));
        assert!(!can_access_task(outsider, &task, &p, &[creator, member]));

        // A task paired with the wrong project grants nothing
        let other = project(creator);
        assert!(!can_access_task(creator, &task, &other, &[creator]));
    }

    #[test]
    fn test_can_assign_members_only() {
        let member = Uuid::new_v4();
        let outsider = Uuid::new_v4();

        assert!(can_assign(member, &[member]));
        assert!(!can_assign(outsider, &[member]));
        assert!(!can_assign(outsider, &[]));
    }

    #[test]
    fn test_access_error_display() {
        let err = AccessError::NotFound;
        assert_eq!(err.to_string(), "Resource not found");
    }
}
