/// Database models for Taskdeck
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `project`: Projects owned by their creator
/// - `member`: Project membership (user-project relationships)
/// - `task`: Tasks belonging to a project, with a status lifecycle
/// - `comment`: Comments on tasks
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::user::{User, CreateUser};
/// use taskdeck_shared::models::user::UserRole;
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     name: "Jane Doe".to_string(),
///     email: "jane@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     role: UserRole::User,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod comment;
pub mod member;
pub mod project;
pub mod task;
pub mod user;
