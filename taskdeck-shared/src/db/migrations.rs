/// Database migration runner
///
/// This module runs the SQL migrations stored in the `migrations/` directory
/// at the workspace root using sqlx's migration system.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskdeck_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Migrations are run in order; a failed migration is rolled back and
/// returned as an error.
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the database
/// connection is lost during migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
