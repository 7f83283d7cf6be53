//! # Taskdeck API Server
//!
//! This is the main API server for Taskdeck, a multi-tenant project-tracking
//! service: users, projects, project membership, tasks with a status
//! lifecycle, and task comments, behind a JWT-authenticated REST API.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskdeck-api
//! ```

use taskdeck_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskdeck_shared::db::{migrations::run_migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskdeck API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&db).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
