/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskdeck_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskdeck_shared::auth::{jwt, middleware::AuthContext};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /api
/// ├── /health                               # Health check (public)
/// ├── /auth                                 # Authentication (public)
/// │   ├── POST /register
/// │   └── POST /login
/// ├── /users                                # Authenticated
/// │   ├── GET /
/// │   ├── GET /:id
/// │   └── PUT /me
/// ├── /projects                             # Authenticated
/// │   ├── GET    /
/// │   ├── POST   /
/// │   ├── GET    /:id
/// │   ├── PUT    /:id
/// │   ├── DELETE /:id
/// │   ├── POST   /:id/members
/// │   └── DELETE /:id/members/:member_id
/// └── /tasks                                # Authenticated
///     ├── GET    /project/:project_id
///     ├── POST   /
///     ├── GET    /:id
///     ├── PUT    /:id
///     ├── DELETE /:id
///     ├── PUT    /:id/assign/:user_id
///     ├── PUT    /:id/status/:status
///     └── POST   /:id/comments
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // User routes (require JWT authentication)
    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route("/me", put(routes::users::update_me))
        .route("/:id", get(routes::users::get_user))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Project routes (require JWT authentication)
    let project_routes = Router::new()
        .route("/", get(routes::projects::list_projects))
        .route("/", post(routes::projects::create_project))
        .route("/:id", get(routes::projects::get_project))
        .route("/:id", put(routes::projects::update_project))
        .route("/:id", delete(routes::projects::delete_project))
        .route("/:id/members", post(routes::projects::add_member))
        .route(
            "/:id/members/:member_id",
            delete(routes::projects::remove_member),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Task routes (require JWT authentication)
    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route("/project/:project_id", get(routes::tasks::list_project_tasks))
        .route("/:id", get(routes::tasks::get_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .route("/:id/assign/:user_id", put(routes::tasks::assign_task))
        .route("/:id/status/:status", put(routes::tasks::set_task_status))
        .route("/:id/comments", post(routes::tasks::add_comment))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Build complete API surface
    let api_routes = Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates JWT token from Authorization header,
/// then injects AuthContext into request extensions.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    // Parse Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| crate::error::ApiError::BadRequest("Expected Bearer token".to_string()))?;

    // Validate token
    let claims = jwt::validate_token(token, state.jwt_secret())?;

    // Identity travels with the request; no process-wide session state
    let auth_context = AuthContext::from_jwt(claims.sub);
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
