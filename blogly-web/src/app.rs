//! Application state and router builder
//!
//! `AppState` is the only thing handlers share: the database pool and the
//! loaded configuration. It is built once in `main` (or a test) and handed to
//! every handler through axum's `State` extractor.
//!
//! # Example
//!
//! ```no_run
//! use blogly_web::{app::{build_router, AppState}, config::Config};
//! use blogly_shared::db::pool::create_pool;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = create_pool(config.pool_config()).await?;
//! let app = build_router(AppState::new(pool, config));
//! # Ok(())
//! # }
//! ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request; the pool and `Arc` make that cheap.
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
}

/// Builds the complete router with all routes and middleware
///
/// ```text
/// GET  /                          -> 302 /users
/// GET  /health
/// GET  /users
/// GET  /users/new     POST /users/new
/// GET  /users/:id
/// GET  /users/:id/edit POST /users/:id/edit
///                     POST /users/:id/delete
/// GET  /users/:id/posts/new  POST /users/:id/posts/new
/// GET  /posts/:id
/// GET  /posts/:id/edit POST /posts/:id/edit
///                     POST /posts/:id/delete
/// GET  /tags
/// GET  /tags/new      POST /tags/new
/// GET  /tags/:id
/// GET  /tags/:id/edit POST /tags/:id/edit
///                     POST /tags/:id/delete
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{health, posts, tags, users};

    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/new", get(users::new_user_form).post(users::create_user))
        .route("/:id", get(users::show_user))
        .route("/:id/edit", get(users::edit_user_form).post(users::update_user))
        .route("/:id/delete", post(users::delete_user))
        .route("/:id/posts/new", get(posts::new_post_form).post(posts::create_post));

    let post_routes = Router::new()
        .route("/:id", get(posts::show_post))
        .route("/:id/edit", get(posts::edit_post_form).post(posts::update_post))
        .route("/:id/delete", post(posts::delete_post));

    let tag_routes = Router::new()
        .route("/", get(tags::list_tags))
        .route("/new", get(tags::new_tag_form).post(tags::create_tag))
        .route("/:id", get(tags::show_tag))
        .route("/:id/edit", get(tags::edit_tag_form).post(tags::update_tag))
        .route("/:id/delete", post(tags::delete_tag));

    Router::new()
        .route("/", get(users::root))
        .route("/health", get(health::health_check))
        .nest("/users", user_routes)
        .nest("/posts", post_routes)
        .nest("/tags", tag_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(state.config.server.production))
        .with_state(state)
}
