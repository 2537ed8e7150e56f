use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::services::{Authenticator, NoteService, NoteStore, UserService, UserStore};
use persistence::db::{create_lazy_pool, create_pool};
use persistence::repositories::{NoteRepository, UserRepository};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{health, notes, users};
use crate::services::JwtAuthenticator;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub notes: NoteService,
    pub users: UserService,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// Wires services over the given stores and authenticator.
    pub fn new(
        config: Config,
        pool: PgPool,
        note_store: Arc<dyn NoteStore>,
        user_store: Arc<dyn UserStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let notes = NoteService::new(note_store).with_sample_fallback(config.notes.sample_fallback);
        let users = UserService::new(user_store, authenticator.clone());

        Self {
            pool,
            config: Arc::new(config),
            notes,
            users,
            authenticator,
        }
    }

    /// Production state: Postgres repositories and the JWT authenticator.
    pub fn from_pool(config: Config, pool: PgPool) -> Self {
        let authenticator = Arc::new(JwtAuthenticator::new(&config.jwt));
        Self::new(
            config,
            pool.clone(),
            Arc::new(NoteRepository::new(pool.clone())),
            Arc::new(UserRepository::new(pool)),
            authenticator,
        )
    }
}

async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
    info!("Migrations completed");
    Ok(())
}

/// Connects to the database and applies migrations.
///
/// With `notes.sample_fallback` enabled an unreachable database does not stop
/// startup: the pool connects lazily and note listing serves the sample notes
/// until storage answers again.
pub async fn init_database(config: &Config) -> Result<PgPool, sqlx::Error> {
    if !config.notes.sample_fallback {
        let pool = create_pool(&config.database).await?;
        run_migrations(&pool).await?;
        return Ok(pool);
    }

    let pool = create_lazy_pool(&config.database)?;
    if let Err(e) = run_migrations(&pool).await {
        warn!(error = %e, "Database unavailable at startup, continuing in degraded mode");
    }
    Ok(pool)
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    build_router(AppState::from_pool(config, pool))
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let note_routes = Router::new()
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route("/api/notes/search", get(notes::search_notes))
        .route(
            "/api/notes/:id",
            get(notes::get_note)
                .patch(notes::update_note)
                .delete(notes::delete_note),
        );

    let user_routes = Router::new()
        .route("/api/users/register", post(users::register))
        .route("/api/users/login", post(users::login))
        .route("/api/users/profile", get(users::profile));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(note_routes)
        .merge(user_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}
