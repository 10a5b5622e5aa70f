//! HTTP API server

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthService, PasswordHasher, TokenIssuer};
use crate::config::Config;
use crate::error::Result;
use crate::photos::PhotoService;
use crate::store::Stores;
use crate::users::UserService;

use super::routes;

/// Application state shared across handlers.
///
/// Built once at startup from the configuration and handed to the router;
/// handlers never reach for globals.
pub struct AppState {
    pub config: Config,
    pub auth: AuthService,
    pub users: UserService,
    pub photos: PhotoService,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire the services on top of already opened stores
    pub fn new(config: Config, stores: Stores) -> Result<Self> {
        let hasher = PasswordHasher::new(config.auth.bcrypt_cost)?;
        let tokens = TokenIssuer::from_config(&config.auth)?;
        tracing::debug!(
            "Sessions last {} days, bcrypt cost {}",
            tokens.ttl().num_days(),
            hasher.cost()
        );

        Ok(Self {
            auth: AuthService::new(stores.users.clone(), hasher, tokens),
            users: UserService::new(stores.users, hasher),
            photos: PhotoService::new(stores.photos),
            config,
        })
    }

    /// Open the configured database and wire the services
    pub async fn from_config(config: Config) -> Result<Self> {
        let stores = Stores::open(&config.database).await?;
        Self::new(config, stores)
    }
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::from_config(config).await?);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    serve(listener, state).await
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    let app = create_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        // User routes
        .route("/api/users/register", post(routes::register))
        .route("/api/users/login", post(routes::login))
        .route("/api/users/current", get(routes::current_user))
        .route("/api/users", put(routes::update_profile))
        .route("/api/users/", put(routes::update_profile))
        .route("/api/users/{id}", get(routes::get_user))
        // Photo routes
        .route(
            "/api/photos",
            get(routes::list_photos).post(routes::insert_photo),
        )
        .route("/api/photos/user/{id}", get(routes::user_photos))
        .route("/api/photos/search", get(routes::search_photos))
        .route("/api/photos/like/{id}", put(routes::like_photo))
        .route("/api/photos/comment/{id}", put(routes::comment_photo))
        .route(
            "/api/photos/{id}",
            get(routes::get_photo)
                .put(routes::update_photo)
                .delete(routes::delete_photo),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
