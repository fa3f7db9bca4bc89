//! Janus Auth API
//!
//! Authentication gateway service: credential login, signed token issuance,
//! per-application entitlement decisions and password-reset delivery.

mod config;
mod error;
mod extractors;
mod handlers;
mod mailer;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use janus_auth_core::AuthService;
use janus_db::{create_pool, Repositories};

use crate::config::Config;
use crate::mailer::RelayMailer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Janus Auth API");

    // Configuration problems (missing signing secret included) are fatal here
    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let repos = Repositories::new(pool.clone());

    let mailer = RelayMailer::new(&config.mail_relay_url, &config.mail_from);

    let auth = AuthService::new(
        config.token.clone(),
        Arc::new(repos.identities.clone()),
        Arc::new(repos.entitlements.clone()),
        Arc::new(mailer),
        &config.reset_base_url,
    )?;

    let state = AppState::new(auth, repos, pool);

    // Build router
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/application-login", post(handlers::application_login))
        .route("/api/auth/register", post(handlers::register))
        .route(
            "/api/auth/password-reset/request",
            post(handlers::request_password_reset),
        )
        .route(
            "/api/auth/password-reset/confirm",
            post(handlers::confirm_password_reset),
        )
        .route("/api/users", get(handlers::list_users))
        .route(
            "/api/users/{id}",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .route(
            "/api/users/{id}/applications",
            get(handlers::user_assignments).put(handlers::reconcile_assignments),
        )
        .route("/api/applications", get(handlers::list_applications))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
