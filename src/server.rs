//! Process wiring: database pool, auth client, background tasks and the
//! HTTP listener.

use crate::application::services::{AuthService, UrlService};
use crate::config::{AuthConfig, Config, DatabaseConfig};
use crate::domain::click_event::ClickEvent;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::auth::GoTrueClient;
use crate::infrastructure::notifications::{UrlEventBus, run_change_listener};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs LinkSnap until ctrl-c.
///
/// Startup order: pool (and migrations), auth client, click worker, change
/// listener, router. The click worker and change listener live for the
/// whole process.
///
/// # Errors
///
/// Fails if the database is unreachable, a migration fails, the auth base
/// URL is unusable or the listener cannot bind.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config.database).await?;
    let auth_client = auth_client(&config.auth)?;

    let events = UrlEventBus::default();
    let (click_tx, click_rx) = mpsc::channel::<ClickEvent>(config.click_queue_capacity);
    let url_repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));

    tokio::spawn(run_click_worker(click_rx, url_repository.clone()));
    tokio::spawn(run_change_listener(pool, events.clone()));
    tracing::info!(
        capacity = config.click_queue_capacity,
        "Click worker and change listener started"
    );

    let state = AppState {
        url_service: Arc::new(UrlService::new(url_repository, events.clone())),
        auth_service: Arc::new(AuthService::new(Arc::new(auth_client))),
        click_sender: click_tx,
        events,
        public_base_url: config.http.public_base_url.clone(),
        trust_forwarded_headers: config.http.behind_proxy,
        cookie_secure: config.auth.cookie_secure,
    };

    let addr: SocketAddr = config
        .http
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.http.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("LinkSnap listening on http://{addr}");

    let app = app_router(state, config.http.behind_proxy);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_database(db: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(db.connect_timeout)
        .idle_timeout(db.idle_timeout)
        .max_lifetime(db.max_lifetime)
        .connect(&db.url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(max_connections = db.max_connections, "Connected to database");

    if db.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations applied");
    }

    Ok(pool)
}

fn auth_client(auth: &AuthConfig) -> Result<GoTrueClient> {
    GoTrueClient::new(&auth.supabase_url, auth.anon_key.clone())
        .context("Failed to create auth client")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
