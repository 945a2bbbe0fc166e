// src/lib.rs
pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use application::{FolderRepository, FolderService, NoteRepository, NoteService};
use axum::routing::get;
use axum::{middleware, Router};
use config::AppConfig;
use constants::{FOLDERS_PATH, NOTES_PATH};
use infrastructure::SqliteStore;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{debug, info, Level};

use crate::cli::args::Args;
use crate::ports::http::{self, error};

/// Composition root: mounts both entity routers on one store and wraps them in
/// the shared middleware stack.
pub fn build_app<S>(store: Arc<S>, config: &AppConfig) -> Router
where
    S: FolderRepository + NoteRepository + 'static,
{
    let folders = Arc::new(FolderService::new(Arc::clone(&store)));
    let notes = Arc::new(NoteService::new(store));

    let mut app = Router::new()
        .route("/", get(hello))
        .nest(FOLDERS_PATH, http::folders::router(folders))
        .nest(NOTES_PATH, http::notes::router(notes))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(middleware::from_fn_with_state(
            config.environment.error_verbosity(),
            error::catch_all,
        ));

    if config.environment.logs_requests() {
        app = app.layer(
            TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)),
        );
    }

    http::with_security_headers(app).layer(CorsLayer::permissive())
}

async fn hello() -> &'static str {
    "Hello, World!"
}

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting noteful with arguments");

    let config = args.app_config();
    let store = Arc::new(SqliteStore::open(args.database_url())?);
    let app = build_app(store, &config);

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, environment = ?config.environment, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated with an error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use crate::util::testing;
    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }
}
