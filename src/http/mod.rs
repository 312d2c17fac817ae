//! HTTP surface: routes, shared state and the server loop.

pub mod document;
pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use tokio::net::TcpListener;
use tokio::task;

use self::error::ApiError;

/// State shared by every handler: the single SQLite connection.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Exclusive access to the connection for one operation. Blocks the
    /// calling thread, so async code goes through `with_conn` instead.
    pub fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Runs `work` against the connection on tokio's blocking pool, keeping
    /// lock waits and SQLite I/O off the async workers.
    pub async fn with_conn<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        task::spawn_blocking(move || {
            let conn = state.lock();
            work(&conn)
        })
        .await?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/reunions", get(handlers::index).post(handlers::create))
        .route("/reunions/with_soft_delete", get(handlers::with_soft_delete))
        .route(
            "/reunions/{id}",
            get(handlers::show)
                .patch(handlers::update)
                .put(handlers::update)
                .delete(handlers::destroy),
        )
        .route("/reunions/{id}/publish", post(handlers::publish))
        .with_state(state)
}

/// Serves the API on `bind` until Ctrl-C.
pub async fn serve(bind: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    let actual_addr = listener.local_addr()?;
    tracing::info!(bind = %actual_addr, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
