//! HTTP server
//!
//! Serves the landing page, the file itself and its checksum.

use super::file::{FileError, SharedFile};
use super::page;
use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio_util::io::ReaderStream;

/// Shared state for the HTTP handlers
#[derive(Debug, Clone)]
pub struct AppState {
    file: Arc<SharedFile>,
}

impl AppState {
    pub fn new(file: SharedFile) -> Self {
        Self {
            file: Arc::new(file),
        }
    }

    pub fn file(&self) -> &SharedFile {
        &self.file
    }
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        let status = match self {
            FileError::NotFound(_) => StatusCode::NOT_FOUND,
            FileError::NotAFile(_) | FileError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("Can't serve file: {}", self);
        (status, status.canonical_reason().unwrap_or("error")).into_response()
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/file", get(download))
        .route("/hash", get(checksum))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Response {
    match page::render(state.file()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Can't render landing page: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn checksum(State(state): State<AppState>) -> String {
    state.file().checksum_line()
}

async fn download(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
) -> Result<Response, FileError> {
    let shared = state.file();
    match peer {
        Some(ConnectInfo(addr)) => tracing::info!("serving file to {}", addr),
        None => tracing::info!("serving file"),
    }

    let file = tokio::fs::File::open(&shared.path)
        .await
        .map_err(|e| FileError::from_io(&shared.path, e))?;

    // Never send more than the Content-Length announced below.
    let body = Body::from_stream(ReaderStream::new(file.take(shared.size)));

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, shared.content_disposition()),
            (header::CONTENT_LENGTH, shared.size.to_string()),
        ],
        body,
    )
        .into_response())
}

/// Bind a listener on all interfaces. Port 0 picks a free port.
pub async fn bind(port: u16) -> Result<TcpListener> {
    TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
        .await
        .with_context(|| format!("Can't listen on port {}", port))
}

/// Serve until Ctrl-C
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, then let in-flight requests finish
pub async fn serve_with_shutdown(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = build_router(state).into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Can't listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
