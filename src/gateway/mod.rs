//! HTTP upload/download gateway.
//!
//! A small axum application around the converter:
//!
//! - `GET /`: upload form
//! - `POST /`: multipart upload, convert, redirect to the download
//! - `GET /download/:filename`: serve a rendered PDF as an attachment
//!
//! Uploads are staged under [`GatewayConfig::upload_dir`] and rendered PDFs
//! land in [`GatewayConfig::output_dir`]; both directories are created at
//! startup. Each request runs its conversion to completion independently;
//! there is no shared state between requests beyond the filesystem, and
//! concurrent uploads of the *same* filename race on both paths (last
//! writer wins).

pub mod routes;

use crate::config::{ConversionConfig, GatewayConfig};
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Shared state handed to every route handler.
#[derive(Debug)]
pub struct AppState {
    pub gateway: GatewayConfig,
    pub conversion: ConversionConfig,
}

impl AppState {
    /// Build the state and create the staging/output directories.
    pub fn new(
        gateway: GatewayConfig,
        conversion: ConversionConfig,
    ) -> std::io::Result<Arc<Self>> {
        gateway.ensure_dirs()?;
        Ok(Arc::new(Self {
            gateway,
            conversion,
        }))
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.gateway.max_upload_bytes;
    Router::new()
        .route("/", get(routes::index).post(routes::upload))
        .route("/download/:filename", get(routes::download))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Bind `addr` and serve the gateway until the process is stopped.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
