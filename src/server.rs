//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api::{self, PreviewQuery};
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::{AppConfig, SeparationManifest, SeparationParams};
use crate::services::{InMemoryStore, SeparationService};

/// Largest accepted upload body
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service: Arc<SeparationService>,
    pub store: Arc<InMemoryStore>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        Self {
            service: Arc::new(SeparationService::new(config.clone())),
            store: Arc::new(InMemoryStore::with_capacity(config.max_stored_separations)),
            config,
        }
    }
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    if asset_loader.seed_if_configured()? {
        tracing::info!(source = %asset_loader.config_source(), "Created config file");
    }
    let config = AppConfig::load_from_assets(&asset_loader);
    Ok(AppState::new(config))
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/separate", post(handle_separate))
        .route("/api/separations/:id", get(handle_manifest))
        .route("/api/separations/:id/halftone.svg", get(handle_halftone_svg))
        .route(
            "/api/separations/:id/tiles/:layer/:column/:row",
            get(handle_tile_svg),
        )
        .route("/api/separations/:id/preview.png", get(handle_preview))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            axum::http::header::CACHE_CONTROL,
            axum::http::HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_separate(
    State(state): State<AppState>,
    query: Query<SeparationParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    api::handle_separate(State(state.service), State(state.store), query, body).await
}

async fn handle_manifest(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<SeparationManifest>, ApiError> {
    api::handle_manifest(State(state.store), path).await
}

async fn handle_halftone_svg(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Response, ApiError> {
    api::handle_halftone_svg(State(state.store), path).await
}

async fn handle_tile_svg(
    State(state): State<AppState>,
    path: Path<(String, String, u32, u32)>,
) -> Result<Response, ApiError> {
    api::handle_tile_svg(State(state.store), path).await
}

async fn handle_preview(
    State(state): State<AppState>,
    path: Path<String>,
    query: Query<PreviewQuery>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_preview(State(state.service), State(state.store), path, query).await
}
