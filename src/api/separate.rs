use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::models::{SeparationManifest, SeparationParams};
use crate::services::{SeparationService, SeparationStore, StoredSeparation};

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Error message
    pub error: String,
}

/// Query parameters for the preview endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PreviewQuery {
    /// Draw the tile outlines over the preview
    #[serde(default)]
    pub chops: bool,
}

/// Separate an uploaded PNG into halftone layers and print tiles
///
/// The request body is the raw PNG. The result is stored under a content id
/// derived from the image and the parameters; posting the same inputs again
/// replaces the stored entry.
#[utoipa::path(
    post,
    path = "/api/separate",
    request_body(content = Vec<u8>, content_type = "image/png", description = "PNG image"),
    responses(
        (status = 201, description = "Separation created", body = SeparationManifest),
        (status = 400, description = "Body is not a readable PNG", body = ErrorResponse),
        (status = 422, description = "Invalid settings or print geometry", body = ErrorResponse),
    ),
    params(SeparationParams),
    tag = "Separation"
)]
pub async fn handle_separate<S: SeparationStore>(
    State(service): State<Arc<SeparationService>>,
    State(store): State<Arc<S>>,
    Query(params): Query<SeparationParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    tracing::info!(size_bytes = body.len(), params = ?params, "Separation request received");

    let stored = service.separate(body.to_vec(), params).await?;
    let manifest = stored.manifest.clone();
    store.insert(Arc::new(stored)).await?;

    Ok((StatusCode::CREATED, Json(manifest)).into_response())
}

/// Get the manifest of a stored separation
#[utoipa::path(
    get,
    path = "/api/separations/{id}",
    responses(
        (status = 200, description = "Separation manifest", body = SeparationManifest),
        (status = 404, description = "Unknown separation", body = ErrorResponse),
    ),
    params(("id" = String, Path, description = "Separation content id")),
    tag = "Separation"
)]
pub async fn handle_manifest<S: SeparationStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<SeparationManifest>, ApiError> {
    let stored = find(store.as_ref(), &id).await?;
    Ok(Json(stored.manifest.clone()))
}

/// Get the full halftone SVG of a stored separation
#[utoipa::path(
    get,
    path = "/api/separations/{id}/halftone.svg",
    responses(
        (status = 200, description = "Halftone SVG", content_type = "image/svg+xml"),
        (status = 404, description = "Unknown separation", body = ErrorResponse),
    ),
    params(("id" = String, Path, description = "Separation content id")),
    tag = "Separation"
)]
pub async fn handle_halftone_svg<S: SeparationStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let stored = find(store.as_ref(), &id).await?;
    Ok(svg_response(stored.halftone_svg(false)))
}

/// Get one layer of one print tile as SVG
#[utoipa::path(
    get,
    path = "/api/separations/{id}/tiles/{layer}/{column}/{row}",
    responses(
        (status = 200, description = "Tile SVG", content_type = "image/svg+xml"),
        (status = 404, description = "Unknown separation, channel or tile", body = ErrorResponse),
    ),
    params(
        ("id" = String, Path, description = "Separation content id"),
        ("layer" = String, Path, description = "Channel id, or a channel name such as black"),
        ("column" = u32, Path, description = "Tile column"),
        ("row" = u32, Path, description = "Tile row"),
    ),
    tag = "Separation"
)]
pub async fn handle_tile_svg<S: SeparationStore>(
    State(store): State<Arc<S>>,
    Path((id, layer, column, row)): Path<(String, String, u32, u32)>,
) -> Result<Response, ApiError> {
    let stored = find(store.as_ref(), &id).await?;
    Ok(svg_response(stored.tile_svg(&layer, column, row)?))
}

/// Get a PNG preview of a stored separation
#[utoipa::path(
    get,
    path = "/api/separations/{id}/preview.png",
    responses(
        (status = 200, description = "PNG preview", content_type = "image/png"),
        (status = 404, description = "Unknown separation", body = ErrorResponse),
        (status = 500, description = "Rendering error", body = ErrorResponse),
    ),
    params(
        ("id" = String, Path, description = "Separation content id"),
        PreviewQuery,
    ),
    tag = "Separation"
)]
pub async fn handle_preview<S: SeparationStore>(
    State(service): State<Arc<SeparationService>>,
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, ApiError> {
    let stored = find(store.as_ref(), &id).await?;
    let png_bytes = service.render_preview(stored, query.chops).await?;

    tracing::info!(id = %id, size_bytes = png_bytes.len(), chops = query.chops, "Preview rendered");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_LENGTH, &png_bytes.len().to_string()),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}

async fn find<S: SeparationStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<Arc<StoredSeparation>, ApiError> {
    store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::SeparationNotFound(id.to_string()))
}

fn svg_response(svg: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response()
}
