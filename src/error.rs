use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use halftone_core::{ConfigurationError, HalftoneError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Separation not found: {0}")]
    SeparationNotFound(String),

    #[error("Tile not found: {layer} {column},{row}")]
    TileNotFound {
        layer: String,
        column: u32,
        row: u32,
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Halftone error: {0}")]
    Halftone(#[from] HalftoneError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConfigurationError> for ApiError {
    fn from(e: ConfigurationError) -> Self {
        ApiError::Halftone(e.into())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("Image too large: {width}x{height} pixels (max {max} pixels)")]
    ImageTooLarge { width: u32, height: u32, max: u64 },

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Whether the error was caused by the uploaded image rather than by us.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RenderError::PngDecode(_) | RenderError::ImageTooLarge { .. }
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::SeparationNotFound(_) | ApiError::TileNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidSettings(_) | ApiError::Halftone(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Render(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Render(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halftone_core::DegenerateGeometryError;

    #[test]
    fn test_api_error_messages() {
        assert_eq!(
            ApiError::SeparationNotFound("abc".into()).to_string(),
            "Separation not found: abc"
        );
        assert_eq!(
            ApiError::TileNotFound {
                layer: "spot-red".into(),
                column: 2,
                row: 1
            }
            .to_string(),
            "Tile not found: spot-red 2,1"
        );
        assert_eq!(
            ApiError::InvalidSettings("unknown channel 'q'".into()).to_string(),
            "Invalid settings: unknown channel 'q'"
        );
    }

    #[test]
    fn test_halftone_error_keeps_parameter_name() {
        let err: ApiError = HalftoneError::from(ConfigurationError::NonPositive {
            parameter: "cell_size",
            value: 0.0,
        })
        .into();
        assert!(err.to_string().contains("cell_size must be greater than 0"));
    }

    #[test]
    fn test_render_error_messages() {
        let error = RenderError::ImageTooLarge {
            width: 20000,
            height: 20000,
            max: 64_000_000,
        };
        assert_eq!(
            error.to_string(),
            "Image too large: 20000x20000 pixels (max 64000000 pixels)"
        );
        assert_eq!(
            RenderError::PngDecode("bad signature".into()).to_string(),
            "PNG decode error: bad signature"
        );
        assert_eq!(
            RenderError::PixmapAllocation.to_string(),
            "Failed to allocate pixmap"
        );
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::SeparationNotFound("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::TileNotFound {
            layer: "k".into(),
            column: 0,
            row: 0,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Halftone(HalftoneError::from(DegenerateGeometryError {
            width: 0,
            height: 0,
        }))
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::InvalidSettings("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::Render(RenderError::PngDecode("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Render(RenderError::PixmapAllocation).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Internal("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
