//! Serving stored cover images under the web-facing `img/` prefix.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{
        StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::application::error::HttpError;
use crate::infra::uploads::ImageStorageError;

use super::AdminState;

pub(crate) async fn serve_image(
    State(state): State<AdminState>,
    Path(path): Path<String>,
) -> Response {
    let bytes = match state.images.read(&path).await {
        Ok(bytes) => bytes,
        Err(ImageStorageError::InvalidPath) => {
            return HttpError::new(
                "infra::http::serve_image",
                StatusCode::NOT_FOUND,
                "Image not found",
                format!("rejected stored path `{path}`"),
            )
            .into_response();
        }
        Err(ImageStorageError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            return HttpError::new(
                "infra::http::serve_image",
                StatusCode::NOT_FOUND,
                "Image not found",
                format!("no stored file at `{path}`"),
            )
            .into_response();
        }
        Err(err) => {
            error!(
                target = "vetrina::http::images",
                error = %err,
                path = %path,
                "failed to read stored image"
            );
            return HttpError::new(
                "infra::http::serve_image",
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read image",
                err.to_string(),
            )
            .into_response();
        }
    };

    let content_type = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
