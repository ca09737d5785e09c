//! Multipart reading for the blog create/edit forms.

use axum::http::StatusCode;
use axum_extra::extract::Multipart;
use axum_extra::extract::multipart::MultipartError;
use bytes::Bytes;
use tracing::error;

const SOURCE_BASE: &str = "infra::http::admin_blogs";

/// Transient upload payload submitted with a create/edit request.
pub(super) struct PhotoUpload {
    pub(super) filename: String,
    pub(super) content_type: String,
    pub(super) data: Bytes,
}

pub(super) struct BlogFormPayload {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) date: String,
    pub(super) photo: Option<PhotoUpload>,
}

#[derive(Debug)]
pub(super) enum BlogPayloadError {
    PayloadTooLarge,
    InvalidFormData,
    Read { detail: String },
}

pub(super) async fn read_blog_form(
    multipart: &mut Multipart,
) -> Result<BlogFormPayload, BlogPayloadError> {
    let mut title = String::new();
    let mut description = String::new();
    let mut date = String::new();
    let mut photo = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => match field.name() {
                Some("title") => title = read_text(field).await?,
                Some("description") => description = read_text(field).await?,
                Some("date") => date = read_text(field).await?,
                Some("photo") => {
                    let filename = field
                        .file_name()
                        .map(|value| value.to_string())
                        .filter(|value| !value.trim().is_empty());

                    let content_type = field
                        .content_type()
                        .map(|mime| mime.to_string())
                        .unwrap_or_else(|| "application/octet-stream".to_string());

                    let data = field.bytes().await.map_err(map_multipart_error)?;

                    // Browsers submit an empty part when no file was chosen.
                    if let Some(filename) = filename {
                        if !data.is_empty() {
                            photo = Some(PhotoUpload {
                                filename,
                                content_type,
                                data,
                            });
                        }
                    }
                }
                _ => continue,
            },
            Ok(None) => break,
            Err(err) => return Err(map_multipart_error(err)),
        }
    }

    Ok(BlogFormPayload {
        title,
        description,
        date,
        photo,
    })
}

async fn read_text(
    field: axum_extra::extract::multipart::Field,
) -> Result<String, BlogPayloadError> {
    field
        .text()
        .await
        .map(|value| value.trim().to_string())
        .map_err(|_| BlogPayloadError::InvalidFormData)
}

fn map_multipart_error(err: MultipartError) -> BlogPayloadError {
    let status = err.status();
    error!(
        target = SOURCE_BASE,
        status = status.as_u16(),
        error = %err,
        "failed to read multipart payload"
    );
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => BlogPayloadError::PayloadTooLarge,
        StatusCode::BAD_REQUEST => BlogPayloadError::InvalidFormData,
        _ => BlogPayloadError::Read {
            detail: err.to_string(),
        },
    }
}
