use axum::http::StatusCode;

use crate::application::{admin::blogs::AdminBlogError, error::HttpError};
use crate::infra::http::repo_error_to_http;

use super::multipart::BlogPayloadError;

pub(super) fn admin_blog_error(source: &'static str, err: AdminBlogError) -> HttpError {
    match err {
        AdminBlogError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Blog not found",
            "blog not found",
        ),
        AdminBlogError::ConstraintViolation(field) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Blog request could not be processed",
            format!("Invalid field `{field}`"),
        ),
        AdminBlogError::Repo(repo) => repo_error_to_http(source, repo),
    }
}

pub(super) fn blog_payload_error(source: &'static str, err: BlogPayloadError) -> HttpError {
    match err {
        BlogPayloadError::PayloadTooLarge => HttpError::new(
            source,
            StatusCode::PAYLOAD_TOO_LARGE,
            "Uploaded file is too large",
            "multipart payload exceeded the configured body limit",
        ),
        BlogPayloadError::InvalidFormData => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Form data was invalid",
            "multipart payload could not be parsed",
        ),
        BlogPayloadError::Read { detail } => HttpError::new(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to read form data",
            detail,
        ),
    }
}
