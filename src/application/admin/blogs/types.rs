use thiserror::Error;
use time::Date;

use crate::application::repos::RepoError;

/// Upper bound for uploaded cover images, matching the advertised 200kb limit.
pub const MAX_PHOTO_BYTES: u64 = 200 * 1024;

#[derive(Debug, Error)]
pub enum AdminBlogError {
    #[error("blog not found")]
    NotFound,
    #[error("{0}")]
    ConstraintViolation(&'static str),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct CreateBlogCommand {
    pub title: String,
    pub description: String,
    pub date: Date,
    pub image: String,
}

/// `image: None` keeps the currently stored image.
#[derive(Debug, Clone)]
pub struct UpdateBlogCommand {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: Date,
    pub image: Option<String>,
}

/// Upload payload rejection reasons, worded as the field errors shown on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("File type must be image")]
    NotAnImage,
    #[error("File size must be max 200kb")]
    TooLarge,
}

/// Validate an upload purely from its declared MIME type and byte length.
pub fn validate_photo(content_type: &str, size_bytes: u64) -> Result<(), PhotoError> {
    if !content_type.starts_with("image/") {
        return Err(PhotoError::NotAnImage);
    }
    if size_bytes > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge);
    }
    Ok(())
}

pub fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), AdminBlogError> {
    if value.trim().is_empty() {
        return Err(AdminBlogError::ConstraintViolation(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_images_up_to_the_limit() {
        assert_eq!(validate_photo("image/png", 50 * 1024), Ok(()));
        assert_eq!(validate_photo("image/jpeg", MAX_PHOTO_BYTES), Ok(()));
    }

    #[test]
    fn rejects_non_image_content_types() {
        assert_eq!(
            validate_photo("application/pdf", 1024),
            Err(PhotoError::NotAnImage)
        );
        assert_eq!(validate_photo("text/plain", 0), Err(PhotoError::NotAnImage));
    }

    #[test]
    fn rejects_payloads_over_the_limit() {
        assert_eq!(
            validate_photo("image/png", MAX_PHOTO_BYTES + 1),
            Err(PhotoError::TooLarge)
        );
    }

    #[test]
    fn type_check_runs_before_size_check() {
        assert_eq!(
            validate_photo("video/mp4", MAX_PHOTO_BYTES + 1),
            Err(PhotoError::NotAnImage)
        );
    }

    #[test]
    fn field_error_messages_match_the_form_copy() {
        assert_eq!(PhotoError::NotAnImage.to_string(), "File type must be image");
        assert_eq!(PhotoError::TooLarge.to_string(), "File size must be max 200kb");
    }
}
