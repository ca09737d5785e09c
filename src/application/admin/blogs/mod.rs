mod commands;
mod queries;
mod service;
pub mod types;

pub use service::*;
pub use types::{
    AdminBlogError, CreateBlogCommand, MAX_PHOTO_BYTES, PhotoError, UpdateBlogCommand,
    ensure_non_empty, validate_photo,
};
