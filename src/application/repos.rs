//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::Date;

use crate::domain::entities::BlogRecord;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateBlogParams {
    pub title: String,
    pub description: String,
    pub date: Date,
    pub image: String,
}

/// `image: None` leaves the stored image reference untouched.
#[derive(Debug, Clone)]
pub struct UpdateBlogParams {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: Date,
    pub image: Option<String>,
}

#[async_trait]
pub trait BlogsRepo: Send + Sync {
    async fn list_all(&self) -> Result<Vec<BlogRecord>, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<BlogRecord>, RepoError>;

    async fn insert(&self, params: CreateBlogParams) -> Result<BlogRecord, RepoError>;

    async fn update(&self, params: UpdateBlogParams) -> Result<BlogRecord, RepoError>;

    async fn set_active(&self, id: i64, active: bool) -> Result<BlogRecord, RepoError>;

    async fn remove(&self, id: i64) -> Result<(), RepoError>;
}
