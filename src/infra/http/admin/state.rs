use std::sync::Arc;

use crate::application::admin::blogs::AdminBlogService;
use crate::infra::{db::PostgresRepositories, uploads::ImageStorage};

#[derive(Clone)]
pub struct AdminState {
    pub db: Arc<PostgresRepositories>,
    pub blogs: Arc<AdminBlogService>,
    pub images: Arc<ImageStorage>,
    pub upload_limit_bytes: u64,
}
