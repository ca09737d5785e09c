use std::sync::Arc;

use crate::application::repos::BlogsRepo;

#[derive(Clone)]
pub struct AdminBlogService {
    pub(crate) repo: Arc<dyn BlogsRepo>,
}

impl AdminBlogService {
    pub fn new(repo: Arc<dyn BlogsRepo>) -> Self {
        Self { repo }
    }
}
