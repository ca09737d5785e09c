use crate::domain::entities::BlogRecord;

use super::service::AdminBlogService;
use super::types::AdminBlogError;

impl AdminBlogService {
    /// All blog rows, oldest first. An empty listing is a valid result.
    pub async fn list(&self) -> Result<Vec<BlogRecord>, AdminBlogError> {
        self.repo.list_all().await.map_err(AdminBlogError::from)
    }

    pub async fn load(&self, id: i64) -> Result<Option<BlogRecord>, AdminBlogError> {
        self.repo.find_by_id(id).await.map_err(AdminBlogError::from)
    }
}
