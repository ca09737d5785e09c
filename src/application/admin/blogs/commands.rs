use crate::application::repos::{CreateBlogParams, RepoError, UpdateBlogParams};
use crate::domain::entities::BlogRecord;

use super::service::AdminBlogService;
use super::types::{AdminBlogError, CreateBlogCommand, UpdateBlogCommand, ensure_non_empty};

impl AdminBlogService {
    pub async fn create_blog(
        &self,
        command: CreateBlogCommand,
    ) -> Result<BlogRecord, AdminBlogError> {
        ensure_non_empty(&command.title, "title")?;
        ensure_non_empty(&command.description, "description")?;
        ensure_non_empty(&command.image, "image")?;

        let params = CreateBlogParams {
            title: command.title,
            description: command.description,
            date: command.date,
            image: command.image,
        };

        let blog = self.repo.insert(params).await?;
        Ok(blog)
    }

    pub async fn update_blog(
        &self,
        command: UpdateBlogCommand,
    ) -> Result<BlogRecord, AdminBlogError> {
        ensure_non_empty(&command.title, "title")?;
        ensure_non_empty(&command.description, "description")?;
        if let Some(image) = command.image.as_deref() {
            ensure_non_empty(image, "image")?;
        }

        let params = UpdateBlogParams {
            id: command.id,
            title: command.title,
            description: command.description,
            date: command.date,
            image: command.image,
        };

        match self.repo.update(params).await {
            Ok(blog) => Ok(blog),
            Err(RepoError::NotFound) => Err(AdminBlogError::NotFound),
            Err(err) => Err(AdminBlogError::Repo(err)),
        }
    }

    /// Flip the active flag and return the updated record.
    pub async fn toggle_status(&self, id: i64) -> Result<BlogRecord, AdminBlogError> {
        let blog = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AdminBlogError::NotFound)?;

        let updated = self.repo.set_active(id, !blog.is_active).await?;
        Ok(updated)
    }

    /// Remove the row and hand back the deleted record so the caller can
    /// clean up the stored image.
    pub async fn delete_blog(&self, id: i64) -> Result<BlogRecord, AdminBlogError> {
        let blog = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AdminBlogError::NotFound)?;

        self.repo.remove(id).await?;
        Ok(blog)
    }
}
