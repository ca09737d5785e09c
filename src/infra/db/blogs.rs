use async_trait::async_trait;
use time::Date;

use crate::application::repos::{BlogsRepo, CreateBlogParams, RepoError, UpdateBlogParams};
use crate::domain::entities::BlogRecord;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: i64,
    title: String,
    description: String,
    date: Date,
    image: String,
    is_active: bool,
}

impl From<BlogRow> for BlogRecord {
    fn from(row: BlogRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            image: row.image,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl BlogsRepo for PostgresRepositories {
    async fn list_all(&self) -> Result<Vec<BlogRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BlogRow>(
            "SELECT id, title, description, date, image, is_active \
             FROM blogs ORDER BY id",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BlogRecord::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BlogRecord>, RepoError> {
        let row = sqlx::query_as::<_, BlogRow>(
            "SELECT id, title, description, date, image, is_active \
             FROM blogs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(BlogRecord::from))
    }

    async fn insert(&self, params: CreateBlogParams) -> Result<BlogRecord, RepoError> {
        let row = sqlx::query_as::<_, BlogRow>(
            "INSERT INTO blogs (title, description, date, image) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, description, date, image, is_active",
        )
        .bind(params.title)
        .bind(params.description)
        .bind(params.date)
        .bind(params.image)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(BlogRecord::from(row))
    }

    async fn update(&self, params: UpdateBlogParams) -> Result<BlogRecord, RepoError> {
        let row = match params.image {
            Some(image) => {
                sqlx::query_as::<_, BlogRow>(
                    "UPDATE blogs \
                     SET title = $2, description = $3, date = $4, image = $5 \
                     WHERE id = $1 \
                     RETURNING id, title, description, date, image, is_active",
                )
                .bind(params.id)
                .bind(params.title)
                .bind(params.description)
                .bind(params.date)
                .bind(image)
                .fetch_optional(self.pool())
                .await
            }
            None => {
                sqlx::query_as::<_, BlogRow>(
                    "UPDATE blogs \
                     SET title = $2, description = $3, date = $4 \
                     WHERE id = $1 \
                     RETURNING id, title, description, date, image, is_active",
                )
                .bind(params.id)
                .bind(params.title)
                .bind(params.description)
                .bind(params.date)
                .fetch_optional(self.pool())
                .await
            }
        }
        .map_err(map_sqlx_error)?;

        row.map(BlogRecord::from).ok_or(RepoError::NotFound)
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<BlogRecord, RepoError> {
        let row = sqlx::query_as::<_, BlogRow>(
            "UPDATE blogs SET is_active = $2 WHERE id = $1 \
             RETURNING id, title, description, date, image, is_active",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(BlogRecord::from).ok_or(RepoError::NotFound)
    }

    async fn remove(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
