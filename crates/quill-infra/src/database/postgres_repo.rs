//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};

use quill_core::domain::{NewPost, Post};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        tracing::debug!(
            title_chars = new_post.title.chars().count(),
            content_chars = new_post.content.chars().count(),
            "Inserting post"
        );

        let active_model: post::ActiveModel = new_post.into();
        let model = active_model.insert(self.db.as_ref()).await.map_err(repo_error)?;

        Ok(model.into())
    }
}
