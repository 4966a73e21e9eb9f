use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId};
use crate::error::RepoError;

/// Generic read-side repository trait.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// Post repository.
///
/// Posts are only ever inserted and read; there is no update or delete path.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts, newest `created_at` first. Ties are broken by descending id.
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert a post and return the stored row, including generated columns.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;
}
