//! Post operations exposed to presentation collaborators.
//!
//! Reads degrade instead of failing: a store error while listing yields an
//! empty list, and a store error while looking up yields "not found".
//! Creation validates before touching the store and never leaks store
//! detail to the caller.

use serde_json::Value;

use crate::domain::{NewPost, Post, PostId};
use crate::error::DomainError;
use crate::ports::PostRepository;
use crate::validation::validate_create_post;

/// List every post, newest first.
pub async fn list_posts(repo: &dyn PostRepository) -> Vec<Post> {
    match repo.list_newest_first().await {
        Ok(posts) => {
            tracing::debug!(count = posts.len(), "Listed posts");
            posts
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list posts; returning an empty list");
            Vec::new()
        }
    }
}

/// Validate `payload` and store it as a new anonymous post.
pub async fn create_post(repo: &dyn PostRepository, payload: &Value) -> Result<Post, DomainError> {
    let input = validate_create_post(payload).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected post input");
    })?;

    let post = repo
        .insert(NewPost::anonymous(input))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error creating post");
            DomainError::CreateFailed
        })?;

    tracing::info!(post_id = post.id, "Post created");
    Ok(post)
}

/// Look up a post by its identifier in string form.
///
/// Identifiers that are not integers are simply not found.
pub async fn get_post(repo: &dyn PostRepository, post_id: &str) -> Option<Post> {
    let Ok(id) = post_id.parse::<PostId>() else {
        tracing::debug!(post_id, "Post id is not an integer");
        return None;
    };

    match repo.find_by_id(id).await {
        Ok(post) => post,
        Err(e) => {
            tracing::error!(post_id = id, error = %e, "Failed to look up post");
            None
        }
    }
}
