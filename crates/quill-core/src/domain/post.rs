use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::CreatePostInput;

/// Store-assigned post identifier.
pub type PostId = i32;

/// Post entity - a persisted blog entry.
///
/// `id`, `created_at` and `updated_at` are assigned by the store on insert.
/// The author columns are reserved for a future identity feature and are
/// always `None` for posts created through [`crate::posts::create_post`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post that has passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
}

impl NewPost {
    /// Build an anonymous post from validated input.
    pub fn anonymous(input: CreatePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
            author_id: None,
            author_name: None,
        }
    }
}
