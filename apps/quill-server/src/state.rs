//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::PostRepository;
use quill_infra::{DatabaseConfig, DbErr, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Open the process-wide store and build the state on top of it.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let conn = quill_infra::store(config).await?;
        let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(conn));

        tracing::info!("Application state initialized");

        Ok(Self { posts })
    }

    #[cfg(test)]
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}
