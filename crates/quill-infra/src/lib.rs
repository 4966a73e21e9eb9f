//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM. Without it only
//!   the in-memory repository is available.

pub mod database;

pub use database::{ConfigError, DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{DbErr, PostgresPostRepository, store};
