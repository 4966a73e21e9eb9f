//! Store access: configuration, the process-wide connection and repositories.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::{ConfigError, DatabaseConfig};
pub use memory::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use connections::store;
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresPostRepository;
#[cfg(feature = "postgres")]
pub use sea_orm::DbErr;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
