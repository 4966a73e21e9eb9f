//! SeaORM entities for the `posts` and `todos` tables.

pub mod post;
pub mod todo;
