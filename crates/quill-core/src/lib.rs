//! # Quill Core
//!
//! The domain layer of the Quill blog service.
//! This crate contains the post model, input validation and the three
//! post operations, written against repository ports only.

pub mod domain;
pub mod error;
pub mod ports;
pub mod posts;
pub mod validation;

pub use error::DomainError;
