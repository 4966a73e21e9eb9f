//! # Quill Shared
//!
//! Wire types shared between the server and its presentation clients.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldErrorBody};
