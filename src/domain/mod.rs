//! # Domain Layer
//!
//! Item names, prompts, answers and the error taxonomy.
//! This layer is independent of HTTP and CLI concerns.

mod error;
pub mod models;

pub use error::DomainError;
pub use models::*;
