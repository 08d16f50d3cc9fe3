//! `stockwise-core` - shared building blocks.
//!
//! This crate contains **pure** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{BatchId, ProductId};
pub use value_object::ValueObject;
