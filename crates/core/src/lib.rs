//! `keystone-core` — shared identity primitives.
//!
//! This crate contains **pure domain** primitives (no transport or storage).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
