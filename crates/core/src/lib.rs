//! `astar-core` — shared domain primitives.
//!
//! Typed identifiers and the domain error model. No infrastructure concerns.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId, UserId};
