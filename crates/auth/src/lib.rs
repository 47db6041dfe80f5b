//! `astar-auth` — authentication boundary (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage. Claims are
//! only obtainable through [`Hs256TokenVerifier`], which checks signature and
//! expiry before any field is trusted.

pub mod claims;
pub mod roles;
pub mod token;

pub use claims::{AuthClaims, TokenValidationError, validate_claims};
pub use roles::Role;
pub use token::{Hs256TokenVerifier, TokenError};
