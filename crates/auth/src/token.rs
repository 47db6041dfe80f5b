//! HS256 bearer-token verification.
//!
//! The only path that turns an opaque token string into [`AuthClaims`].
//! Signature and expiry are checked by `jsonwebtoken` before any claim is
//! read; a token that fails either check yields an error, never claims.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{AuthClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed: {0}")]
    Malformed(String),
}

/// Verifier for HS256-signed bearer tokens sharing a symmetric secret with
/// the identity provider.
pub struct Hs256TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Hs256TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Tokens from the identity provider are not audience-scoped.
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify signature and expiry, then decode and validate the claims.
    pub fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        let data = jsonwebtoken::decode::<AuthClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                other => TokenError::Malformed(format!("{:?}", other)),
            })?;

        // jsonwebtoken checks exp; the remaining time-window rules (iat in
        // the future, inverted window) live in the claims layer.
        validate_claims(&data.claims, Utc::now()).map_err(|e| match e {
            TokenValidationError::Expired => TokenError::Expired,
            other => TokenError::Malformed(other.to_string()),
        })?;

        Ok(data.claims)
    }
}
