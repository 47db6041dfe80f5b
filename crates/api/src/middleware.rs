//! Bearer-token authentication for the admin surface.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;

use astar_auth::{Hs256TokenVerifier, Role};

use crate::app::errors::json_error;
use crate::context::AdminContext;

/// Shared state for [`admin_auth`].
#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<Hs256TokenVerifier>,
    pub pool: PgPool,
}

impl AuthState {
    pub fn new(verifier: Hs256TokenVerifier, pool: PgPool) -> Self {
        Self {
            verifier: Arc::new(verifier),
            pool,
        }
    }
}

/// Guard for `/admin` routes.
///
/// Accepts a request only when it carries a bearer token with a valid
/// signature AND the token's subject resolves to a user whose stored role is
/// `admin`. Claims inside the token are never trusted for authorization; the
/// role always comes from the users table.
pub async fn admin_auth(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(request.headers()).map_err(|status| {
        json_error(status, "unauthorized", "missing or malformed bearer token")
    })?;

    let claims = state.verifier.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "token verification failed");
        json_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid token")
    })?;

    let role: Option<String> =
        sqlx::query_scalar("SELECT role FROM users WHERE user_id = $1")
            .bind(claims.sub.as_uuid())
            .fetch_optional(&state.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "role lookup failed");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal error",
                )
            })?;

    let Some(role) = role else {
        return Err(json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "unknown user",
        ));
    };

    let role = Role::new(role);
    if !role.is_admin() {
        return Err(json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "admin role required",
        ));
    }

    request
        .extensions_mut()
        .insert(AdminContext::new(claims.sub, role));

    Ok(next.run(request).await)
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_str()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or(StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn rejects_empty_token() {
        let headers = headers_with("Bearer ");
        assert_eq!(extract_bearer(&headers), Err(StatusCode::UNAUTHORIZED));
    }
}
