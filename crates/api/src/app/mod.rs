//! Router assembly.

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{Extension, Router, middleware, routing::get};
use sqlx::PgPool;
use tower::ServiceBuilder;

use astar_auth::Hs256TokenVerifier;

use crate::middleware::{AuthState, admin_auth};
use services::AppServices;

/// Build the full application router.
///
/// The `/admin` subtree sits behind [`admin_auth`]; everything else is
/// public. All handlers share one [`AppServices`] via request extensions.
pub fn build_app(pool: PgPool, jwt_secret: &str) -> Router {
    let services = Arc::new(AppServices::new(pool.clone()));
    let auth = AuthState::new(Hs256TokenVerifier::new(jwt_secret.as_bytes()), pool);

    let admin = Router::new()
        .nest("/products", routes::products::admin_router())
        .nest("/orders", routes::orders::admin_router())
        .route_layer(middleware::from_fn_with_state(auth, admin_auth));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/products", routes::products::public_router())
        .nest("/admin", admin)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
