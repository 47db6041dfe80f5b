//! Product routes: public storefront reads and the admin CRUD surface.

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use astar_core::ProductId;

use crate::app::dto::{CreateProductRequest, UpdateProductRequest};
use crate::app::errors::{catalog_error_to_response, domain_error_to_response, json_error};
use crate::app::services::AppServices;

pub fn public_router() -> Router {
    Router::new()
        .route("/", get(list_available))
        .route("/:id", get(get_product))
}

pub fn admin_router() -> Router {
    Router::new()
        .route("/", get(list_all).post(create_product))
        .route("/:id", axum::routing::put(update_product).delete(delete_product))
}

async fn list_available(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.products.list_available().await {
        Ok(products) => Json(products).into_response(),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn list_all(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.products.list_all().await {
        Ok(products) => Json(products).into_response(),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let product_id = match id.parse::<ProductId>() {
        Ok(id) => id,
        Err(e) => return domain_error_to_response(e),
    };

    match services.products.get(product_id).await {
        Ok(Some(product)) => Json(product).into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, "product_not_found", "product not found"),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreateProductRequest>,
) -> Response {
    let product = body.into_new_product();
    if let Err(e) = product.validate() {
        return domain_error_to_response(e);
    }

    match services.products.create(&product).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "product_id": id.get() })),
        )
            .into_response(),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Response {
    let product_id = match id.parse::<ProductId>() {
        Ok(id) => id,
        Err(e) => return domain_error_to_response(e),
    };

    let patch = body.into_patch();
    if let Err(e) = patch.validate() {
        return domain_error_to_response(e);
    }

    match services.products.update(product_id, &patch).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let product_id = match id.parse::<ProductId>() {
        Ok(id) => id,
        Err(e) => return domain_error_to_response(e),
    };

    match services.products.delete(product_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => catalog_error_to_response(e),
    }
}
