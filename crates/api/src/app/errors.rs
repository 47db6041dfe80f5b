//! Error-to-HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use astar_catalog::CatalogError;
use astar_core::DomainError;
use astar_orders::{FulfillmentError, OrderStoreError};

/// Uniform JSON error body: `{"error": {"code", "message"}}`.
pub fn json_error(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": { "code": code, "message": message }
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(_) | DomainError::InvalidId(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_request", &err.to_string())
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn catalog_error_to_response(err: CatalogError) -> Response {
    match err {
        CatalogError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "product_not_found", "product not found")
        }
        CatalogError::Database(e) => {
            tracing::error!(error = %e, "catalog store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", "internal error")
        }
    }
}

pub fn order_store_error_to_response(err: OrderStoreError) -> Response {
    match err {
        OrderStoreError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "order_not_found", "order not found")
        }
        OrderStoreError::Database(e) => {
            tracing::error!(error = %e, "order store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", "internal error")
        }
    }
}

/// Outcome mapping for the status transition engine: every distinguishable
/// failure gets its own status code, so callers can tell a business
/// rejection (409) from a missing resource (404) or a storage fault (500).
pub fn fulfillment_error_to_response(err: FulfillmentError) -> Response {
    match err {
        FulfillmentError::OrderNotFound => {
            json_error(StatusCode::NOT_FOUND, "order_not_found", "order not found")
        }
        FulfillmentError::ProductNotFound => {
            json_error(StatusCode::NOT_FOUND, "product_not_found", "product not found")
        }
        FulfillmentError::InsufficientStock => json_error(
            StatusCode::CONFLICT,
            "insufficient_stock",
            "not enough stock to fulfill this order",
        ),
        FulfillmentError::Internal(e) => {
            tracing::error!(error = %e, "fulfillment storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", "internal error")
        }
    }
}
