//! Admin order routes, including the status transition endpoint.

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use astar_core::OrderId;
use astar_orders::OrderStatus;

use crate::app::dto::{CreateOrderRequest, UpdateOrderStatusRequest};
use crate::app::errors::{
    domain_error_to_response, fulfillment_error_to_response, order_store_error_to_response,
};
use crate::app::services::AppServices;
use crate::context::AdminContext;

pub fn admin_router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id/status", axum::routing::put(update_order_status))
}

#[derive(Debug, Deserialize)]
struct ListOrdersQuery {
    status: Option<String>,
}

async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ListOrdersQuery>,
) -> Response {
    let status = match query.status.as_deref() {
        Some(s) => match OrderStatus::parse(s) {
            Ok(status) => Some(status),
            Err(e) => return domain_error_to_response(e),
        },
        None => None,
    };

    match services.orders.list(status.as_ref()).await {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => order_store_error_to_response(e),
    }
}

async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreateOrderRequest>,
) -> Response {
    let order = match body.into_new_order() {
        Ok(order) => order,
        Err(e) => return domain_error_to_response(e),
    };
    if let Err(e) = order.validate() {
        return domain_error_to_response(e);
    }

    match services.orders.create(&order).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "order_id": id.get() })),
        )
            .into_response(),
        Err(e) => order_store_error_to_response(e),
    }
}

/// The core operation: transition an order's status, decrementing stock
/// atomically when the sale becomes final.
async fn update_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<String>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Response {
    let order_id = match id.parse::<OrderId>() {
        Ok(id) => id,
        Err(e) => return domain_error_to_response(e),
    };
    let status = match OrderStatus::parse(&body.status) {
        Ok(status) => status,
        Err(e) => return domain_error_to_response(e),
    };

    tracing::info!(
        admin = %admin.user_id(),
        order_id = order_id.get(),
        status = %status,
        "admin status transition requested"
    );

    match services.fulfillment.transition_status(order_id, &status).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "order_id": order_id.get(), "status": status })),
        )
            .into_response(),
        Err(e) => fulfillment_error_to_response(e),
    }
}
