//! Request payloads for the admin surface.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use astar_catalog::{NewProduct, ProductPatch};
use astar_core::{DomainError, ProductId, UserId};
use astar_orders::{NewOrder, OrderStatus};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub product_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub image_url: String,
    pub stock: i32,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            product_name: self.product_name,
            category: self.category,
            description: self.description,
            unit_price: self.unit_price,
            image_url: self.image_url,
            stock: self.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub product_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub image_url: String,
    pub stock: i32,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            product_name: self.product_name,
            category: self.category,
            description: self.description,
            unit_price: self.unit_price,
            image_url: self.image_url,
            stock: self.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: Uuid,
    pub product_id: i32,
    pub quantity: i32,
    pub total_amount: Decimal,
    /// Defaults to `pending` when absent.
    pub status: Option<String>,
}

impl CreateOrderRequest {
    pub fn into_new_order(self) -> Result<NewOrder, DomainError> {
        let status = match self.status.as_deref() {
            Some(s) => OrderStatus::parse(s)?,
            None => OrderStatus::pending(),
        };
        Ok(NewOrder {
            user_id: UserId::from_uuid(self.user_id),
            product_id: ProductId::new(self.product_id),
            quantity: self.quantity,
            total_amount: self.total_amount,
            status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}
