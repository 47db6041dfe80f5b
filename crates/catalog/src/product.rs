use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use astar_core::{DomainError, ProductId};

/// Catalog product as stored in the `products` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub unit_price: Decimal,
    pub image_url: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub unit_price: Decimal,
    pub image_url: String,
    pub stock: i32,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.product_name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        if self.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        Ok(())
    }
}

/// Full-row replacement used by the admin update endpoint.
///
/// The admin surface always sends every field, so this is a patch in name
/// only; partial updates are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPatch {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub unit_price: Decimal,
    pub image_url: String,
    pub stock: i32,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.product_name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        if self.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        Ok(())
    }
}
