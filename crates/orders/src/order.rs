use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use astar_core::{DomainError, OrderId, ProductId, UserId};

/// Order status token.
///
/// The set of statuses is open: the store of record is the source of truth
/// and installations may introduce their own values. Only `paid` carries
/// built-in meaning — it is the finalize-sale status whose arrival triggers
/// the one-time stock decrement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    pub const PENDING: &'static str = "pending";
    pub const PAID: &'static str = "paid";
    pub const CANCELLED: &'static str = "cancelled";

    /// Parse a status token from caller input.
    ///
    /// Tokens are lowercase, non-empty and free of whitespace; beyond that
    /// the value is installation-defined.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::validation("status cannot be empty"));
        }
        if s.chars().any(|c| c.is_whitespace() || c.is_uppercase()) {
            return Err(DomainError::validation(
                "status must be a lowercase token without whitespace",
            ));
        }
        Ok(Self(s.to_string()))
    }

    pub fn pending() -> Self {
        Self(Self::PENDING.to_string())
    }

    pub fn paid() -> Self {
        Self(Self::PAID.to_string())
    }

    pub fn cancelled() -> Self {
        Self(Self::CANCELLED.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the finalize-sale status.
    pub fn is_paid(&self) -> bool {
        self.0 == Self::PAID
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order as stored in the `orders` table: one product, one quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
}

/// Fields required to create an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
}

impl NewOrder {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if self.total_amount < Decimal::ZERO {
            return Err(DomainError::validation("total amount cannot be negative"));
        }
        Ok(())
    }
}
