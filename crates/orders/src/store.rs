//! Postgres-backed order store: creation and admin listings.
//!
//! Status mutation does not live here; that is the fulfillment engine's job.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use astar_core::{OrderId, ProductId, UserId};

use crate::error::OrderStoreError;
use crate::order::{NewOrder, Order, OrderStatus};

/// Read/write surface over the `orders` table.
#[derive(Debug, Clone)]
pub struct OrderStore {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: i32,
    user_id: Uuid,
    product_id: i32,
    quantity: i32,
    total_amount: Decimal,
    status: String,
    order_date: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            order_id: OrderId::new(row.order_id),
            user_id: UserId::from_uuid(row.user_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            total_amount: row.total_amount,
            // Stored statuses are trusted as-is; the store of record is the
            // source of truth for the token set.
            status: OrderStatus::parse(&row.status).unwrap_or_else(|_| OrderStatus::pending()),
            order_date: row.order_date,
        }
    }
}

const ORDER_COLUMNS: &str =
    "order_id, user_id, product_id, quantity, total_amount, status, order_date";

impl OrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self, order), err)]
    pub async fn create(&self, order: &NewOrder) -> Result<OrderId, OrderStoreError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (user_id, product_id, quantity, total_amount, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING order_id
            "#,
        )
        .bind(order.user_id.as_uuid())
        .bind(order.product_id.get())
        .bind(order.quantity)
        .bind(order.total_amount)
        .bind(order.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(OrderId::new(id))
    }

    #[instrument(skip(self), fields(order_id = order_id.get()), err)]
    pub async fn get(&self, order_id: OrderId) -> Result<Option<Order>, OrderStoreError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1"
        ))
        .bind(order_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Order::from))
    }

    /// List orders newest-first, optionally filtered by status (the admin
    /// pending-orders screen passes `pending`).
    #[instrument(skip(self), err)]
    pub async fn list(&self, status: Option<&OrderStatus>) -> Result<Vec<Order>, OrderStoreError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY order_date DESC, order_id DESC
            "#
        ))
        .bind(status.map(OrderStatus::as_str))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}
