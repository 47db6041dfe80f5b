//! Order status transition engine.
//!
//! Owns the atomic state change of a single order plus its side effect on
//! inventory. The status update and the stock decrement commit or roll back
//! as one unit; a transition to any status other than the finalize value
//! never touches stock.

use sqlx::PgPool;
use tracing::instrument;

use astar_core::{OrderId, ProductId};

use crate::error::FulfillmentError;
use crate::order::OrderStatus;
use crate::stock::StockLedger;

/// The order status transition engine.
///
/// Concurrency correctness is pushed onto the store: the order row is read
/// under `FOR UPDATE`, so two transitions on the same order serialize at the
/// row lock, and the stock side effect uses the ledger's conditional
/// decrement so racing sales can never drive stock negative.
#[derive(Debug, Clone)]
pub struct FulfillmentEngine {
    pool: PgPool,
    ledger: StockLedger,
}

impl FulfillmentEngine {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            ledger: StockLedger::new(),
        }
    }

    /// Set `order_id` to `new_status`, decrementing stock when the sale
    /// becomes final.
    ///
    /// Transitioning an already-`paid` order to `paid` again is a no-op that
    /// succeeds without re-touching stock: the prior status is read in the
    /// same transaction, under the row lock, so a retried commit cannot
    /// double-decrement.
    #[instrument(
        skip(self),
        fields(order_id = order_id.get(), status = %new_status),
        err
    )]
    pub async fn transition_status(
        &self,
        order_id: OrderId,
        new_status: &OrderStatus,
    ) -> Result<(), FulfillmentError> {
        let mut tx = self.pool.begin().await.map_err(FulfillmentError::Internal)?;

        // Fresh read under a row lock: concurrent status writers observe
        // up-to-date order contents, and the prior status guards the
        // finalize side effect against re-runs.
        let row: Option<(String, i32, i32)> = sqlx::query_as(
            "SELECT status, product_id, quantity FROM orders WHERE order_id = $1 FOR UPDATE",
        )
        .bind(order_id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(FulfillmentError::Internal)?;

        let Some((prior_status, product_id, quantity)) = row else {
            tx.rollback().await.map_err(FulfillmentError::Internal)?;
            return Err(FulfillmentError::OrderNotFound);
        };

        sqlx::query("UPDATE orders SET status = $2 WHERE order_id = $1")
            .bind(order_id.get())
            .bind(new_status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(FulfillmentError::Internal)?;

        if new_status.is_paid() && prior_status != OrderStatus::PAID {
            if let Err(e) = self
                .ledger
                .decrement(&mut tx, ProductId::new(product_id), quantity)
                .await
            {
                // The status update from above rolls back with the
                // transaction: an order must not end up paid when stock
                // could not be reserved.
                tx.rollback().await.map_err(FulfillmentError::Internal)?;
                return Err(e);
            }
        }

        tx.commit().await.map_err(FulfillmentError::Internal)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    async fn seed_user(pool: &PgPool) -> Uuid {
        let user_id = Uuid::now_v7();
        sqlx::query("INSERT INTO users (user_id, email, role) VALUES ($1, $2, 'customer')")
            .bind(user_id)
            .bind(format!("{user_id}@example.com"))
            .execute(pool)
            .await
            .unwrap();
        user_id
    }

    async fn seed_product(pool: &PgPool, product_id: i32, stock: i32) {
        sqlx::query(
            r#"
            INSERT INTO products (product_id, product_name, category, description, unit_price, image_url, stock)
            VALUES ($1, 'Widget', 'tools', '', 9.99, '', $2)
            "#,
        )
        .bind(product_id)
        .bind(stock)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn seed_order(pool: &PgPool, order_id: i32, user_id: Uuid, product_id: i32, quantity: i32) {
        sqlx::query(
            r#"
            INSERT INTO orders (order_id, user_id, product_id, quantity, total_amount, status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            "#,
        )
        .bind(order_id)
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(Decimal::new(2997, 2))
        .execute(pool)
        .await
        .unwrap();
    }

    async fn stock_of(pool: &PgPool, product_id: i32) -> i32 {
        sqlx::query_scalar("SELECT stock FROM products WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn status_of(pool: &PgPool, order_id: i32) -> String {
        sqlx::query_scalar("SELECT status FROM orders WHERE order_id = $1")
            .bind(order_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn paid_transition_decrements_stock_and_marks_order(pool: PgPool) {
        let user = seed_user(&pool).await;
        seed_product(&pool, 5, 3).await;
        seed_order(&pool, 10, user, 5, 3).await;

        let engine = FulfillmentEngine::new(pool.clone());
        engine
            .transition_status(OrderId::new(10), &OrderStatus::paid())
            .await
            .unwrap();

        assert_eq!(status_of(&pool, 10).await, "paid");
        assert_eq!(stock_of(&pool, 5).await, 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn repeating_paid_transition_is_a_noop(pool: PgPool) {
        let user = seed_user(&pool).await;
        seed_product(&pool, 5, 3).await;
        seed_order(&pool, 10, user, 5, 3).await;

        let engine = FulfillmentEngine::new(pool.clone());
        let paid = OrderStatus::paid();
        engine.transition_status(OrderId::new(10), &paid).await.unwrap();

        // Stock is now 0 and quantity is 3; a naive re-run of the decrement
        // would fail. The prior-status guard skips it instead.
        engine.transition_status(OrderId::new(10), &paid).await.unwrap();

        assert_eq!(status_of(&pool, 10).await, "paid");
        assert_eq!(stock_of(&pool, 5).await, 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn non_finalize_transitions_never_touch_stock(pool: PgPool) {
        let user = seed_user(&pool).await;
        seed_product(&pool, 1, 7).await;
        seed_order(&pool, 1, user, 1, 2).await;

        let engine = FulfillmentEngine::new(pool.clone());
        engine
            .transition_status(OrderId::new(1), &OrderStatus::cancelled())
            .await
            .unwrap();
        engine
            .transition_status(OrderId::new(1), &OrderStatus::parse("shipped").unwrap())
            .await
            .unwrap();

        assert_eq!(status_of(&pool, 1).await, "shipped");
        assert_eq!(stock_of(&pool, 1).await, 7);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn insufficient_stock_rolls_back_the_status_update(pool: PgPool) {
        let user = seed_user(&pool).await;
        seed_product(&pool, 1, 1).await;
        seed_order(&pool, 1, user, 1, 2).await;

        let engine = FulfillmentEngine::new(pool.clone());
        let err = engine
            .transition_status(OrderId::new(1), &OrderStatus::paid())
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::InsufficientStock));

        // Both the order and the stock are untouched.
        assert_eq!(status_of(&pool, 1).await, "pending");
        assert_eq!(stock_of(&pool, 1).await, 1);

        // Rejection is idempotent: repeating it leaves the same state.
        let err = engine
            .transition_status(OrderId::new(1), &OrderStatus::paid())
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::InsufficientStock));
        assert_eq!(status_of(&pool, 1).await, "pending");
        assert_eq!(stock_of(&pool, 1).await, 1);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn missing_order_reports_order_not_found(pool: PgPool) {
        let engine = FulfillmentEngine::new(pool);
        let err = engine
            .transition_status(OrderId::new(404), &OrderStatus::paid())
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::OrderNotFound));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn deleted_product_reports_product_not_found(pool: PgPool) {
        let user = seed_user(&pool).await;
        // Order 11 references product 99, which does not exist.
        seed_order(&pool, 11, user, 99, 1).await;

        let engine = FulfillmentEngine::new(pool.clone());
        let err = engine
            .transition_status(OrderId::new(11), &OrderStatus::paid())
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::ProductNotFound));

        assert_eq!(status_of(&pool, 11).await, "pending");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn racing_paid_transitions_never_oversell(pool: PgPool) {
        let user = seed_user(&pool).await;
        // Three orders of 2 units each race for 3 units of stock: exactly
        // one can fit.
        seed_product(&pool, 1, 3).await;
        for order_id in 1..=3 {
            seed_order(&pool, order_id, user, 1, 2).await;
        }

        let engine = FulfillmentEngine::new(pool.clone());
        let paid = OrderStatus::paid();
        let (r1, r2, r3) = tokio::join!(
            engine.transition_status(OrderId::new(1), &paid),
            engine.transition_status(OrderId::new(2), &paid),
            engine.transition_status(OrderId::new(3), &paid),
        );

        let results = [r1, r2, r3];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "only one order of 2 fits within 3 units");
        for r in &results {
            if let Err(e) = r {
                assert!(matches!(e, FulfillmentError::InsufficientStock));
            }
        }

        let final_stock = stock_of(&pool, 1).await;
        assert_eq!(final_stock, 1);
        assert!(final_stock >= 0, "stock must never go negative");
    }
}
