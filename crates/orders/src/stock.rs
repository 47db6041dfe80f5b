//! Stock ledger: the narrow write surface over product stock.

use sqlx::{Postgres, Transaction};
use tracing::instrument;

use astar_core::ProductId;

use crate::error::FulfillmentError;

/// Conditional stock decrement, always inside an ambient transaction.
///
/// The accessor never opens its own transaction: every call takes the
/// caller's [`Transaction`] so the decrement commits or rolls back together
/// with whatever order mutation triggered it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockLedger;

impl StockLedger {
    pub fn new() -> Self {
        Self
    }

    /// Decrement `quantity` units of `product_id` if that many are on hand.
    ///
    /// The check and the mutation are a single conditional `UPDATE`, so two
    /// racing decrements for the last unit cannot both succeed: one matches
    /// the `stock >= quantity` predicate, the other affects zero rows. A
    /// zero-row outcome alone cannot distinguish a missing product from an
    /// out-of-stock one, so it is followed by an existence probe to report
    /// the correct error kind.
    #[instrument(skip(self, tx), fields(product_id = product_id.get(), quantity), err)]
    pub async fn decrement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), FulfillmentError> {
        let result = sqlx::query(
            "UPDATE products SET stock = stock - $2 WHERE product_id = $1 AND stock >= $2",
        )
        .bind(product_id.get())
        .bind(quantity)
        .execute(&mut **tx)
        .await
        .map_err(FulfillmentError::Internal)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM products WHERE product_id = $1")
            .bind(product_id.get())
            .fetch_optional(&mut **tx)
            .await
            .map_err(FulfillmentError::Internal)?;

        match exists {
            Some(_) => Err(FulfillmentError::InsufficientStock),
            None => Err(FulfillmentError::ProductNotFound),
        }
    }
}
