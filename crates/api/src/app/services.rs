use sqlx::PgPool;

use astar_catalog::ProductStore;
use astar_orders::{FulfillmentEngine, OrderStore};

/// Handles shared by every request handler.
///
/// Each member clones the same pool; construction is cheap and there is no
/// shared mutable state beyond the pool itself.
pub struct AppServices {
    pub products: ProductStore,
    pub orders: OrderStore,
    pub fulfillment: FulfillmentEngine,
}

impl AppServices {
    pub fn new(pool: PgPool) -> Self {
        Self {
            products: ProductStore::new(pool.clone()),
            orders: OrderStore::new(pool.clone()),
            fulfillment: FulfillmentEngine::new(pool),
        }
    }
}
