//! `astar-orders` — orders: model, store, and the fulfillment core.
//!
//! The fulfillment core is the one piece of this system with a real
//! correctness contract: transitioning an order's status and, when the sale
//! becomes final, decrementing product stock as a single atomic unit.

pub mod error;
pub mod fulfillment;
pub mod order;
pub mod stock;
pub mod store;

pub use error::{FulfillmentError, OrderStoreError};
pub use fulfillment::FulfillmentEngine;
pub use order::{NewOrder, Order, OrderStatus};
pub use stock::StockLedger;
pub use store::OrderStore;
