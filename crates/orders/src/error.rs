//! Error taxonomy for the order path.

use thiserror::Error;

/// Failure kinds of the fulfillment core.
///
/// Every kind is distinguishable so the transport layer can render the right
/// status code and message; no failure is ever reported as a bare generic
/// error. All failure paths roll back the transaction before returning.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// No row matches the order id. Not retryable without caller correction.
    #[error("order not found")]
    OrderNotFound,

    /// The referenced product row is gone. Implies referential inconsistency
    /// and needs operator attention.
    #[error("product not found")]
    ProductNotFound,

    /// Valid business rejection: the decrement would drive stock negative.
    /// The caller may retry later; stock and status are untouched.
    #[error("insufficient stock")]
    InsufficientStock,

    /// Transaction, commit or connectivity failure. The outcome is unknown
    /// to the caller; the whole transition is safe to retry from the top.
    #[error("storage failure: {0}")]
    Internal(#[source] sqlx::Error),
}

/// Failure kinds of plain order persistence (create/list/get).
#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("order not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
