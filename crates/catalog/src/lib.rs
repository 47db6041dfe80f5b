//! `astar-catalog` — product catalog: model and Postgres-backed store.

pub mod product;
pub mod store;

pub use product::{NewProduct, Product, ProductPatch};
pub use store::{CatalogError, ProductStore};
