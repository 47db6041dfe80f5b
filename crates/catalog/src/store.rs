//! Postgres-backed product store.
//!
//! Plain row-level CRUD over the `products` table. Stock is read here but
//! never decremented here; the fulfillment engine owns that write path.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use astar_core::ProductId;

use crate::product::{NewProduct, Product, ProductPatch};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read/write surface over the `products` table.
///
/// Holds a cloned handle to the shared connection pool; cheap to clone and
/// safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct ProductStore {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    product_id: i32,
    product_name: String,
    category: String,
    description: String,
    unit_price: rust_decimal::Decimal,
    image_url: String,
    stock: i32,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            category: row.category,
            description: row.description,
            unit_price: row.unit_price,
            image_url: row.image_url,
            stock: row.stock,
            created_at: row.created_at,
        }
    }
}

const PRODUCT_COLUMNS: &str =
    "product_id, product_name, category, description, unit_price, image_url, stock, created_at";

impl ProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Public storefront listing: only products with stock on hand.
    #[instrument(skip(self), err)]
    pub async fn list_available(&self) -> Result<Vec<Product>, CatalogError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE stock > 0 ORDER BY product_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Admin listing: every product, including out-of-stock ones.
    #[instrument(skip(self), err)]
    pub async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY product_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self), fields(product_id = product_id.get()), err)]
    pub async fn get(&self, product_id: ProductId) -> Result<Option<Product>, CatalogError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1"
        ))
        .bind(product_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    #[instrument(skip(self, product), err)]
    pub async fn create(&self, product: &NewProduct) -> Result<ProductId, CatalogError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO products (product_name, category, description, unit_price, image_url, stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING product_id
            "#,
        )
        .bind(&product.product_name)
        .bind(&product.category)
        .bind(&product.description)
        .bind(product.unit_price)
        .bind(&product.image_url)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(ProductId::new(id))
    }

    #[instrument(skip(self, patch), fields(product_id = product_id.get()), err)]
    pub async fn update(
        &self,
        product_id: ProductId,
        patch: &ProductPatch,
    ) -> Result<(), CatalogError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET product_name = $2,
                category = $3,
                description = $4,
                unit_price = $5,
                image_url = $6,
                stock = $7
            WHERE product_id = $1
            "#,
        )
        .bind(product_id.get())
        .bind(&patch.product_name)
        .bind(&patch.category)
        .bind(&patch.description)
        .bind(patch.unit_price)
        .bind(&patch.image_url)
        .bind(patch.stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = product_id.get()), err)]
    pub async fn delete(&self, product_id: ProductId) -> Result<(), CatalogError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id.get())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn widget(stock: i32) -> NewProduct {
        NewProduct {
            product_name: "Widget".to_string(),
            category: "tools".to_string(),
            description: "A widget".to_string(),
            unit_price: Decimal::new(1250, 2),
            image_url: String::new(),
            stock,
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn create_then_get_round_trips(pool: PgPool) {
        let store = ProductStore::new(pool);

        let id = store.create(&widget(5)).await.unwrap();
        let found = store.get(id).await.unwrap().expect("product should exist");

        assert_eq!(found.product_id, id);
        assert_eq!(found.product_name, "Widget");
        assert_eq!(found.unit_price, Decimal::new(1250, 2));
        assert_eq!(found.stock, 5);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn public_listing_excludes_out_of_stock(pool: PgPool) {
        let store = ProductStore::new(pool);

        let in_stock = store.create(&widget(3)).await.unwrap();
        let sold_out = store.create(&widget(0)).await.unwrap();

        let available = store.list_available().await.unwrap();
        assert!(available.iter().any(|p| p.product_id == in_stock));
        assert!(!available.iter().any(|p| p.product_id == sold_out));

        let all = store.list_all().await.unwrap();
        assert!(all.iter().any(|p| p.product_id == sold_out));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn update_replaces_all_fields(pool: PgPool) {
        let store = ProductStore::new(pool);
        let id = store.create(&widget(5)).await.unwrap();

        let patch = ProductPatch {
            product_name: "Widget Mk2".to_string(),
            category: "tools".to_string(),
            description: "Improved".to_string(),
            unit_price: Decimal::new(1500, 2),
            image_url: "https://example.com/w2.png".to_string(),
            stock: 8,
        };
        store.update(id, &patch).await.unwrap();

        let found = store.get(id).await.unwrap().unwrap();
        assert_eq!(found.product_name, "Widget Mk2");
        assert_eq!(found.stock, 8);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn update_and_delete_report_missing_rows(pool: PgPool) {
        let store = ProductStore::new(pool);
        let ghost = ProductId::new(4242);

        let err = store.update(ghost, &ProductPatch {
            product_name: "x".to_string(),
            category: String::new(),
            description: String::new(),
            unit_price: Decimal::ZERO,
            image_url: String::new(),
            stock: 0,
        })
        .await
        .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));

        let err = store.delete(ghost).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn delete_removes_the_row(pool: PgPool) {
        let store = ProductStore::new(pool);
        let id = store.create(&widget(1)).await.unwrap();

        store.delete(id).await.unwrap();
        assert!(store.get(id).await.unwrap().is_none());
    }
}
