use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::entity::{DisplayStatus, Product, ProductId, RelatedProduct};
use crate::error::{AppError, AppResult};
use crate::store::AssociationStore;

/// SQLite-backed association store. The `products` table belongs to the host
/// shop; it is created here only so the plugin can run against an empty
/// database in tests and the demo.
#[derive(Debug)]
pub struct SqliteAssociationStore {
    pool: SqlitePool,
}

impl SqliteAssociationStore {
    pub async fn connect(url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::DatabaseError(format!("Invalid database url {}: {}", url, e)))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect to {}: {}", url, e)))?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    pub async fn initialize(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                display_status INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create products table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS related_products (
                product_id INTEGER NOT NULL,
                child_product_id INTEGER NOT NULL,
                PRIMARY KEY (product_id, child_product_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to create related_products table: {}", e))
        })?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_related_products_parent ON related_products(product_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to create related_products index: {}", e))
        })?;

        Ok(())
    }

    /// Host-side helper: write a product row so the store can be exercised
    /// without the rest of the shop schema.
    pub async fn upsert_product(&self, product: &Product) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, display_status) VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                display_status = excluded.display_status
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.display_status.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to upsert product {}: {}", product.id, e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl AssociationStore for SqliteAssociationStore {
    async fn find_by_product(&self, product_id: ProductId) -> AppResult<Vec<RelatedProduct>> {
        let rows = sqlx::query(
            r#"
            SELECT r.product_id, r.child_product_id,
                   p.name AS parent_name, p.display_status AS parent_status,
                   c.name AS child_name, c.display_status AS child_status
            FROM related_products r
            LEFT JOIN products p ON p.id = r.product_id
            LEFT JOIN products c ON c.id = r.child_product_id
            WHERE r.product_id = ?
            ORDER BY r.rowid
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!(
                "Failed to load related products of {}: {}",
                product_id, e
            ))
        })?;

        let mut associations = Vec::with_capacity(rows.len());
        for row in rows {
            let parent = Product {
                id: row.get("product_id"),
                name: row.get::<Option<String>, _>("parent_name").unwrap_or_default(),
                display_status: row
                    .get::<Option<i64>, _>("parent_status")
                    .map(DisplayStatus::from_i64)
                    .unwrap_or_default(),
            };
            let child = Product {
                id: row.get("child_product_id"),
                name: row.get::<Option<String>, _>("child_name").unwrap_or_default(),
                display_status: row
                    .get::<Option<i64>, _>("child_status")
                    .map(DisplayStatus::from_i64)
                    .unwrap_or_default(),
            };
            associations.push(RelatedProduct {
                product_id: parent.id,
                product: parent,
                child_product: Some(child),
            });
        }
        Ok(associations)
    }

    async fn visible_children(
        &self,
        product_id: ProductId,
        status: DisplayStatus,
    ) -> AppResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, c.display_status
            FROM related_products r
            JOIN products c ON c.id = r.child_product_id
            WHERE r.product_id = ? AND c.display_status = ?
            ORDER BY r.rowid
            "#,
        )
        .bind(product_id)
        .bind(status.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!(
                "Failed to load visible children of {}: {}",
                product_id, e
            ))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| Product {
                id: row.get("id"),
                name: row.get("name"),
                display_status: DisplayStatus::from_i64(row.get("display_status")),
            })
            .collect())
    }

    async fn delete_for_product(&self, product_id: ProductId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM related_products WHERE product_id = ?")
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!(
                    "Failed to delete related products of {}: {}",
                    product_id, e
                ))
            })?;
        Ok(result.rows_affected())
    }

    async fn insert(&self, assoc: &RelatedProduct) -> AppResult<()> {
        let child = assoc.child_product.as_ref().ok_or_else(|| {
            AppError::Validation("Placeholder slot cannot be persisted".to_string())
        })?;
        sqlx::query("INSERT INTO related_products (product_id, child_product_id) VALUES (?, ?)")
            .bind(assoc.product_id)
            .bind(child.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!(
                    "Failed to insert related product {} -> {}: {}",
                    assoc.product_id, child.id, e
                ))
            })?;
        Ok(())
    }
}
