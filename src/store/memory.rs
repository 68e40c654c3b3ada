use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entity::{DisplayStatus, Product, ProductId, RelatedProduct};
use crate::error::{AppError, AppResult};
use crate::store::AssociationStore;

/// In-memory store used by tests and the demo wiring. Rows keep insertion
/// order, matching the sqlite implementation's rowid ordering.
#[derive(Debug, Default)]
pub struct MemoryAssociationStore {
    rows: RwLock<Vec<RelatedProduct>>,
}

impl MemoryAssociationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssociationStore for MemoryAssociationStore {
    async fn find_by_product(&self, product_id: ProductId) -> AppResult<Vec<RelatedProduct>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn visible_children(
        &self,
        product_id: ProductId,
        status: DisplayStatus,
    ) -> AppResult<Vec<Product>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.product_id == product_id)
            .filter_map(|row| row.child_product.clone())
            .filter(|child| child.display_status == status)
            .collect())
    }

    async fn delete_for_product(&self, product_id: ProductId) -> AppResult<u64> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.product_id != product_id);
        Ok((before - rows.len()) as u64)
    }

    async fn insert(&self, assoc: &RelatedProduct) -> AppResult<()> {
        if assoc.is_placeholder() {
            return Err(AppError::Validation(
                "Placeholder slot cannot be persisted".to_string(),
            ));
        }
        let mut rows = self.rows.write().await;
        rows.push(assoc.clone());
        Ok(())
    }
}
