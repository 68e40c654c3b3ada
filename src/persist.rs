// Full-replace persistence of the submitted association slots.

use std::sync::Arc;

use tracing::{debug, info};

use crate::entity::{Product, RelatedProduct};
use crate::error::AppResult;
use crate::store::AssociationStore;

/// Writes the admin's submitted slot list back to the store.
#[derive(Debug, Clone)]
pub struct AssociationPersister {
    store: Arc<dyn AssociationStore>,
}

impl AssociationPersister {
    pub fn new(store: Arc<dyn AssociationStore>) -> Self {
        Self { store }
    }

    /// Full replace: every stored row for the parent is removed first, then
    /// each non-empty submitted slot is stamped with the parent and written
    /// as its own committed row, in submission order. Placeholder slots are
    /// skipped. A failure mid-loop leaves the rows written so far in place.
    pub async fn commit(&self, parent: &Product, slots: Vec<RelatedProduct>) -> AppResult<()> {
        let removed = self.store.delete_for_product(parent.id).await?;
        debug!(
            product_id = parent.id,
            removed, "Cleared stored related products"
        );

        for mut slot in slots {
            let child_id = match slot.child_product.as_ref() {
                Some(child) => child.id,
                None => continue,
            };
            slot.product_id = parent.id;
            slot.product = parent.clone();
            self.store.insert(&slot).await?;
            info!(
                product_id = parent.id,
                child_id, "Stored related product row"
            );
        }
        Ok(())
    }
}
