// Association slot list - fixed-size editor rows for the admin sub-form.

use std::sync::Arc;

use crate::entity::{Product, RelatedProduct};
use crate::error::AppResult;
use crate::store::AssociationStore;

/// Maximum number of related products per parent; the admin editor always
/// shows exactly this many rows.
pub const MAX_RELATED_PRODUCTS: usize = 5;

/// Builds the fixed-size slot list backing the admin sub-form: stored rows
/// first, padded with empty placeholders.
#[derive(Debug, Clone)]
pub struct AssociationListBuilder {
    store: Arc<dyn AssociationStore>,
}

impl AssociationListBuilder {
    pub fn new(store: Arc<dyn AssociationStore>) -> Self {
        Self { store }
    }

    /// Returns exactly `MAX_RELATED_PRODUCTS` slots. Stored rows come first
    /// in insertion order, truncated if the store somehow holds more than the
    /// maximum; the remainder is placeholder slots stamped with the parent.
    /// With no product a transient placeholder parent (id 0) owns the slots.
    pub async fn build(&self, product: Option<&Product>) -> AppResult<Vec<RelatedProduct>> {
        let transient;
        let (parent, mut slots) = match product {
            Some(product) => (product, self.store.find_by_product(product.id).await?),
            None => {
                transient = Product::default();
                (&transient, Vec::new())
            }
        };

        slots.truncate(MAX_RELATED_PRODUCTS);
        while slots.len() < MAX_RELATED_PRODUCTS {
            slots.push(RelatedProduct::placeholder(parent));
        }
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::DisplayStatus;
    use crate::store::MemoryAssociationStore;

    fn product(id: i64) -> Product {
        Product::new(id, format!("product-{}", id), DisplayStatus::Show)
    }

    async fn store_with_links(parent: &Product, children: &[i64]) -> Arc<MemoryAssociationStore> {
        let store = Arc::new(MemoryAssociationStore::new());
        for id in children {
            store
                .insert(&RelatedProduct::link(parent, product(*id)))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn pads_existing_rows_up_to_maximum() {
        let parent = product(1);
        let store = store_with_links(&parent, &[10, 11]).await;
        let builder = AssociationListBuilder::new(store);

        let slots = builder.build(Some(&parent)).await.unwrap();
        assert_eq!(slots.len(), MAX_RELATED_PRODUCTS);
        assert_eq!(slots[0].child_product.as_ref().unwrap().id, 10);
        assert_eq!(slots[1].child_product.as_ref().unwrap().id, 11);
        for slot in &slots[2..] {
            assert!(slot.is_placeholder());
            assert_eq!(slot.product_id, parent.id);
            assert_eq!(slot.product, parent);
        }
    }

    #[tokio::test]
    async fn full_list_gets_no_padding() {
        let parent = product(1);
        let store = store_with_links(&parent, &[10, 11, 12, 13, 14]).await;
        let builder = AssociationListBuilder::new(store);

        let slots = builder.build(Some(&parent)).await.unwrap();
        assert_eq!(slots.len(), MAX_RELATED_PRODUCTS);
        assert!(slots.iter().all(|slot| !slot.is_placeholder()));
    }

    #[tokio::test]
    async fn overfull_store_is_truncated_to_maximum() {
        let parent = product(1);
        let store = store_with_links(&parent, &[10, 11, 12, 13, 14, 15, 16]).await;
        let builder = AssociationListBuilder::new(store);

        let slots = builder.build(Some(&parent)).await.unwrap();
        assert_eq!(slots.len(), MAX_RELATED_PRODUCTS);
        assert_eq!(slots[4].child_product.as_ref().unwrap().id, 14);
    }

    #[tokio::test]
    async fn missing_product_yields_placeholder_slots_on_transient_parent() {
        let store = Arc::new(MemoryAssociationStore::new());
        let builder = AssociationListBuilder::new(store);

        let slots = builder.build(None).await.unwrap();
        assert_eq!(slots.len(), MAX_RELATED_PRODUCTS);
        for slot in &slots {
            assert!(slot.is_placeholder());
            assert_eq!(slot.product_id, 0);
            assert!(!slot.product.is_persisted());
        }
    }
}
