// Association store seam - persistence of related-product rows.

use async_trait::async_trait;

use crate::entity::{DisplayStatus, Product, ProductId, RelatedProduct};
use crate::error::AppResult;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryAssociationStore;
pub use sqlite::SqliteAssociationStore;

/// Persistence capability consumed by the plugin. One row per
/// (parent product, child product) pair; insertion order is stable.
#[async_trait]
pub trait AssociationStore: Send + Sync + std::fmt::Debug {
    /// All stored rows whose parent is `product_id`, in insertion order.
    async fn find_by_product(&self, product_id: ProductId) -> AppResult<Vec<RelatedProduct>>;

    /// Child products linked to `product_id` whose display status matches,
    /// in insertion order.
    async fn visible_children(
        &self,
        product_id: ProductId,
        status: DisplayStatus,
    ) -> AppResult<Vec<Product>>;

    /// Remove every stored row whose parent is `product_id`; returns the
    /// number of rows removed.
    async fn delete_for_product(&self, product_id: ProductId) -> AppResult<u64>;

    /// Insert one association row and durably commit it. Placeholder slots
    /// are rejected; callers filter them out first.
    async fn insert(&self, assoc: &RelatedProduct) -> AppResult<()>;
}
