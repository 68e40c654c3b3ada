// Sqlite store tests against an on-disk temporary database.

use std::sync::Arc;

use tempfile::TempDir;

use related_products::entity::{DisplayStatus, Product, RelatedProduct};
use related_products::persist::AssociationPersister;
use related_products::slots::{AssociationListBuilder, MAX_RELATED_PRODUCTS};
use related_products::store::{AssociationStore, SqliteAssociationStore};

async fn open_store(dir: &TempDir) -> SqliteAssociationStore {
    let url = format!("sqlite://{}", dir.path().join("shop.db").display());
    SqliteAssociationStore::connect(&url).await.unwrap()
}

async fn seed_catalog(store: &SqliteAssociationStore) -> (Product, Product, Product) {
    let parent = Product::new(1, "Kettle", DisplayStatus::Show);
    let shown = Product::new(2, "Tea tin", DisplayStatus::Show);
    let hidden = Product::new(3, "Old cosy", DisplayStatus::Hide);
    for product in [&parent, &shown, &hidden] {
        store.upsert_product(product).await.unwrap();
    }
    (parent, shown, hidden)
}

#[tokio::test]
async fn insert_and_find_rehydrate_product_rows() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let (parent, shown, hidden) = seed_catalog(&store).await;

    store
        .insert(&RelatedProduct::link(&parent, shown.clone()))
        .await
        .unwrap();
    store
        .insert(&RelatedProduct::link(&parent, hidden.clone()))
        .await
        .unwrap();

    let rows = store.find_by_product(parent.id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].product.name, "Kettle");
    assert_eq!(rows[0].child_product.as_ref().unwrap().name, "Tea tin");
    assert_eq!(rows[1].child_product.as_ref().unwrap().id, hidden.id);
}

#[tokio::test]
async fn visible_children_filter_by_display_status() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let (parent, shown, hidden) = seed_catalog(&store).await;

    store
        .insert(&RelatedProduct::link(&parent, hidden))
        .await
        .unwrap();
    store
        .insert(&RelatedProduct::link(&parent, shown.clone()))
        .await
        .unwrap();

    let children = store
        .visible_children(parent.id, DisplayStatus::Show)
        .await
        .unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0], shown);
}

#[tokio::test]
async fn placeholder_slot_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let (parent, _, _) = seed_catalog(&store).await;

    let err = store
        .insert(&RelatedProduct::placeholder(&parent))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Placeholder"));
}

#[tokio::test]
async fn delete_for_product_wipes_only_that_parent() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let (parent, shown, hidden) = seed_catalog(&store).await;
    let other = Product::new(9, "Mug", DisplayStatus::Show);
    store.upsert_product(&other).await.unwrap();

    store
        .insert(&RelatedProduct::link(&parent, shown.clone()))
        .await
        .unwrap();
    store
        .insert(&RelatedProduct::link(&parent, hidden))
        .await
        .unwrap();
    store
        .insert(&RelatedProduct::link(&other, shown))
        .await
        .unwrap();

    let removed = store.delete_for_product(parent.id).await.unwrap();
    assert_eq!(removed, 2);
    assert!(store.find_by_product(parent.id).await.unwrap().is_empty());
    assert_eq!(store.find_by_product(other.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn persister_full_replace_round_trips_through_slot_builder() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open_store(&dir).await);
    let (parent, shown, hidden) = seed_catalog(&store).await;

    let persister = AssociationPersister::new(Arc::clone(&store) as Arc<dyn AssociationStore>);
    let builder = AssociationListBuilder::new(Arc::clone(&store) as Arc<dyn AssociationStore>);

    persister
        .commit(
            &parent,
            vec![
                RelatedProduct::link(&parent, shown.clone()),
                RelatedProduct::placeholder(&parent),
                RelatedProduct::link(&parent, hidden.clone()),
            ],
        )
        .await
        .unwrap();

    let slots = builder.build(Some(&parent)).await.unwrap();
    assert_eq!(slots.len(), MAX_RELATED_PRODUCTS);
    assert_eq!(slots[0].child_product.as_ref().unwrap().id, shown.id);
    assert_eq!(slots[1].child_product.as_ref().unwrap().id, hidden.id);
    assert!(slots[2..].iter().all(|slot| slot.is_placeholder()));

    // Second save drops the first set entirely.
    persister
        .commit(&parent, vec![RelatedProduct::link(&parent, hidden.clone())])
        .await
        .unwrap();
    let slots = builder.build(Some(&parent)).await.unwrap();
    assert_eq!(slots[0].child_product.as_ref().unwrap().id, hidden.id);
    assert!(slots[1..].iter().all(|slot| slot.is_placeholder()));
}
