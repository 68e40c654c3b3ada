// Entity value types shared with the host shop framework.

use serde::{Deserialize, Serialize};

/// Product id type as assigned by the host framework.
pub type ProductId = i64;

/// Display status of a product on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayStatus {
    Show,
    Hide,
}

impl DisplayStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            DisplayStatus::Show => 1,
            DisplayStatus::Hide => 0,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        if value == 1 {
            DisplayStatus::Show
        } else {
            DisplayStatus::Hide
        }
    }
}

impl Default for DisplayStatus {
    fn default() -> Self {
        DisplayStatus::Hide
    }
}

/// Product entity owned by the host framework; this plugin only reads it.
/// A default-constructed product (id 0) is a transient placeholder that is
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub display_status: DisplayStatus,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, display_status: DisplayStatus) -> Self {
        Self {
            id,
            name: name.into(),
            display_status,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// One directed parent -> child related-product link. A slot with no child
/// product is an empty placeholder awaiting admin input; only slots with a
/// child are ever stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedProduct {
    /// Parent id, stamped eagerly even before the row is persisted.
    pub product_id: ProductId,
    /// Owning parent product.
    pub product: Product,
    /// Linked child product; `None` marks a placeholder slot.
    pub child_product: Option<Product>,
}

impl RelatedProduct {
    /// Empty slot stamped with the parent's identity.
    pub fn placeholder(parent: &Product) -> Self {
        Self {
            product_id: parent.id,
            product: parent.clone(),
            child_product: None,
        }
    }

    pub fn link(parent: &Product, child: Product) -> Self {
        Self {
            product_id: parent.id,
            product: parent.clone(),
            child_product: Some(child),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.child_product.is_none()
    }
}
