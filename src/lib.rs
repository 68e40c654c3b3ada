// Related-products plugin - storefront injection and admin product-edit hooks

pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod form;
pub mod hooks;
pub mod persist;
pub mod plugin;
pub mod slots;
pub mod splice;
pub mod store;
pub mod templates;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use plugin::RelatedProductsPlugin;
pub use slots::MAX_RELATED_PRODUCTS;
