// Template loading seam - named fragment resources served by the host.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Storefront fragment rendered on the product detail page.
pub const FRONT_RELATED_PRODUCT: &str = "front/related_product.twig";

/// Admin fragment holding the related-products sub-form rows.
pub const ADMIN_RELATED_PRODUCT: &str = "admin/related_product.twig";

/// Product search modal appended to the admin editor.
pub const ADMIN_MODAL: &str = "admin/modal.twig";

/// Host capability returning raw template source for a named resource.
pub trait TemplateLoader: Send + Sync + std::fmt::Debug {
    fn source(&self, name: &str) -> AppResult<String>;
}

/// Loader reading fragments from a directory on disk.
#[derive(Debug)]
pub struct FileTemplateLoader {
    root: PathBuf,
}

impl FileTemplateLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateLoader for FileTemplateLoader {
    fn source(&self, name: &str) -> AppResult<String> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path).map_err(|e| {
            AppError::Template(format!("Failed to load template {}: {}", path.display(), e))
        })
    }
}

/// Fixed in-memory loader used by tests and the demo wiring.
#[derive(Debug, Default)]
pub struct StaticTemplateLoader {
    sources: HashMap<String, String>,
}

impl StaticTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, source: &str) -> Self {
        self.sources.insert(name.to_string(), source.to_string());
        self
    }
}

impl TemplateLoader for StaticTemplateLoader {
    fn source(&self, name: &str) -> AppResult<String> {
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::Template(format!("Unknown template resource: {}", name)))
    }
}
