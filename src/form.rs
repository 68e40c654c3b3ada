// Form-builder seam for the admin product editor.

use std::collections::HashMap;

use crate::entity::RelatedProduct;
use crate::error::{AppError, AppResult};

/// Name of the repeatable sub-form field this plugin attaches.
pub const RELATED_COLLECTION: &str = "related_collection";

/// Options for a repeatable collection field, mirroring what the host form
/// framework understands.
#[derive(Debug, Clone)]
pub struct CollectionField {
    pub label: String,
    /// Form type rendered for each entry of the collection.
    pub entry_type: String,
    pub allow_add: bool,
    pub allow_delete: bool,
    pub prototype: bool,
    /// Collections this plugin owns are never mapped onto the product entity.
    pub mapped: bool,
}

impl CollectionField {
    /// The related-products sub-form: add/remove allowed, unmapped.
    pub fn related_products() -> Self {
        Self {
            label: "Related products".to_string(),
            entry_type: "admin_related_product".to_string(),
            allow_add: true,
            allow_delete: true,
            prototype: true,
            mapped: false,
        }
    }
}

/// Host capability for attaching fields to the product edit form.
pub trait FormBuilder: Send {
    fn add_collection(&mut self, name: &str, field: CollectionField) -> AppResult<()>;
    fn set_collection_data(&mut self, name: &str, data: Vec<RelatedProduct>) -> AppResult<()>;
}

/// Host capability for reading a submitted form back.
pub trait SubmittedForm: Send + Sync {
    fn collection_data(&self, name: &str) -> AppResult<Vec<RelatedProduct>>;
}

/// In-memory form builder used by tests and the demo wiring.
#[derive(Debug, Default)]
pub struct RecordingFormBuilder {
    pub fields: Vec<(String, CollectionField)>,
    pub data: HashMap<String, Vec<RelatedProduct>>,
}

impl RecordingFormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &str) -> Option<&CollectionField> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, field)| field)
    }
}

impl FormBuilder for RecordingFormBuilder {
    fn add_collection(&mut self, name: &str, field: CollectionField) -> AppResult<()> {
        if self.field(name).is_some() {
            return Err(AppError::Form(format!("Field {} already attached", name)));
        }
        self.fields.push((name.to_string(), field));
        Ok(())
    }

    fn set_collection_data(&mut self, name: &str, data: Vec<RelatedProduct>) -> AppResult<()> {
        if self.field(name).is_none() {
            return Err(AppError::Form(format!("Field {} not attached", name)));
        }
        self.data.insert(name.to_string(), data);
        Ok(())
    }
}

/// Pre-filled submitted form for tests and the demo wiring.
#[derive(Debug, Default)]
pub struct StaticForm {
    collections: HashMap<String, Vec<RelatedProduct>>,
}

impl StaticForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, data: Vec<RelatedProduct>) -> Self {
        self.collections.insert(name.to_string(), data);
        self
    }
}

impl SubmittedForm for StaticForm {
    fn collection_data(&self, name: &str) -> AppResult<Vec<RelatedProduct>> {
        self.collections
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::Form(format!("Field {} not submitted", name)))
    }
}
