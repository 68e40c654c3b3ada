// Event objects dispatched to the plugin by the host's extension points.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::entity::Product;
use crate::error::{AppError, AppResult};
use crate::form::{FormBuilder, SubmittedForm};

/// Parameter key under which the host exposes the page's product.
pub const PARAM_PRODUCT: &str = "Product";

/// Parameter key under which this plugin publishes the association list.
pub const PARAM_RELATED_PRODUCTS: &str = "RelatedProducts";

/// Render event carrying the template source about to be compiled and the
/// parameter map handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct TemplateEvent {
    source: String,
    parameters: HashMap<String, Value>,
}

impl TemplateEvent {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            parameters: HashMap::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn set_source(&mut self, source: String) {
        self.source = source;
    }

    pub fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    /// Typed read of one parameter. Absent, null, or shape-mismatched values
    /// all come back as `None`.
    pub fn parameter<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.parameters
            .get(name)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn set_parameter<T: Serialize>(&mut self, name: &str, value: &T) -> AppResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| AppError::Validation(format!("Failed to encode parameter {}: {}", name, e)))?;
        self.parameters.insert(name.to_string(), value);
        Ok(())
    }
}

/// Admin product-edit form construction event.
pub struct ProductEditInitEvent<'a> {
    /// `None` when the admin is creating a brand-new product.
    pub product: Option<Product>,
    pub builder: &'a mut dyn FormBuilder,
}

/// Admin product-edit submission event.
pub struct ProductEditCompleteEvent<'a> {
    pub product: Product,
    pub form: &'a dyn SubmittedForm,
}

/// Response-filter event used by hosts that predate template hook points.
#[derive(Debug, Clone, Default)]
pub struct ResponseEvent {
    body: String,
}

impl ResponseEvent {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: String) {
        self.body = body;
    }
}
