// Event handlers wired to the host's product detail and admin edit pages.

use std::sync::Arc;

use tracing::{debug, info};

use crate::entity::{DisplayStatus, Product};
use crate::error::AppResult;
use crate::event::{
    ProductEditCompleteEvent, ProductEditInitEvent, ResponseEvent, TemplateEvent, PARAM_PRODUCT,
    PARAM_RELATED_PRODUCTS,
};
use crate::form::{CollectionField, RELATED_COLLECTION};
use crate::hooks::HookAdapter;
use crate::persist::AssociationPersister;
use crate::slots::AssociationListBuilder;
use crate::splice::{splice_admin, splice_storefront};
use crate::store::AssociationStore;
use crate::templates::{TemplateLoader, ADMIN_MODAL, ADMIN_RELATED_PRODUCT, FRONT_RELATED_PRODUCT};

/// The related-products plugin. All collaborators are injected at
/// construction; handlers are request-scoped and hold no state of their own.
#[derive(Debug)]
pub struct RelatedProductsPlugin {
    store: Arc<dyn AssociationStore>,
    templates: Arc<dyn TemplateLoader>,
    slots: AssociationListBuilder,
    persister: AssociationPersister,
    adapter: HookAdapter,
}

impl RelatedProductsPlugin {
    pub fn new(
        store: Arc<dyn AssociationStore>,
        templates: Arc<dyn TemplateLoader>,
        adapter: HookAdapter,
    ) -> Self {
        let slots = AssociationListBuilder::new(Arc::clone(&store));
        let persister = AssociationPersister::new(Arc::clone(&store));
        Self {
            store,
            templates,
            slots,
            persister,
            adapter,
        }
    }

    /// Storefront: inject the related-products section into the product
    /// detail page. Without a product, or without any visible related
    /// products, the page is left untouched.
    pub async fn on_product_detail_render(&self, event: &mut TemplateEvent) -> AppResult<()> {
        info!("on_product_detail_render start");
        let product = match event.parameter::<Product>(PARAM_PRODUCT) {
            Some(product) => product,
            None => {
                debug!("Product missing, nothing to render");
                return Ok(());
            }
        };

        let related = self
            .store
            .visible_children(product.id, DisplayStatus::Show)
            .await?;
        if related.is_empty() {
            debug!(product_id = product.id, "No related products to render");
            return Ok(());
        }

        let fragment = self.templates.source(FRONT_RELATED_PRODUCT)?;
        let rewritten = splice_storefront(event.source(), &fragment);
        event.set_source(rewritten);
        event.set_parameter(PARAM_RELATED_PRODUCTS, &related)?;
        info!(
            product_id = product.id,
            count = related.len(),
            "on_product_detail_render finish"
        );
        Ok(())
    }

    /// Admin: attach the related-products sub-form and seed it with the
    /// fixed-size slot list.
    pub async fn on_admin_product_edit_init(
        &self,
        event: &mut ProductEditInitEvent<'_>,
    ) -> AppResult<()> {
        info!("on_admin_product_edit_init start");
        let slots = self.slots.build(event.product.as_ref()).await?;
        event
            .builder
            .add_collection(RELATED_COLLECTION, CollectionField::related_products())?;
        event.builder.set_collection_data(RELATED_COLLECTION, slots)?;
        info!("on_admin_product_edit_init finish");
        Ok(())
    }

    /// Admin: splice the sub-form fragment into the editor page and append
    /// the product search modal.
    pub async fn on_admin_product_edit_render(&self, event: &mut TemplateEvent) -> AppResult<()> {
        info!("on_admin_product_edit_render start");
        let product = event.parameter::<Product>(PARAM_PRODUCT);
        let slots = self.slots.build(product.as_ref()).await?;

        let fragment = self.templates.source(ADMIN_RELATED_PRODUCT)?;
        let modal = self.templates.source(ADMIN_MODAL)?;
        let rewritten = splice_admin(event.source(), &fragment, &modal);
        event.set_source(rewritten);
        event.set_parameter(PARAM_RELATED_PRODUCTS, &slots)?;
        info!("on_admin_product_edit_render finish");
        Ok(())
    }

    /// Admin: persist the submitted slots with a full replace.
    pub async fn on_admin_product_edit_complete(
        &self,
        event: &ProductEditCompleteEvent<'_>,
    ) -> AppResult<()> {
        info!(product_id = event.product.id, "on_admin_product_edit_complete start");
        let slots = event.form.collection_data(RELATED_COLLECTION)?;
        self.persister.commit(&event.product, slots).await?;
        info!(product_id = event.product.id, "on_admin_product_edit_complete finish");
        Ok(())
    }

    /// Response-filter variant kept for hosts without template hooks; a no-op
    /// when the template adapter was selected at startup.
    #[deprecated(note = "hosts with template hooks dispatch on_product_detail_render directly")]
    pub async fn on_product_detail_response(&self, event: &mut ResponseEvent) -> AppResult<()> {
        match &self.adapter {
            HookAdapter::Template => Ok(()),
            HookAdapter::Legacy(renderer) => renderer.render_product_detail(event).await,
        }
    }

    /// Response-filter variant kept for hosts without template hooks; a no-op
    /// when the template adapter was selected at startup.
    #[deprecated(note = "hosts with template hooks dispatch on_admin_product_edit_render directly")]
    pub async fn on_admin_product_edit_response(&self, event: &mut ResponseEvent) -> AppResult<()> {
        match &self.adapter {
            HookAdapter::Template => Ok(()),
            HookAdapter::Legacy(renderer) => renderer.render_admin_product_edit(event).await,
        }
    }
}
