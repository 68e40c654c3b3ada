// Demo wiring: runs the admin save and storefront render flows end to end
// against a local sqlite database and the bundled template fragments.

use std::sync::Arc;

use tracing::info;

use related_products::config::Config;
use related_products::entity::{DisplayStatus, Product, RelatedProduct};
use related_products::error::AppResult;
use related_products::event::{ProductEditCompleteEvent, TemplateEvent, PARAM_PRODUCT};
use related_products::form::{StaticForm, RELATED_COLLECTION};
use related_products::hooks::HookAdapter;
use related_products::plugin::RelatedProductsPlugin;
use related_products::splice::{ADMIN_FOOTER_ANCHOR, RELATED_PRODUCT_TAG};
use related_products::store::{AssociationStore, SqliteAssociationStore};
use related_products::templates::FileTemplateLoader;

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let store = Arc::new(SqliteAssociationStore::connect(&config.database.url).await?);

    // Sample catalog so the flows have something to show.
    let parent = Product::new(1, "Classic kettle", DisplayStatus::Show);
    let shown = Product::new(2, "Tea tin", DisplayStatus::Show);
    let hidden = Product::new(3, "Discontinued cosy", DisplayStatus::Hide);
    for product in [&parent, &shown, &hidden] {
        store.upsert_product(product).await?;
    }

    let plugin = RelatedProductsPlugin::new(
        Arc::clone(&store) as Arc<dyn AssociationStore>,
        Arc::new(FileTemplateLoader::new(&config.templates.dir)),
        HookAdapter::Template,
    );

    // Admin saves two links; the remaining slots came back empty.
    let form = StaticForm::new().with(
        RELATED_COLLECTION,
        vec![
            RelatedProduct::link(&parent, shown.clone()),
            RelatedProduct::link(&parent, hidden.clone()),
            RelatedProduct::placeholder(&parent),
        ],
    );
    let complete = ProductEditCompleteEvent {
        product: parent.clone(),
        form: &form,
    };
    plugin.on_admin_product_edit_complete(&complete).await?;

    // Admin editor render: sub-form fragment plus the search modal.
    let mut admin = TemplateEvent::new(format!(
        "<form>product fields</form>{}</div>",
        ADMIN_FOOTER_ANCHOR
    ));
    admin.set_parameter(PARAM_PRODUCT, &parent)?;
    plugin.on_admin_product_edit_render(&mut admin).await?;
    info!("Admin editor page:\n{}", admin.source());

    // Storefront render against a marker-tagged detail page. Only the
    // displayed child shows up.
    let mut detail = TemplateEvent::new(format!(
        "<main>\n{{{{ Product.name }}}}\n{}\n</main>",
        RELATED_PRODUCT_TAG
    ));
    detail.set_parameter(PARAM_PRODUCT, &parent)?;
    plugin.on_product_detail_render(&mut detail).await?;
    info!("Detail page:\n{}", detail.source());

    Ok(())
}
