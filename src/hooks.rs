// Extension-point names and the versioned hook adapter.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::event::ResponseEvent;

/// Extension points bound on hosts with template hook support.
pub const HOOK_PRODUCT_DETAIL_RENDER: &str = "product.detail.render";
pub const HOOK_ADMIN_PRODUCT_EDIT_INITIALIZE: &str = "admin.product.edit.initialize";
pub const HOOK_ADMIN_PRODUCT_EDIT_RENDER: &str = "admin.product.edit.render";
pub const HOOK_ADMIN_PRODUCT_EDIT_COMPLETE: &str = "admin.product.edit.complete";

/// What the host runtime supports, probed once at startup.
#[derive(Debug, Clone, Copy)]
pub struct HostCapabilities {
    /// Hosts at or past the template hook threshold dispatch render events
    /// with source and parameter accessors; older hosts only offer the
    /// response filter.
    pub template_hooks: bool,
}

/// Black-box renderer covering hosts that predate template hook points.
/// Its behavior is owned by the compatibility layer, not specified here.
#[async_trait]
pub trait LegacyRenderer: Send + Sync + std::fmt::Debug {
    async fn render_product_detail(&self, event: &mut ResponseEvent) -> AppResult<()>;
    async fn render_admin_product_edit(&self, event: &mut ResponseEvent) -> AppResult<()>;
}

/// Which hook style the plugin runs with. Selected once at construction;
/// handlers never re-probe the host per call.
#[derive(Debug, Clone)]
pub enum HookAdapter {
    Template,
    Legacy(Arc<dyn LegacyRenderer>),
}

impl HookAdapter {
    pub fn select(capabilities: HostCapabilities, legacy: Arc<dyn LegacyRenderer>) -> Self {
        if capabilities.template_hooks {
            HookAdapter::Template
        } else {
            HookAdapter::Legacy(legacy)
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, HookAdapter::Template)
    }
}
