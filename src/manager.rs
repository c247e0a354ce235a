use alloc::sync::Arc;

use crate::{
    hooks::{ExtensionHooks, ObserverChain},
    model::TypeModel,
    services::CapabilityRegistry,
};

/// Collaborators every injection point operation consults.
#[derive(Clone)]
pub struct Manager {
    model: Arc<dyn TypeModel>,
    services: Arc<dyn CapabilityRegistry>,
    hooks: Arc<dyn ExtensionHooks>,
}

impl Manager {
    #[inline]
    #[must_use]
    pub fn new(
        model: impl TypeModel + 'static,
        services: impl CapabilityRegistry + 'static,
        hooks: impl ExtensionHooks + 'static,
    ) -> Self {
        Self::from_shared(Arc::new(model), Arc::new(services), Arc::new(hooks))
    }

    /// Manager over collaborators shared with other owners, e.g. a registry that is still
    /// being filled in.
    #[inline]
    #[must_use]
    pub fn from_shared(model: Arc<dyn TypeModel>, services: Arc<dyn CapabilityRegistry>, hooks: Arc<dyn ExtensionHooks>) -> Self {
        Self { model, services, hooks }
    }

    /// Manager without extensions.
    #[inline]
    #[must_use]
    pub fn without_hooks(model: impl TypeModel + 'static, services: impl CapabilityRegistry + 'static) -> Self {
        Self::new(model, services, ObserverChain::new())
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> &dyn TypeModel {
        self.model.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn services(&self) -> &dyn CapabilityRegistry {
        self.services.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn hooks(&self) -> &dyn ExtensionHooks {
        self.hooks.as_ref()
    }

    #[inline]
    #[must_use]
    pub(crate) fn shared_model(&self) -> Arc<dyn TypeModel> {
        self.model.clone()
    }
}
