use alloc::{collections::BTreeMap, sync::Arc};
use parking_lot::RwLock;
use tracing::debug;

use super::{ComponentStructuralInfo, TypeModel};
use crate::any::TypeInfo;

/// In-memory [`TypeModel`] built from declared [`ComponentStructuralInfo`]s.
///
/// A component may be replaced after registration (e.g. by an extension that makes an
/// abstract component concrete before its first construction). Readers always observe
/// either the old or the new component as a whole.
#[derive(Default)]
pub struct TypeModelRegistry {
    components: RwLock<BTreeMap<TypeInfo, Arc<ComponentStructuralInfo>>>,
}

impl TypeModelRegistry {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: RwLock::new(BTreeMap::new()),
        }
    }

    #[inline]
    #[must_use]
    pub fn register(self, component: ComponentStructuralInfo) -> Self {
        self.insert(component);
        self
    }

    /// Inserts the component, returning the one it replaced.
    pub fn insert(&self, component: ComponentStructuralInfo) -> Option<Arc<ComponentStructuralInfo>> {
        let type_info = component.type_info();
        let replaced = self.components.write().insert(type_info, Arc::new(component));
        if replaced.is_some() {
            debug!(component = type_info.name, "Component replaced");
        } else {
            debug!(component = type_info.name, "Component registered");
        }
        replaced
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, ty: &TypeInfo) -> bool {
        self.components.read().contains_key(ty)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.read().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.read().is_empty()
    }
}

impl TypeModel for TypeModelRegistry {
    #[inline]
    fn component(&self, ty: &TypeInfo) -> Option<Arc<ComponentStructuralInfo>> {
        self.components.read().get(ty).cloned()
    }
}
