use alloc::sync::{Arc, Weak};

use crate::any::TypeInfo;

/// Bean owning injection points. Defined by the component-definition pipeline, the factory
/// only keeps a weak reference to it.
pub trait Bean: Send + Sync {
    fn bean_class(&self) -> TypeInfo;

    fn name(&self) -> Option<&str> {
        None
    }
}

pub type BeanRef = Weak<dyn Bean>;

#[inline]
#[must_use]
pub(crate) fn downgrade(bean: Option<&Arc<dyn Bean>>) -> Option<BeanRef> {
    bean.map(Arc::downgrade)
}
