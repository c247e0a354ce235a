//! Immutable injection point descriptors.
//!
//! Descriptors are created by [`crate::InjectionPointFactory`] only. Their identity is the
//! member they originate from: two descriptors of the same field (or of the same parameter)
//! are equal even if an extension replaced the required type or qualifiers of one of them.

mod callable;
mod field;
mod parameter;

use alloc::{collections::BTreeSet, sync::Arc};

pub use callable::{ConstructorInjectionPoint, MethodInjectionPoint};
pub use field::FieldInjectionPoint;
pub use parameter::{ParameterInjectionPoint, ParameterRole};

use crate::{
    any::TypeInfo,
    bean::{Bean, BeanRef},
    marker::Qualifier,
    types::RequiredType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    ConstructorParameter,
    MethodParameter,
}

#[derive(Debug, Clone)]
pub struct InjectionPointAttributes {
    required_type: RequiredType,
    qualifiers: BTreeSet<Qualifier>,
    declaring_component: TypeInfo,
    declaring_bean: Option<BeanRef>,
    delegate: bool,
}

impl InjectionPointAttributes {
    #[inline]
    #[must_use]
    pub(crate) const fn new(
        required_type: RequiredType,
        qualifiers: BTreeSet<Qualifier>,
        declaring_component: TypeInfo,
        declaring_bean: Option<BeanRef>,
        delegate: bool,
    ) -> Self {
        Self {
            required_type,
            qualifiers,
            declaring_component,
            declaring_bean,
            delegate,
        }
    }
}

pub trait InjectionPoint {
    fn attributes(&self) -> &InjectionPointAttributes;

    fn member_kind(&self) -> MemberKind;

    fn is_transient(&self) -> bool {
        false
    }

    #[inline]
    fn required_type(&self) -> &RequiredType {
        &self.attributes().required_type
    }

    #[inline]
    fn qualifiers(&self) -> &BTreeSet<Qualifier> {
        &self.attributes().qualifiers
    }

    /// Component the injection point's type variables are resolved against.
    #[inline]
    fn declaring_component(&self) -> TypeInfo {
        self.attributes().declaring_component
    }

    /// Owning bean, `None` if the point isn't owned by a bean or the bean was already dropped.
    #[inline]
    fn declaring_bean(&self) -> Option<Arc<dyn Bean>> {
        self.attributes().declaring_bean.as_ref().and_then(BeanRef::upgrade)
    }

    #[inline]
    fn has_declaring_bean(&self) -> bool {
        self.attributes().declaring_bean.is_some()
    }

    #[inline]
    fn is_delegate(&self) -> bool {
        self.attributes().delegate
    }
}

/// Replacement API used by extension observers. The origin member never changes.
macro_rules! impl_replacement {
    ($ty:ty) => {
        impl $ty {
            #[inline]
            #[must_use]
            pub fn with_required_type(mut self, required_type: $crate::types::RequiredType) -> Self {
                self.attributes.required_type = required_type;
                self
            }

            #[inline]
            #[must_use]
            pub fn with_qualifiers(mut self, qualifiers: impl IntoIterator<Item = $crate::marker::Qualifier>) -> Self {
                self.attributes.qualifiers = qualifiers.into_iter().collect();
                self
            }

            #[inline]
            #[must_use]
            pub fn with_delegate(mut self, delegate: bool) -> Self {
                self.attributes.delegate = delegate;
                self
            }
        }
    };
}

impl_replacement!(FieldInjectionPoint);
impl_replacement!(ParameterInjectionPoint);
