use alloc::{
    boxed::Box,
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};
use tracing::{debug, warn};

use crate::{
    any::Instance,
    errors::ResolveErrorKind,
    injection_point::{InjectionPoint as _, ParameterInjectionPoint},
    marker::Qualifier,
    types::RequiredType,
};

/// Argument lookup context, consulted once per parameter per construction or invocation.
pub trait LookupContext {
    /// Resolves the value to pass for `injection_point`.
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind`] if no value can be supplied
    fn resolve(&self, injection_point: &ParameterInjectionPoint) -> Result<Instance, ResolveErrorKind>;
}

impl<F> LookupContext for F
where
    F: Fn(&ParameterInjectionPoint) -> Result<Instance, ResolveErrorKind>,
{
    #[inline]
    fn resolve(&self, injection_point: &ParameterInjectionPoint) -> Result<Instance, ResolveErrorKind> {
        self(injection_point)
    }
}

type Key = (RequiredType, BTreeSet<Qualifier>);

/// Lookup context matching injection points to instances by exact required type and qualifiers.
///
/// Disposer and observer parameters receive the special payload (the disposed instance or
/// the event) instead.
#[derive(Clone, Default)]
pub struct Context {
    map: Option<Box<BTreeMap<Key, Instance>>>,
    special: Option<Instance>,
}

impl Context {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { map: None, special: None }
    }

    #[inline]
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> Option<Instance> {
        self.insert_qualified(RequiredType::of::<T>(), [], Arc::new(value))
    }

    #[inline]
    pub fn insert_qualified(
        &mut self,
        required_type: RequiredType,
        qualifiers: impl IntoIterator<Item = Qualifier>,
        instance: Instance,
    ) -> Option<Instance> {
        self.map
            .get_or_insert_with(Box::default)
            .insert((required_type, qualifiers.into_iter().collect()), instance)
    }

    #[inline]
    #[must_use]
    pub fn with_special(mut self, instance: Instance) -> Self {
        self.special = Some(instance);
        self
    }
}

impl LookupContext for Context {
    fn resolve(&self, injection_point: &ParameterInjectionPoint) -> Result<Instance, ResolveErrorKind> {
        let found = if injection_point.is_special() {
            self.special.clone()
        } else {
            self.map.as_ref().and_then(|map| {
                map.get(&(injection_point.required_type().clone(), injection_point.qualifiers().clone()))
                    .cloned()
            })
        };

        match found {
            Some(instance) => {
                debug!(injection_point = %injection_point, "Resolved from context");
                Ok(instance)
            }
            None => {
                let err = ResolveErrorKind::Unsatisfied {
                    required_type: injection_point.required_type().clone(),
                };
                warn!("{}", err);
                Err(err)
            }
        }
    }
}
