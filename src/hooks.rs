use alloc::{sync::Arc, vec::Vec};
use tracing::{debug, debug_span, error};

use crate::{
    errors::DefinitionErrorKind,
    injection_point::{FieldInjectionPoint, ParameterInjectionPoint},
};

/// Extension observer of injection point creation.
///
/// An observer may return a replacement built with the `with_*` methods of the descriptor.
/// An error aborts the creation call and surfaces as [`DefinitionErrorKind::Extension`].
pub trait InjectionPointObserver: Send + Sync {
    /// # Errors
    /// Returns an error to reject the injection point
    fn observe_field(&self, injection_point: FieldInjectionPoint) -> anyhow::Result<FieldInjectionPoint> {
        Ok(injection_point)
    }

    /// # Errors
    /// Returns an error to reject the injection point
    fn observe_parameter(&self, injection_point: ParameterInjectionPoint) -> anyhow::Result<ParameterInjectionPoint> {
        Ok(injection_point)
    }
}

/// Dispatcher of injection point events to extensions.
pub trait ExtensionHooks: Send + Sync {
    /// # Errors
    /// Returns [`DefinitionErrorKind`] if an extension rejected the injection point
    fn fire_field(&self, injection_point: FieldInjectionPoint) -> Result<FieldInjectionPoint, DefinitionErrorKind>;

    /// # Errors
    /// Returns [`DefinitionErrorKind`] if an extension rejected the injection point
    fn fire_parameter(&self, injection_point: ParameterInjectionPoint) -> Result<ParameterInjectionPoint, DefinitionErrorKind>;
}

/// Observers in registration order. Each observer receives the previous observer's result.
#[derive(Clone, Default)]
pub struct ObserverChain {
    observers: Vec<Arc<dyn InjectionPointObserver>>,
}

impl ObserverChain {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { observers: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn with_observer(mut self, observer: impl InjectionPointObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    fn fold<T>(
        &self,
        injection_point: T,
        observe: impl Fn(&dyn InjectionPointObserver, T) -> anyhow::Result<T>,
    ) -> Result<T, DefinitionErrorKind> {
        self.observers
            .iter()
            .try_fold(injection_point, |injection_point, observer| observe(&**observer, injection_point))
            .map_err(|err| {
                error!("Extension rejected injection point: {}", err);
                DefinitionErrorKind::Extension(err)
            })
    }
}

impl ExtensionHooks for ObserverChain {
    fn fire_field(&self, injection_point: FieldInjectionPoint) -> Result<FieldInjectionPoint, DefinitionErrorKind> {
        let span = debug_span!("fire_field", field = %injection_point.id());
        let _guard = span.enter();

        let injection_point = self.fold(injection_point, |observer, injection_point| observer.observe_field(injection_point))?;
        debug!(observers = self.observers.len(), "Dispatched");
        Ok(injection_point)
    }

    fn fire_parameter(&self, injection_point: ParameterInjectionPoint) -> Result<ParameterInjectionPoint, DefinitionErrorKind> {
        let span = debug_span!("fire_parameter", parameter = %injection_point.id());
        let _guard = span.enter();

        let injection_point = self.fold(injection_point, |observer, injection_point| {
            observer.observe_parameter(injection_point)
        })?;
        debug!(observers = self.observers.len(), "Dispatched");
        Ok(injection_point)
    }
}
