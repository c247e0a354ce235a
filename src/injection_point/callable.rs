use alloc::{sync::Arc, vec::Vec};
use tracing::{debug, debug_span, error};

use super::{ParameterInjectionPoint, ParameterRole};
use crate::{
    any::{Instance, TypeInfo},
    bean::{self, Bean, BeanRef},
    errors::InstantiatorErrorKind,
    factory::InjectionPointFactory,
    lookup::LookupContext,
    model::{Arguments, Callable as _, ConstructorInfo, MethodInfo},
};

fn resolve_arguments(parameters: &[ParameterInjectionPoint], lookup: &dyn LookupContext) -> Result<Arguments, InstantiatorErrorKind> {
    let mut values = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        match lookup.resolve(parameter) {
            Ok(value) => values.push(value),
            Err(source) => {
                let err = InstantiatorErrorKind::Deps {
                    position: parameter.position(),
                    source,
                };
                error!("{}", err);
                return Err(err);
            }
        }
    }
    Ok(Arguments::new(values))
}

/// Constructor together with the injection points of its parameters, in parameter order.
#[derive(Debug, Clone)]
pub struct ConstructorInjectionPoint {
    constructor: Arc<ConstructorInfo>,
    parameters: Vec<ParameterInjectionPoint>,
    declaring_bean: Option<BeanRef>,
    declaring_component: TypeInfo,
    factory: InjectionPointFactory,
}

impl ConstructorInjectionPoint {
    #[must_use]
    pub(crate) fn new(
        constructor: Arc<ConstructorInfo>,
        parameters: Vec<ParameterInjectionPoint>,
        declaring_bean: Option<&Arc<dyn Bean>>,
        declaring_component: TypeInfo,
        factory: InjectionPointFactory,
    ) -> Self {
        Self {
            constructor,
            parameters,
            declaring_bean: bean::downgrade(declaring_bean),
            declaring_component,
            factory,
        }
    }

    #[inline]
    #[must_use]
    pub fn constructor(&self) -> &Arc<ConstructorInfo> {
        &self.constructor
    }

    #[inline]
    #[must_use]
    pub fn declaring_type(&self) -> TypeInfo {
        self.constructor.declaring_type()
    }

    #[inline]
    #[must_use]
    pub fn declaring_component(&self) -> TypeInfo {
        self.declaring_component
    }

    #[inline]
    #[must_use]
    pub fn declaring_bean(&self) -> Option<Arc<dyn Bean>> {
        self.declaring_bean.as_ref().and_then(BeanRef::upgrade)
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[ParameterInjectionPoint] {
        &self.parameters
    }

    /// Factory the parameter injection points were created with.
    #[inline]
    #[must_use]
    pub fn factory(&self) -> InjectionPointFactory {
        self.factory
    }

    /// Resolves the arguments in parameter order.
    ///
    /// # Errors
    /// Returns [`InstantiatorErrorKind::Deps`] for the first parameter that can't be resolved
    pub fn parameter_values(&self, lookup: &dyn LookupContext) -> Result<Arguments, InstantiatorErrorKind> {
        resolve_arguments(&self.parameters, lookup)
    }

    /// Resolves the arguments and calls the constructor.
    ///
    /// # Errors
    /// - Returns [`InstantiatorErrorKind::Deps`] if an argument can't be resolved
    /// - Returns [`InstantiatorErrorKind::Factory`] if the constructor body fails
    pub fn new_instance(&self, lookup: &dyn LookupContext) -> Result<Instance, InstantiatorErrorKind> {
        let span = debug_span!("new_instance", constructor = %self.constructor.id());
        let _guard = span.enter();

        let arguments = self.parameter_values(lookup)?;
        match self.constructor.invoke(arguments) {
            Ok(instance) => {
                debug!("Constructed");
                Ok(instance)
            }
            Err(err) => {
                error!("{}", err);
                Err(err.into())
            }
        }
    }
}

/// Method together with the injection points of its parameters, in parameter order.
#[derive(Debug, Clone)]
pub struct MethodInjectionPoint {
    method: Arc<MethodInfo>,
    parameters: Vec<ParameterInjectionPoint>,
    declaring_bean: Option<BeanRef>,
    declaring_component: TypeInfo,
    observer_or_disposer: bool,
    factory: InjectionPointFactory,
}

impl MethodInjectionPoint {
    #[must_use]
    pub(crate) fn new(
        method: Arc<MethodInfo>,
        parameters: Vec<ParameterInjectionPoint>,
        declaring_bean: Option<&Arc<dyn Bean>>,
        declaring_component: TypeInfo,
        observer_or_disposer: bool,
        factory: InjectionPointFactory,
    ) -> Self {
        Self {
            method,
            parameters,
            declaring_bean: bean::downgrade(declaring_bean),
            declaring_component,
            observer_or_disposer,
            factory,
        }
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Arc<MethodInfo> {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn declaring_component(&self) -> TypeInfo {
        self.declaring_component
    }

    #[inline]
    #[must_use]
    pub fn declaring_bean(&self) -> Option<Arc<dyn Bean>> {
        self.declaring_bean.as_ref().and_then(BeanRef::upgrade)
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[ParameterInjectionPoint] {
        &self.parameters
    }

    #[inline]
    #[must_use]
    pub fn is_observer_or_disposer(&self) -> bool {
        self.observer_or_disposer
    }

    #[inline]
    #[must_use]
    pub fn factory(&self) -> InjectionPointFactory {
        self.factory
    }

    /// First parameter with the given special role.
    #[must_use]
    pub fn special_parameter(&self, role: ParameterRole) -> Option<&ParameterInjectionPoint> {
        self.parameters.iter().find(|parameter| parameter.role() == role)
    }

    /// Resolves the arguments and calls the method on `receiver` (`None` for static methods).
    ///
    /// # Errors
    /// - Returns [`InstantiatorErrorKind::Factory`] if the receiver doesn't match the method,
    ///   before any argument is looked up
    /// - Returns [`InstantiatorErrorKind::Deps`] if an argument can't be resolved
    /// - Returns [`InstantiatorErrorKind::Factory`] if the method body fails
    pub fn invoke(&self, receiver: Option<&Instance>, lookup: &dyn LookupContext) -> Result<Option<Instance>, InstantiatorErrorKind> {
        let span = debug_span!("invoke", method = %self.method.id());
        let _guard = span.enter();

        if let Err(err) = self.method.check_receiver(receiver) {
            error!("{}", err);
            return Err(err.into());
        }

        let arguments = resolve_arguments(&self.parameters, lookup)?;
        self.method.invoke(receiver, arguments).map_err(|err| {
            error!("{}", err);
            err.into()
        })
    }
}
