use alloc::sync::Arc;
use core::{
    any::Any,
    fmt::{self, Debug, Formatter},
};
use tracing::{debug, debug_span, error, warn};

use crate::{
    any::{Instance, TypeInfo},
    bean::Bean,
    errors::{DefinitionErrorKind, InstantiatorErrorKind},
    factory::InjectionPointFactory,
    injection_point::ConstructorInjectionPoint,
    lookup::LookupContext,
    manager::Manager,
    model::TypeModel,
};

/// Constructs instances of a component.
pub trait Instantiator: Send + Sync {
    /// # Errors
    /// Returns [`InstantiatorErrorKind`] if the instance can't be constructed
    fn new_instance(&self, lookup: &dyn LookupContext) -> Result<Instance, InstantiatorErrorKind>;

    fn has_interceptor_support(&self) -> bool;

    fn has_decorator_support(&self) -> bool;
}

/// Instantiator calling the bean constructor of a component, without interception and decoration.
///
/// The instantiator is immutable after creation and can be shared between threads.
pub struct DefaultInstantiator {
    component: TypeInfo,
    constructor: ConstructorInjectionPoint,
    model: Arc<dyn TypeModel>,
}

impl DefaultInstantiator {
    /// Creates an instantiator for `ty`.
    ///
    /// Abstract types are accepted with a warning, an extension may still make them concrete
    /// before the first construction.
    ///
    /// # Errors
    /// - Returns [`DefinitionErrorKind::UnknownType`] if the type model doesn't know `ty`
    /// - Returns [`DefinitionErrorKind::InstantiatorForInterface`] if `ty` is an interface
    /// - Returns [`DefinitionErrorKind`] if the bean constructor can't be selected or described
    pub fn new(
        ty: TypeInfo,
        declaring_bean: Option<&Arc<dyn Bean>>,
        factory: InjectionPointFactory,
        manager: &Manager,
    ) -> Result<Self, DefinitionErrorKind> {
        let span = debug_span!("new_instantiator", component = %ty, silent = factory.is_silent());
        let _guard = span.enter();

        let model = manager.model();
        if model.component(&ty).is_none() {
            let err = DefinitionErrorKind::UnknownType { component: ty };
            error!("{}", err);
            return Err(err);
        }
        if model.is_interface(&ty) {
            let err = DefinitionErrorKind::InstantiatorForInterface { component: ty };
            error!("{}", err);
            return Err(err);
        }
        if model.is_abstract(&ty) {
            warn!("Instantiator created for an abstract type {}", ty);
        }

        let constructor = factory.create_constructor_injection_point_for_type(declaring_bean, ty, manager)?;

        debug!("Instantiator created");
        Ok(Self {
            component: ty,
            constructor,
            model: manager.shared_model(),
        })
    }

    #[inline]
    #[must_use]
    pub fn constructor(&self) -> &ConstructorInjectionPoint {
        &self.constructor
    }

    /// Constructs an instance and downcasts it to `T`.
    ///
    /// # Errors
    /// - Returns [`InstantiatorErrorKind::IncorrectType`] if the instance isn't a `T`
    /// - Returns [`InstantiatorErrorKind`] if the instance can't be constructed
    pub fn new_instance_of<T: Send + Sync + 'static>(&self, lookup: &dyn LookupContext) -> Result<Arc<T>, InstantiatorErrorKind> {
        let instance = self.new_instance(lookup)?;
        let actual = (*instance).type_id();
        instance.downcast::<T>().map_err(|_| {
            let err = InstantiatorErrorKind::IncorrectType {
                expected: TypeInfo::of::<T>(),
                actual,
            };
            error!("{}", err);
            err
        })
    }
}

impl Instantiator for DefaultInstantiator {
    fn new_instance(&self, lookup: &dyn LookupContext) -> Result<Instance, InstantiatorErrorKind> {
        if self.model.is_abstract(&self.component) {
            let err = DefinitionErrorKind::AbstractInstantiation { component: self.component };
            error!("{}", err);
            return Err(err.into());
        }

        self.constructor.new_instance(lookup)
    }

    #[inline]
    fn has_interceptor_support(&self) -> bool {
        false
    }

    #[inline]
    fn has_decorator_support(&self) -> bool {
        false
    }
}

impl Debug for DefaultInstantiator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultInstantiator")
            .field("component", &self.component)
            .field("constructor", &self.constructor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::{
        format,
        string::{String, ToString as _},
        sync::Arc,
    };
    use tracing_test::traced_test;

    use super::{DefaultInstantiator, Instantiator as _};
    use crate::{
        any::{Instance, TypeInfo},
        errors::{DefinitionErrorKind, InstantiatorErrorKind, ResolveErrorKind},
        factory::InjectionPointFactory,
        hooks::ObserverChain,
        injection_point::ParameterInjectionPoint,
        lookup::Context,
        manager::Manager,
        model::{ComponentKind, ComponentStructuralInfo, ConstructorInfo, Declaration, TypeModelRegistry},
        services::Services,
        types::RequiredType,
    };

    struct Repository;
    struct Handler;

    struct Service {
        repository: Arc<Repository>,
    }

    fn manager() -> Manager {
        Manager::without_hooks(
            TypeModelRegistry::new()
                .register(ComponentStructuralInfo::class::<Service>().constructor(
                    ConstructorInfo::new("new", |arguments| {
                        Ok(Service {
                            repository: arguments.get::<Repository>(0)?,
                        })
                    })
                    .parameter(Declaration::of::<Repository>()),
                ))
                .register(ComponentStructuralInfo::interface::<Handler>()),
            Services::new(),
        )
    }

    #[test]
    #[traced_test]
    fn test_new_instance() {
        let manager = manager();
        let instantiator = DefaultInstantiator::new(TypeInfo::of::<Service>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();

        let repository = Arc::new(Repository);
        let mut context = Context::new();
        context.insert_qualified(RequiredType::of::<Repository>(), [], repository.clone());

        let service = instantiator.new_instance_of::<Service>(&context).unwrap();

        assert!(Arc::ptr_eq(&service.repository, &repository));
        assert!(!instantiator.has_interceptor_support());
        assert!(!instantiator.has_decorator_support());
        assert!(logs_contain("Constructed"));
    }

    #[test]
    fn test_new_instance_with_closure_lookup() {
        let manager = manager();
        let instantiator = DefaultInstantiator::new(TypeInfo::of::<Service>(), None, InjectionPointFactory::SILENT, &manager).unwrap();

        let lookup = |_: &ParameterInjectionPoint| -> Result<Instance, ResolveErrorKind> { Ok(Arc::new(Repository)) };

        assert!(instantiator.new_instance(&lookup).is_ok());
        assert!(matches!(
            instantiator.new_instance_of::<Repository>(&lookup),
            Err(InstantiatorErrorKind::IncorrectType { .. })
        ));
    }

    #[test]
    #[traced_test]
    fn test_unresolved_argument() {
        let manager = manager();
        let instantiator = DefaultInstantiator::new(TypeInfo::of::<Service>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();

        let result = instantiator.new_instance(&Context::new());

        assert!(matches!(
            result,
            Err(InstantiatorErrorKind::Deps {
                position: 0,
                source: ResolveErrorKind::Unsatisfied { .. }
            })
        ));
        assert!(logs_contain("Argument 0 can't be resolved"));
    }

    #[test]
    #[traced_test]
    fn test_interface() {
        let manager = manager();

        let result = DefaultInstantiator::new(TypeInfo::of::<Handler>(), None, InjectionPointFactory::NORMAL, &manager);

        assert!(matches!(result, Err(DefinitionErrorKind::InstantiatorForInterface { .. })));
        assert!(logs_contain("interface type"));
    }

    struct Template;

    fn template(kind: ComponentKind) -> ComponentStructuralInfo {
        ComponentStructuralInfo::class::<Template>()
            .with_kind(kind)
            .constructor(ConstructorInfo::new("default", |_| Ok(Template)))
    }

    #[test]
    #[traced_test]
    fn test_abstract_type() {
        let registry = Arc::new(TypeModelRegistry::new().register(template(ComponentKind::Abstract)));
        let manager = Manager::from_shared(registry.clone(), Arc::new(Services::new()), Arc::new(ObserverChain::new()));

        let instantiator = DefaultInstantiator::new(TypeInfo::of::<Template>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();

        logs_assert(|lines: &[&str]| {
            match lines.iter().filter(|line| line.contains("WARN")).count() {
                1 => Ok(()),
                count => Err(format!("expected exactly one warning, got {count}")),
            }
        });
        assert!(matches!(
            instantiator.new_instance(&Context::new()),
            Err(InstantiatorErrorKind::Definition(DefinitionErrorKind::AbstractInstantiation { .. }))
        ));

        registry.insert(template(ComponentKind::Class));

        assert!(instantiator.new_instance_of::<Template>(&Context::new()).is_ok());
    }
}
