use needle::{
    model::{ComponentKind, ComponentStructuralInfo, ConstructorInfo, Declaration, MethodInfo, TypeModel as _, TypeModelRegistry},
    Context, DefaultInstantiator, DefinitionErrorKind, InjectionPoint as _, InjectionPointFactory, Instance, InstantiateErrorKind,
    Instantiator as _, InstantiatorErrorKind, Manager, Named, ObserverChain, ParameterInjectionPoint, Qualifier, RequiredType,
    ResolveErrorKind, Services, TypeInfo,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

struct Config {
    url: &'static str,
}

struct Pool {
    config: Arc<Config>,
    size: Arc<usize>,
}

struct Cache;
struct Storage;
struct Failing;
struct Shape;
struct Square;

fn registry() -> TypeModelRegistry {
    TypeModelRegistry::new()
        .register(
            ComponentStructuralInfo::class::<Pool>()
                .constructor(
                    ConstructorInfo::new("new", |arguments| {
                        Ok(Pool {
                            config: arguments.get(0)?,
                            size: arguments.get(1)?,
                        })
                    })
                    .parameter(Declaration::of::<Config>())
                    .parameter(Declaration::of::<usize>().qualified(Qualifier::with_value::<Named>("size")))
                    .marked::<needle::Inject>(),
                )
                .method(
                    MethodInfo::new(TypeInfo::of::<Pool>(), "resize", |receiver, arguments| {
                        let pool = receiver
                            .cloned()
                            .ok_or(InstantiateErrorKind::MissingArgument { position: 0 })?
                            .downcast::<Pool>()
                            .map_err(|_| InstantiateErrorKind::Custom(anyhow::anyhow!("receiver isn't a pool")))?;
                        let extra = arguments.get::<usize>(0)?;
                        Ok(Some(Arc::new(*pool.size + *extra) as Instance))
                    })
                    .parameter(Declaration::of::<usize>()),
                )
                .method(
                    MethodInfo::new(TypeInfo::of::<Pool>(), "default_size", |_, arguments| {
                        let floor = arguments.get::<usize>(0)?;
                        Ok(Some(Arc::new(16usize.max(*floor)) as Instance))
                    })
                    .parameter(Declaration::of::<usize>())
                    .as_static(),
                ),
        )
        .register(ComponentStructuralInfo::abstract_class::<Cache>().constructor(ConstructorInfo::new("default", |_| Ok(Cache))))
        .register(ComponentStructuralInfo::interface::<Storage>())
        .register(ComponentStructuralInfo::abstract_class::<Shape>().constructor(ConstructorInfo::new("default", |_| Ok(Square))))
        .register(
            ComponentStructuralInfo::class::<Failing>().constructor(ConstructorInfo::new("default", |_| {
                Err::<Failing, _>(InstantiateErrorKind::Custom(anyhow::anyhow!("connection refused")))
            })),
        )
}

fn context() -> Context {
    let mut context = Context::new();
    context.insert(Config { url: "postgres://localhost" });
    context.insert_qualified(
        RequiredType::of::<usize>(),
        [Qualifier::with_value::<Named>("size")],
        Arc::new(8usize),
    );
    context
}

#[test]
fn test_construct_with_resolved_arguments() {
    let manager = Manager::without_hooks(registry(), Services::new());
    let instantiator = DefaultInstantiator::new(TypeInfo::of::<Pool>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();

    let pool = instantiator.new_instance_of::<Pool>(&context()).unwrap();

    assert_eq!(pool.config.url, "postgres://localhost");
    assert_eq!(*pool.size, 8);
    assert_eq!(instantiator.constructor().parameters().len(), 2);
    assert_eq!(instantiator.constructor().declaring_type(), TypeInfo::of::<Pool>());
}

#[test]
fn test_lookup_called_once_per_parameter() {
    let manager = Manager::without_hooks(registry(), Services::new());
    let instantiator = DefaultInstantiator::new(TypeInfo::of::<Pool>(), None, InjectionPointFactory::SILENT, &manager).unwrap();
    let calls = AtomicUsize::new(0);
    let context = context();

    let lookup = |injection_point: &ParameterInjectionPoint| -> Result<Instance, ResolveErrorKind> {
        calls.fetch_add(1, Ordering::SeqCst);
        needle::LookupContext::resolve(&context, injection_point)
    };

    instantiator.new_instance(&lookup).unwrap();
    instantiator.new_instance(&lookup).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_missing_argument() {
    let manager = Manager::without_hooks(registry(), Services::new());
    let instantiator = DefaultInstantiator::new(TypeInfo::of::<Pool>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();

    let mut context = Context::new();
    context.insert(Config { url: "postgres://localhost" });

    let err = instantiator.new_instance(&context).unwrap_err();

    assert!(matches!(err, InstantiatorErrorKind::Deps { position: 1, .. }));
}

#[test]
fn test_constructor_failure() {
    let manager = Manager::without_hooks(registry(), Services::new());
    let instantiator = DefaultInstantiator::new(TypeInfo::of::<Failing>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();

    let err = instantiator.new_instance(&Context::new()).unwrap_err();

    assert!(matches!(err, InstantiatorErrorKind::Factory(InstantiateErrorKind::Custom(_))));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_interface_never_instantiable() {
    let manager = Manager::without_hooks(registry(), Services::new());

    for factory in [InjectionPointFactory::NORMAL, InjectionPointFactory::SILENT] {
        let result = DefaultInstantiator::new(TypeInfo::of::<Storage>(), None, factory, &manager);

        assert!(matches!(result, Err(DefinitionErrorKind::InstantiatorForInterface { .. })));
    }
}

#[test]
fn test_abstract_type_fails_at_invocation() {
    let manager = Manager::without_hooks(registry(), Services::new());

    let instantiator = DefaultInstantiator::new(TypeInfo::of::<Cache>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();

    assert!(matches!(
        instantiator.new_instance(&Context::new()),
        Err(InstantiatorErrorKind::Definition(DefinitionErrorKind::AbstractInstantiation { .. }))
    ));
}

#[test]
fn test_abstract_type_made_concrete_before_construction() {
    let registry = Arc::new(registry());
    let manager = Manager::from_shared(registry.clone(), Arc::new(Services::new()), Arc::new(ObserverChain::new()));
    let instantiator = DefaultInstantiator::new(TypeInfo::of::<Cache>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();

    let cache = registry.component(&TypeInfo::of::<Cache>()).unwrap();
    registry.insert(ComponentStructuralInfo::clone(&cache).with_kind(ComponentKind::Class));

    assert!(instantiator.new_instance_of::<Cache>(&Context::new()).is_ok());
}

#[test]
fn test_unknown_type() {
    let manager = Manager::without_hooks(TypeModelRegistry::new(), Services::new());

    let result = DefaultInstantiator::new(TypeInfo::of::<Pool>(), None, InjectionPointFactory::NORMAL, &manager);

    assert!(matches!(result, Err(DefinitionErrorKind::UnknownType { .. })));
}

#[test]
fn test_invoke_method() {
    let manager = Manager::without_hooks(registry(), Services::new());
    let component = manager.model().component(&TypeInfo::of::<Pool>()).unwrap();
    let instantiator = DefaultInstantiator::new(TypeInfo::of::<Pool>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();
    let pool = instantiator.new_instance(&context()).unwrap();

    let resize = InjectionPointFactory::NORMAL
        .create_method_injection_point(component.method_named("resize").unwrap(), None, TypeInfo::of::<Pool>(), false, &manager)
        .unwrap();

    let mut arguments = Context::new();
    arguments.insert(4usize);

    let size = resize.invoke(Some(&pool), &arguments).unwrap().unwrap();

    assert_eq!(*size.downcast::<usize>().unwrap(), 12);
    assert_eq!(resize.parameters()[0].required_type(), &RequiredType::of::<usize>());
    assert!(matches!(
        resize.invoke(None, &arguments),
        Err(InstantiatorErrorKind::Factory(InstantiateErrorKind::MissingReceiver { .. }))
    ));
}

#[test]
fn test_invoke_checks_receiver_before_lookup() {
    let manager = Manager::without_hooks(registry(), Services::new());
    let component = manager.model().component(&TypeInfo::of::<Pool>()).unwrap();
    let pool = DefaultInstantiator::new(TypeInfo::of::<Pool>(), None, InjectionPointFactory::NORMAL, &manager)
        .unwrap()
        .new_instance(&context())
        .unwrap();

    let default_size = InjectionPointFactory::NORMAL
        .create_method_injection_point(component.method_named("default_size").unwrap(), None, TypeInfo::of::<Pool>(), false, &manager)
        .unwrap();
    let resize = InjectionPointFactory::NORMAL
        .create_method_injection_point(component.method_named("resize").unwrap(), None, TypeInfo::of::<Pool>(), false, &manager)
        .unwrap();

    let calls = AtomicUsize::new(0);
    let lookup = |_: &ParameterInjectionPoint| -> Result<Instance, ResolveErrorKind> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(4usize))
    };

    let size = default_size.invoke(None, &lookup).unwrap().unwrap();
    assert_eq!(*size.downcast::<usize>().unwrap(), 16);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(matches!(
        default_size.invoke(Some(&pool), &lookup),
        Err(InstantiatorErrorKind::Factory(InstantiateErrorKind::UnexpectedReceiver { .. }))
    ));
    assert!(matches!(
        resize.invoke(None, &lookup),
        Err(InstantiatorErrorKind::Factory(InstantiateErrorKind::MissingReceiver { .. }))
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_abstract_component_with_foreign_constructor() {
    let manager = Manager::without_hooks(registry(), Services::new());
    let instantiator = DefaultInstantiator::new(TypeInfo::of::<Shape>(), None, InjectionPointFactory::NORMAL, &manager).unwrap();

    assert_eq!(instantiator.constructor().declaring_type(), TypeInfo::of::<Shape>());
    assert!(matches!(
        instantiator.new_instance(&Context::new()),
        Err(InstantiatorErrorKind::Definition(DefinitionErrorKind::AbstractInstantiation { component })) if component == TypeInfo::of::<Shape>()
    ));
}
