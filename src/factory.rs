use alloc::{collections::BTreeSet, sync::Arc, vec::Vec};
use tracing::{debug, debug_span, error};

use crate::{
    any::TypeInfo,
    bean::Bean,
    config::Config,
    errors::DefinitionErrorKind,
    injection_point::{ConstructorInjectionPoint, FieldInjectionPoint, MethodInjectionPoint, ParameterInjectionPoint, ParameterRole},
    manager::Manager,
    marker::{Inject, Marker, Produces},
    model::{Callable, ConstructorInfo, FieldInfo, MethodInfo, ParameterInfo},
    services::Capability,
};

/// Creates injection point descriptors from the type model.
///
/// The factory holds no mutable state: one instance per mode can be shared by the whole process.
/// See [`InjectionPointFactory::NORMAL`] and [`InjectionPointFactory::SILENT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionPointFactory {
    config: Config,
}

impl Default for InjectionPointFactory {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl InjectionPointFactory {
    /// Dispatches every created descriptor through the manager's extension hooks.
    pub const NORMAL: Self = Self::new(Config { dispatch_hooks: true });
    /// Never dispatches. Used for container-internal members.
    pub const SILENT: Self = Self::new(Config { dispatch_hooks: false });

    #[inline]
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    #[inline]
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        !self.config.dispatch_hooks
    }

    fn process_field(&self, injection_point: FieldInjectionPoint, manager: &Manager) -> Result<FieldInjectionPoint, DefinitionErrorKind> {
        if self.config.dispatch_hooks {
            manager.hooks().fire_field(injection_point)
        } else {
            Ok(injection_point)
        }
    }

    fn process_parameter(
        &self,
        injection_point: ParameterInjectionPoint,
        manager: &Manager,
    ) -> Result<ParameterInjectionPoint, DefinitionErrorKind> {
        if self.config.dispatch_hooks {
            manager.hooks().fire_parameter(injection_point)
        } else {
            Ok(injection_point)
        }
    }

    /// Creates the descriptor of `field` with its type resolved against `declaring_component`.
    ///
    /// # Errors
    /// - Returns [`DefinitionErrorKind::QualifierOnFinalField`] if the field is immutable and marked with [`Inject`]
    /// - Returns [`DefinitionErrorKind::Extension`] if an extension rejected the descriptor
    pub fn create_field_injection_point(
        &self,
        field: &Arc<FieldInfo>,
        declaring_bean: Option<&Arc<dyn Bean>>,
        declaring_component: TypeInfo,
        manager: &Manager,
    ) -> Result<FieldInjectionPoint, DefinitionErrorKind> {
        let injection_point = FieldInjectionPoint::infer(field, declaring_bean, declaring_component, manager.model())?;
        self.process_field(injection_point, manager)
    }

    /// Creates the descriptor of a normal parameter with its type resolved against `declaring_component`.
    ///
    /// # Errors
    /// Returns [`DefinitionErrorKind::Extension`] if an extension rejected the descriptor
    pub fn create_parameter_injection_point(
        &self,
        parameter: &ParameterInfo,
        declaring_bean: Option<&Arc<dyn Bean>>,
        declaring_component: TypeInfo,
        manager: &Manager,
    ) -> Result<ParameterInjectionPoint, DefinitionErrorKind> {
        let injection_point = ParameterInjectionPoint::infer(parameter, declaring_bean, declaring_component, manager.model());
        self.process_parameter(injection_point, manager)
    }

    /// # Errors
    /// Returns [`DefinitionErrorKind::Extension`] if an extension rejected a parameter descriptor
    pub fn create_constructor_injection_point(
        &self,
        declaring_bean: Option<&Arc<dyn Bean>>,
        component: TypeInfo,
        constructor: &Arc<ConstructorInfo>,
        manager: &Manager,
    ) -> Result<ConstructorInjectionPoint, DefinitionErrorKind> {
        let span = debug_span!("create_constructor_injection_point", constructor = %constructor.id());
        let _guard = span.enter();

        let parameters = self.get_parameter_injection_points(&**constructor, declaring_bean, component, false, manager)?;

        debug!(parameters = parameters.len(), "Created");
        Ok(ConstructorInjectionPoint::new(
            constructor.clone(),
            parameters,
            declaring_bean,
            component,
            *self,
        ))
    }

    /// Selects the bean constructor of `ty` and creates its descriptor.
    ///
    /// The constructor marked with [`Inject`] is selected, or the parameterless one if none is marked.
    ///
    /// # Errors
    /// - Returns [`DefinitionErrorKind::UnknownType`] if the type model doesn't know `ty`
    /// - Returns [`DefinitionErrorKind::MultipleInjectConstructors`] if more than one constructor is marked
    /// - Returns [`DefinitionErrorKind::NoBeanConstructor`] if no constructor can be selected
    /// - Returns [`DefinitionErrorKind::Extension`] if an extension rejected a parameter descriptor
    pub fn create_constructor_injection_point_for_type(
        &self,
        declaring_bean: Option<&Arc<dyn Bean>>,
        ty: TypeInfo,
        manager: &Manager,
    ) -> Result<ConstructorInjectionPoint, DefinitionErrorKind> {
        let model = manager.model();
        if model.component(&ty).is_none() {
            let err = DefinitionErrorKind::UnknownType { component: ty };
            error!("{}", err);
            return Err(err);
        }

        let constructors = model.constructors(&ty);
        let mut marked = constructors
            .iter()
            .filter(|&constructor| model.has_marker(&**constructor, Marker::of::<Inject>()));

        let constructor = match (marked.next(), marked.next()) {
            (Some(constructor), None) => constructor,
            (Some(_), Some(_)) => {
                let err = DefinitionErrorKind::MultipleInjectConstructors {
                    component: ty,
                    count: 2 + marked.count(),
                };
                error!("{}", err);
                return Err(err);
            }
            (None, _) => match constructors.iter().find(|constructor| constructor.is_parameterless()) {
                Some(constructor) => constructor,
                None => {
                    let err = DefinitionErrorKind::NoBeanConstructor { component: ty };
                    error!("{}", err);
                    return Err(err);
                }
            },
        };

        self.create_constructor_injection_point(declaring_bean, ty, constructor, manager)
    }

    /// Creates the descriptor of `method`. Parameters of observer and disposer methods aren't
    /// owned by `declaring_bean`.
    ///
    /// # Errors
    /// Returns [`DefinitionErrorKind::Extension`] if an extension rejected a parameter descriptor
    pub fn create_method_injection_point(
        &self,
        method: &Arc<MethodInfo>,
        declaring_bean: Option<&Arc<dyn Bean>>,
        declaring_component: TypeInfo,
        observer_or_disposer: bool,
        manager: &Manager,
    ) -> Result<MethodInjectionPoint, DefinitionErrorKind> {
        let span = debug_span!("create_method_injection_point", method = %method.id());
        let _guard = span.enter();

        let parameters =
            self.get_parameter_injection_points(&**method, declaring_bean, declaring_component, observer_or_disposer, manager)?;

        debug!(parameters = parameters.len(), "Created");
        Ok(MethodInjectionPoint::new(
            method.clone(),
            parameters,
            declaring_bean,
            declaring_component,
            observer_or_disposer,
            *self,
        ))
    }

    /// Injected fields of `ty`'s hierarchy, one set per level, the most ancestral level first.
    /// Static fields and producer fields are excluded.
    ///
    /// # Errors
    /// - Returns [`DefinitionErrorKind::QualifierOnFinalField`] if an injected field is immutable
    /// - Returns [`DefinitionErrorKind::Extension`] if an extension rejected a descriptor
    pub fn get_field_injection_points(
        &self,
        declaring_bean: Option<&Arc<dyn Bean>>,
        ty: TypeInfo,
        manager: &Manager,
    ) -> Result<Vec<BTreeSet<FieldInjectionPoint>>, DefinitionErrorKind> {
        let span = debug_span!("get_field_injection_points", component = %ty, silent = self.is_silent());
        let _guard = span.enter();

        let model = manager.model();
        let chain = model.ancestor_chain(&ty);

        let mut levels = Vec::with_capacity(chain.len());
        for level in &chain {
            let mut injection_points = BTreeSet::new();
            for field in model.declared_fields_with_marker(&level.type_info(), Marker::of::<Inject>()) {
                if model.is_static(&field) || model.has_marker(&*field, Marker::of::<Produces>()) {
                    continue;
                }
                injection_points.insert(self.create_field_injection_point(&field, declaring_bean, ty, manager)?);
            }
            levels.push(injection_points);
        }

        debug!(levels = levels.len(), "Discovered");
        Ok(levels)
    }

    /// Fields of `ty`'s hierarchy marked for `capability`. Empty if the facility backing the
    /// capability isn't available.
    ///
    /// # Errors
    /// Returns [`DefinitionErrorKind`] if a descriptor can't be created
    pub fn get_injection_points_for_capability(
        &self,
        declaring_bean: Option<&Arc<dyn Bean>>,
        ty: TypeInfo,
        capability: Capability,
        manager: &Manager,
    ) -> Result<BTreeSet<FieldInjectionPoint>, DefinitionErrorKind> {
        let span = debug_span!("get_injection_points_for_capability", component = %ty, ?capability);
        let _guard = span.enter();

        let facility = capability.facility();
        if !manager.services().is_available(facility) {
            debug!(?facility, "Facility unavailable");
            return Ok(BTreeSet::new());
        }

        let marker = manager.services().marker_type_for(capability);
        self.get_injection_points_with_marker(declaring_bean, ty, marker, manager)
    }

    fn get_injection_points_with_marker(
        &self,
        declaring_bean: Option<&Arc<dyn Bean>>,
        ty: TypeInfo,
        marker: Marker,
        manager: &Manager,
    ) -> Result<BTreeSet<FieldInjectionPoint>, DefinitionErrorKind> {
        let model = manager.model();

        let mut injection_points = BTreeSet::new();
        for level in model.ancestor_chain(&ty) {
            for field in model.declared_fields_with_marker(&level.type_info(), marker) {
                injection_points.insert(self.create_field_injection_point(&field, declaring_bean, ty, manager)?);
            }
        }

        debug!(%marker, found = injection_points.len(), "Discovered");
        Ok(injection_points)
    }

    /// # Errors
    /// Returns [`DefinitionErrorKind`] if a descriptor can't be created
    #[inline]
    pub fn get_ejb_injection_points(
        &self,
        declaring_bean: Option<&Arc<dyn Bean>>,
        ty: TypeInfo,
        manager: &Manager,
    ) -> Result<BTreeSet<FieldInjectionPoint>, DefinitionErrorKind> {
        self.get_injection_points_for_capability(declaring_bean, ty, Capability::Ejb, manager)
    }

    /// # Errors
    /// Returns [`DefinitionErrorKind`] if a descriptor can't be created
    #[inline]
    pub fn get_persistence_context_injection_points(
        &self,
        declaring_bean: Option<&Arc<dyn Bean>>,
        ty: TypeInfo,
        manager: &Manager,
    ) -> Result<BTreeSet<FieldInjectionPoint>, DefinitionErrorKind> {
        self.get_injection_points_for_capability(declaring_bean, ty, Capability::PersistenceContext, manager)
    }

    /// # Errors
    /// Returns [`DefinitionErrorKind`] if a descriptor can't be created
    #[inline]
    pub fn get_persistence_unit_injection_points(
        &self,
        declaring_bean: Option<&Arc<dyn Bean>>,
        ty: TypeInfo,
        manager: &Manager,
    ) -> Result<BTreeSet<FieldInjectionPoint>, DefinitionErrorKind> {
        self.get_injection_points_for_capability(declaring_bean, ty, Capability::PersistenceUnit, manager)
    }

    /// # Errors
    /// Returns [`DefinitionErrorKind`] if a descriptor can't be created
    #[inline]
    pub fn get_resource_injection_points(
        &self,
        declaring_bean: Option<&Arc<dyn Bean>>,
        ty: TypeInfo,
        manager: &Manager,
    ) -> Result<BTreeSet<FieldInjectionPoint>, DefinitionErrorKind> {
        self.get_injection_points_for_capability(declaring_bean, ty, Capability::Resource, manager)
    }

    /// Descriptors of `callable`'s parameters in declaration order.
    ///
    /// Disposer and observer parameters are attributed to the component of `declaring_bean`
    /// (or `declaring_component` without a bean), are never owned by a bean and are never
    /// dispatched. Normal parameters of observer and disposer methods aren't owned by a bean either.
    ///
    /// # Errors
    /// Returns [`DefinitionErrorKind::Extension`] if an extension rejected a descriptor
    pub fn get_parameter_injection_points(
        &self,
        callable: &dyn Callable,
        declaring_bean: Option<&Arc<dyn Bean>>,
        declaring_component: TypeInfo,
        observer_or_disposer: bool,
        manager: &Manager,
    ) -> Result<Vec<ParameterInjectionPoint>, DefinitionErrorKind> {
        let model = manager.model();
        let owner = if observer_or_disposer { None } else { declaring_bean };

        callable
            .parameters()
            .iter()
            .map(|parameter| match ParameterRole::special(parameter, model) {
                Some(role) => {
                    let component = declaring_bean.map_or(declaring_component, |bean| bean.bean_class());
                    debug!(parameter = %parameter.id(), ?role, "Special parameter");
                    Ok(ParameterInjectionPoint::special(parameter, role, component))
                }
                None => self.create_parameter_injection_point(parameter, owner, declaring_component, manager),
            })
            .collect()
    }
}
