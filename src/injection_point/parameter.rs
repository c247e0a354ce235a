use alloc::sync::Arc;
use core::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

use super::{InjectionPoint, InjectionPointAttributes, MemberKind};
use crate::{
    any::TypeInfo,
    bean::{self, Bean},
    marker::{Delegate, Disposes, Marker, Observes},
    model::{CallableKind, ParameterId, ParameterInfo, TypeModel},
};

/// Role of a parameter in its callable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParameterRole {
    #[default]
    Normal,
    /// Receives the instance being disposed.
    Disposes,
    /// Receives the observed event.
    Observes,
}

impl ParameterRole {
    /// Role of a special parameter, `None` for a normal one.
    #[must_use]
    pub(crate) fn special(parameter: &ParameterInfo, model: &dyn TypeModel) -> Option<Self> {
        if model.has_marker(parameter, Marker::of::<Disposes>()) {
            Some(Self::Disposes)
        } else if model.has_marker(parameter, Marker::of::<Observes>()) {
            Some(Self::Observes)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParameterInjectionPoint {
    parameter: ParameterInfo,
    pub(super) attributes: InjectionPointAttributes,
    role: ParameterRole,
}

impl ParameterInjectionPoint {
    /// Infers the descriptor of a normal parameter as seen from `declaring_component`.
    #[must_use]
    pub(crate) fn infer(
        parameter: &ParameterInfo,
        declaring_bean: Option<&Arc<dyn Bean>>,
        declaring_component: TypeInfo,
        model: &dyn TypeModel,
    ) -> Self {
        let bindings = model.type_bindings(&declaring_component, &parameter.declaring_type());
        let declaration = parameter.declaration();

        Self {
            parameter: parameter.clone(),
            attributes: InjectionPointAttributes::new(
                declaration.declared_type().resolve(&bindings),
                declaration.qualifiers().clone(),
                declaring_component,
                bean::downgrade(declaring_bean),
                model.has_marker(parameter, Marker::of::<Delegate>()),
            ),
            role: ParameterRole::Normal,
        }
    }

    /// Descriptor of a disposer or observer parameter. It is never owned by a bean and its
    /// declared type is kept as is, because it isn't looked up as an ordinary dependency.
    #[must_use]
    pub(crate) fn special(parameter: &ParameterInfo, role: ParameterRole, declaring_component: TypeInfo) -> Self {
        let declaration = parameter.declaration();

        Self {
            parameter: parameter.clone(),
            attributes: InjectionPointAttributes::new(
                declaration.declared_type().clone(),
                declaration.qualifiers().clone(),
                declaring_component,
                None,
                false,
            ),
            role,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ParameterId {
        self.parameter.id()
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.parameter.position()
    }

    #[inline]
    #[must_use]
    pub fn parameter(&self) -> &ParameterInfo {
        &self.parameter
    }

    #[inline]
    #[must_use]
    pub fn role(&self) -> ParameterRole {
        self.role
    }

    #[inline]
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.role != ParameterRole::Normal
    }
}

impl InjectionPoint for ParameterInjectionPoint {
    #[inline]
    fn attributes(&self) -> &InjectionPointAttributes {
        &self.attributes
    }

    #[inline]
    fn member_kind(&self) -> MemberKind {
        match self.parameter.id().callable.kind {
            CallableKind::Constructor => MemberKind::ConstructorParameter,
            CallableKind::Method => MemberKind::MethodParameter,
        }
    }
}

impl PartialEq for ParameterInjectionPoint {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ParameterInjectionPoint {}

impl PartialOrd for ParameterInjectionPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParameterInjectionPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }
}

impl Hash for ParameterInjectionPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl Display for ParameterInjectionPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.required_type())
    }
}

#[cfg(test)]
mod tests {
    use super::{ParameterInjectionPoint, ParameterRole};
    use crate::{
        any::TypeInfo,
        injection_point::{InjectionPoint as _, MemberKind},
        marker::{Disposes, Observes},
        model::{Callable as _, Declaration, MethodInfo, TypeModelRegistry},
        types::RequiredType,
    };

    struct Listener;
    struct Event;
    struct Connection;

    #[test]
    fn test_special_role() {
        let registry = TypeModelRegistry::new();
        let method = MethodInfo::new(TypeInfo::of::<Listener>(), "on_event", |_, _| Ok(None))
            .parameter(Declaration::of::<Event>().marked::<Observes>())
            .parameter(Declaration::of::<Connection>().marked::<Disposes>())
            .parameter(Declaration::of::<Connection>());

        let roles: [_; 3] = core::array::from_fn(|position| ParameterRole::special(&method.parameters()[position], &registry));

        assert_eq!(roles, [Some(ParameterRole::Observes), Some(ParameterRole::Disposes), None]);
    }

    #[test]
    fn test_special_descriptor() {
        let method = MethodInfo::new(TypeInfo::of::<Listener>(), "on_event", |_, _| Ok(None))
            .parameter(Declaration::new(RequiredType::variable("E")).marked::<Observes>());

        let injection_point =
            ParameterInjectionPoint::special(&method.parameters()[0], ParameterRole::Observes, TypeInfo::of::<Listener>());

        assert!(injection_point.is_special());
        assert!(!injection_point.has_declaring_bean());
        assert_eq!(injection_point.required_type(), &RequiredType::variable("E"));
        assert_eq!(injection_point.member_kind(), MemberKind::MethodParameter);
        assert_eq!(injection_point.position(), 0);
    }
}
