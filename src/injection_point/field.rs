use alloc::sync::Arc;
use core::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};
use tracing::error;

use super::{InjectionPoint, InjectionPointAttributes, MemberKind};
use crate::{
    any::TypeInfo,
    bean::{self, Bean},
    errors::DefinitionErrorKind,
    marker::{Delegate, Inject, Marker},
    model::{FieldId, FieldInfo, TypeModel},
};

#[derive(Debug, Clone)]
pub struct FieldInjectionPoint {
    field: Arc<FieldInfo>,
    pub(super) attributes: InjectionPointAttributes,
}

impl FieldInjectionPoint {
    /// Infers the descriptor of `field` as seen from `declaring_component`.
    ///
    /// # Errors
    /// Returns [`DefinitionErrorKind::QualifierOnFinalField`] if the field is immutable and marked with [`Inject`]
    pub(crate) fn infer(
        field: &Arc<FieldInfo>,
        declaring_bean: Option<&Arc<dyn Bean>>,
        declaring_component: TypeInfo,
        model: &dyn TypeModel,
    ) -> Result<Self, DefinitionErrorKind> {
        if model.is_immutable(field) && model.has_marker(&**field, Marker::of::<Inject>()) {
            let err = DefinitionErrorKind::QualifierOnFinalField { field: field.id() };
            error!("{}", err);
            return Err(err);
        }

        let bindings = model.type_bindings(&declaring_component, &field.declaring_type());
        let declaration = field.declaration();

        Ok(Self {
            field: field.clone(),
            attributes: InjectionPointAttributes::new(
                declaration.declared_type().resolve(&bindings),
                declaration.qualifiers().clone(),
                declaring_component,
                bean::downgrade(declaring_bean),
                model.has_marker(&**field, Marker::of::<Delegate>()),
            ),
        })
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> FieldId {
        self.field.id()
    }

    #[inline]
    #[must_use]
    pub fn field(&self) -> &Arc<FieldInfo> {
        &self.field
    }
}

impl InjectionPoint for FieldInjectionPoint {
    #[inline]
    fn attributes(&self) -> &InjectionPointAttributes {
        &self.attributes
    }

    #[inline]
    fn member_kind(&self) -> MemberKind {
        MemberKind::Field
    }

    #[inline]
    fn is_transient(&self) -> bool {
        self.field.declaration().modifiers().is_transient
    }
}

impl PartialEq for FieldInjectionPoint {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for FieldInjectionPoint {}

impl PartialOrd for FieldInjectionPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldInjectionPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }
}

impl Hash for FieldInjectionPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl Display for FieldInjectionPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "field {} ({})", self.id(), self.required_type())
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

    use super::FieldInjectionPoint;
    use crate::{
        any::TypeInfo,
        errors::DefinitionErrorKind,
        injection_point::{InjectionPoint as _, MemberKind},
        marker::{Delegate, Inject, Named, Qualifier},
        model::{ComponentStructuralInfo, Declaration, Modifiers, TypeModel as _, TypeModelRegistry},
        types::RequiredType,
    };

    struct Base;
    struct Service;
    struct Repository;
    struct User;

    fn registry() -> TypeModelRegistry {
        TypeModelRegistry::new()
            .register(
                ComponentStructuralInfo::abstract_class::<Base>().type_parameter("T").field(
                    "repository",
                    Declaration::new(RequiredType::parameterized::<Repository>([RequiredType::variable("T")]))
                        .marked::<Inject>()
                        .qualified(Qualifier::with_value::<Named>("main")),
                ),
            )
            .register(
                ComponentStructuralInfo::class::<Service>()
                    .extends(RequiredType::parameterized::<Base>([RequiredType::of::<User>()]))
                    .field(
                        "frozen",
                        Declaration::of::<User>().marked::<Inject>().with_modifiers(Modifiers {
                            is_final: true,
                            ..Modifiers::default()
                        }),
                    )
                    .field(
                        "delegate",
                        Declaration::of::<User>().marked::<Inject>().marked::<Delegate>().with_modifiers(Modifiers {
                            is_transient: true,
                            ..Modifiers::default()
                        }),
                    ),
            )
    }

    #[test]
    fn test_infer_resolves_inherited_type_variables() {
        let registry = registry();
        let field = registry.declared_fields(&TypeInfo::of::<Base>()).remove(0);

        let injection_point = FieldInjectionPoint::infer(&field, None, TypeInfo::of::<Service>(), &registry).unwrap();

        assert_eq!(
            injection_point.required_type(),
            &RequiredType::parameterized::<Repository>([RequiredType::of::<User>()])
        );
        assert_eq!(injection_point.qualifiers(), field.declaration().qualifiers());
        assert_eq!(injection_point.member_kind(), MemberKind::Field);
        assert_eq!(injection_point.declaring_component(), TypeInfo::of::<Service>());
        assert!(!injection_point.has_declaring_bean());
    }

    #[test]
    #[traced_test]
    fn test_infer_final_field() {
        let registry = registry();
        let field = registry.declared_fields(&TypeInfo::of::<Service>()).remove(0);

        let result = FieldInjectionPoint::infer(&field, None, TypeInfo::of::<Service>(), &registry);

        assert!(matches!(result, Err(DefinitionErrorKind::QualifierOnFinalField { field: id }) if id.name == "frozen"));
        assert!(logs_contain("can't be final"));
    }

    #[test]
    fn test_delegate_and_transient() {
        let registry = registry();
        let field = registry.declared_fields(&TypeInfo::of::<Service>()).remove(1);

        let injection_point = FieldInjectionPoint::infer(&field, None, TypeInfo::of::<Service>(), &registry).unwrap();

        assert!(injection_point.is_delegate());
        assert!(injection_point.is_transient());
    }

    #[test]
    fn test_identity_survives_replacement() {
        let registry = registry();
        let field = registry.declared_fields(&TypeInfo::of::<Base>()).remove(0);

        let original = FieldInjectionPoint::infer(&field, None, TypeInfo::of::<Service>(), &registry).unwrap();
        let replaced = original.clone().with_required_type(RequiredType::of::<User>()).with_qualifiers([]);

        assert_eq!(original, replaced);
        assert_ne!(original.required_type(), replaced.required_type());
        assert!(replaced.qualifiers().is_empty());
        assert!(Arc::ptr_eq(original.field(), replaced.field()));
    }
}
