//! Structural model of components: the facade the injection point factory reads
//! fields, constructors, methods, markers and modifiers through.

mod callable;
mod component;
mod member;
mod registry;

use alloc::{collections::BTreeSet, sync::Arc, vec::Vec};
use tracing::warn;

pub use callable::{Arguments, Callable, ConstructorFn, ConstructorInfo, MethodFn, MethodInfo};
pub use component::{ComponentKind, ComponentStructuralInfo};
pub use member::{Annotated, CallableId, CallableKind, Declaration, FieldId, FieldInfo, Modifiers, ParameterId, ParameterInfo};
pub use registry::TypeModelRegistry;

use crate::{
    any::TypeInfo,
    marker::Marker,
    types::{RequiredType, TypeBindings},
};

/// Type model facade.
///
/// Only [`TypeModel::component`] is required, every other query is derived from the
/// structural info it returns. Implementations are shared between threads and must answer
/// queries without observable side effects.
pub trait TypeModel: Send + Sync {
    fn component(&self, ty: &TypeInfo) -> Option<Arc<ComponentStructuralInfo>>;

    /// Component's hierarchy, most ancestral level first and the component itself last.
    /// Empty for an unknown type.
    fn ancestor_chain(&self, ty: &TypeInfo) -> Vec<Arc<ComponentStructuralInfo>> {
        let mut chain = Vec::new();
        let mut visited = BTreeSet::new();

        let mut next = self.component(ty);
        while let Some(component) = next {
            if !visited.insert(component.type_info()) {
                warn!("Cyclic superclass chain detected at {}", component.type_info());
                break;
            }
            next = component
                .superclass()
                .and_then(RequiredType::raw)
                .and_then(|superclass| self.component(&superclass));
            chain.push(component);
        }

        chain.reverse();
        chain
    }

    fn declared_fields(&self, ty: &TypeInfo) -> Vec<Arc<FieldInfo>> {
        self.component(ty).map(|component| component.fields().to_vec()).unwrap_or_default()
    }

    fn declared_fields_with_marker(&self, ty: &TypeInfo, marker: Marker) -> Vec<Arc<FieldInfo>> {
        self.declared_fields(ty)
            .into_iter()
            .filter(|field| self.has_marker(&**field, marker))
            .collect()
    }

    fn constructors(&self, ty: &TypeInfo) -> Vec<Arc<ConstructorInfo>> {
        self.component(ty)
            .map(|component| component.constructors().to_vec())
            .unwrap_or_default()
    }

    fn is_interface(&self, ty: &TypeInfo) -> bool {
        self.component(ty)
            .is_some_and(|component| component.kind() == ComponentKind::Interface)
    }

    fn is_abstract(&self, ty: &TypeInfo) -> bool {
        self.component(ty)
            .is_some_and(|component| matches!(component.kind(), ComponentKind::Abstract | ComponentKind::Interface))
    }

    fn is_static(&self, field: &FieldInfo) -> bool {
        field.declaration().modifiers().is_static
    }

    fn is_immutable(&self, field: &FieldInfo) -> bool {
        field.declaration().modifiers().is_final
    }

    fn has_marker(&self, member: &dyn Annotated, marker: Marker) -> bool {
        member.is_marked(marker)
    }

    /// Bindings of `declaring`'s type parameters as seen from `component`, following the
    /// parameterized superclass references between them. Empty if `declaring` isn't an
    /// ancestor of `component` or is `component` itself.
    fn type_bindings(&self, component: &TypeInfo, declaring: &TypeInfo) -> TypeBindings {
        let mut bindings = TypeBindings::new();
        let mut visited = BTreeSet::new();

        let mut current = self.component(component);
        while let Some(info) = current {
            if info.type_info() == *declaring {
                return bindings;
            }
            if !visited.insert(info.type_info()) {
                break;
            }

            let Some(superclass) = info.superclass().map(|superclass| superclass.resolve(&bindings)) else {
                break;
            };
            let Some(parent) = superclass.raw().and_then(|raw| self.component(&raw)) else {
                break;
            };

            bindings = match superclass {
                RequiredType::Parameterized { arguments, .. } => parent.type_parameters().iter().copied().zip(arguments).collect(),
                RequiredType::Class(_) | RequiredType::Variable(_) => TypeBindings::new(),
            };
            current = Some(parent);
        }

        TypeBindings::new()
    }
}
