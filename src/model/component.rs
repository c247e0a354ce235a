use alloc::{collections::BTreeSet, sync::Arc, vec::Vec};
use tracing::warn;

use super::{
    callable::{ConstructorInfo, MethodInfo},
    member::{Annotated, Declaration, FieldInfo},
};
use crate::{any::TypeInfo, marker::Marker, types::RequiredType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Class,
    Abstract,
    Interface,
}

/// Structural description of one component type: its own declared members and a link to
/// its superclass.
#[derive(Debug, Clone)]
pub struct ComponentStructuralInfo {
    type_info: TypeInfo,
    kind: ComponentKind,
    type_parameters: Vec<&'static str>,
    superclass: Option<RequiredType>,
    markers: BTreeSet<Marker>,
    fields: Vec<Arc<FieldInfo>>,
    constructors: Vec<Arc<ConstructorInfo>>,
    methods: Vec<Arc<MethodInfo>>,
}

impl ComponentStructuralInfo {
    #[must_use]
    pub const fn new(type_info: TypeInfo, kind: ComponentKind) -> Self {
        Self {
            type_info,
            kind,
            type_parameters: Vec::new(),
            superclass: None,
            markers: BTreeSet::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn class<T: ?Sized + 'static>() -> Self {
        Self::new(TypeInfo::of::<T>(), ComponentKind::Class)
    }

    #[inline]
    #[must_use]
    pub fn abstract_class<T: ?Sized + 'static>() -> Self {
        Self::new(TypeInfo::of::<T>(), ComponentKind::Abstract)
    }

    #[inline]
    #[must_use]
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self::new(TypeInfo::of::<T>(), ComponentKind::Interface)
    }

    #[inline]
    #[must_use]
    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    #[must_use]
    pub fn type_parameter(mut self, name: &'static str) -> Self {
        self.type_parameters.push(name);
        self
    }

    /// Sets the superclass, parameterized over this component's type parameters if needed.
    #[inline]
    #[must_use]
    pub fn extends(mut self, superclass: RequiredType) -> Self {
        self.superclass = Some(superclass);
        self
    }

    #[inline]
    #[must_use]
    pub fn marked<M: 'static>(mut self) -> Self {
        self.markers.insert(Marker::of::<M>());
        self
    }

    /// Declares a field. Redeclaring a name replaces the earlier field in place.
    #[must_use]
    pub fn field(mut self, name: &'static str, declaration: Declaration) -> Self {
        let field = Arc::new(FieldInfo::new(self.type_info, name, declaration));
        match self.fields.iter_mut().find(|existing| existing.name() == name) {
            Some(existing) => {
                warn!("Field {} redeclared, replacing the earlier declaration", field.id());
                *existing = field;
            }
            None => self.fields.push(field),
        }
        self
    }

    /// Declares a constructor of this component, whatever type its body was built for.
    #[inline]
    #[must_use]
    pub fn constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.constructors.push(Arc::new(constructor.declared_on(self.type_info)));
        self
    }

    /// Declares a method of this component, whatever type it was built for.
    #[inline]
    #[must_use]
    pub fn method(mut self, method: MethodInfo) -> Self {
        self.methods.push(Arc::new(method.declared_on(self.type_info)));
        self
    }

    #[inline]
    #[must_use]
    pub const fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn type_parameters(&self) -> &[&'static str] {
        &self.type_parameters
    }

    #[inline]
    #[must_use]
    pub const fn superclass(&self) -> Option<&RequiredType> {
        self.superclass.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[Arc<FieldInfo>] {
        &self.fields
    }

    #[inline]
    #[must_use]
    pub fn constructors(&self) -> &[Arc<ConstructorInfo>] {
        &self.constructors
    }

    #[inline]
    #[must_use]
    pub fn methods(&self) -> &[Arc<MethodInfo>] {
        &self.methods
    }

    #[inline]
    #[must_use]
    pub fn method_named(&self, name: &str) -> Option<&Arc<MethodInfo>> {
        self.methods.iter().find(|method| method.name() == name)
    }
}

impl Annotated for ComponentStructuralInfo {
    #[inline]
    fn markers(&self) -> &BTreeSet<Marker> {
        &self.markers
    }
}
