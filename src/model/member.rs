use alloc::collections::BTreeSet;
use core::fmt::{self, Display, Formatter};

use crate::{
    any::TypeInfo,
    marker::{Marker, Qualifier},
    types::RequiredType,
};

/// Member carrying metadata markers.
pub trait Annotated {
    fn markers(&self) -> &BTreeSet<Marker>;

    #[inline]
    fn is_marked(&self, marker: Marker) -> bool {
        self.markers().contains(&marker)
    }

    #[inline]
    fn is_marked_with<M: 'static>(&self) -> bool
    where
        Self: Sized,
    {
        self.is_marked(Marker::of::<M>())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_final: bool,
    pub is_transient: bool,
}

/// Declared type, qualifiers, markers and modifiers of a field or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    declared_type: RequiredType,
    qualifiers: BTreeSet<Qualifier>,
    markers: BTreeSet<Marker>,
    modifiers: Modifiers,
}

impl Declaration {
    #[inline]
    #[must_use]
    pub const fn new(declared_type: RequiredType) -> Self {
        Self {
            declared_type,
            qualifiers: BTreeSet::new(),
            markers: BTreeSet::new(),
            modifiers: Modifiers {
                is_static: false,
                is_final: false,
                is_transient: false,
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(RequiredType::of::<T>())
    }

    #[inline]
    #[must_use]
    pub fn marked<M: 'static>(self) -> Self {
        self.with_marker(Marker::of::<M>())
    }

    #[inline]
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.insert(marker);
        self
    }

    #[inline]
    #[must_use]
    pub fn qualified(mut self, qualifier: Qualifier) -> Self {
        self.qualifiers.insert(qualifier);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[inline]
    #[must_use]
    pub const fn declared_type(&self) -> &RequiredType {
        &self.declared_type
    }

    #[inline]
    #[must_use]
    pub const fn qualifiers(&self) -> &BTreeSet<Qualifier> {
        &self.qualifiers
    }

    #[inline]
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl Annotated for Declaration {
    #[inline]
    fn markers(&self) -> &BTreeSet<Marker> {
        &self.markers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    pub declaring_type: TypeInfo,
    pub name: &'static str,
}

impl Display for FieldId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring_type, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    id: FieldId,
    declaration: Declaration,
}

impl FieldInfo {
    #[inline]
    #[must_use]
    pub const fn new(declaring_type: TypeInfo, name: &'static str, declaration: Declaration) -> Self {
        Self {
            id: FieldId { declaring_type, name },
            declaration,
        }
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.name
    }

    #[inline]
    #[must_use]
    pub const fn declaring_type(&self) -> TypeInfo {
        self.id.declaring_type
    }

    #[inline]
    #[must_use]
    pub const fn declaration(&self) -> &Declaration {
        &self.declaration
    }
}

impl Annotated for FieldInfo {
    #[inline]
    fn markers(&self) -> &BTreeSet<Marker> {
        self.declaration.markers()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CallableKind {
    Constructor,
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallableId {
    pub declaring_type: TypeInfo,
    pub name: &'static str,
    pub kind: CallableKind,
}

impl Display for CallableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring_type, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParameterId {
    pub callable: CallableId,
    pub position: usize,
}

impl Display for ParameterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "parameter {} of {}", self.position, self.callable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    id: ParameterId,
    declaration: Declaration,
}

impl ParameterInfo {
    #[inline]
    #[must_use]
    pub const fn new(callable: CallableId, position: usize, declaration: Declaration) -> Self {
        Self {
            id: ParameterId { callable, position },
            declaration,
        }
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> ParameterId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.id.position
    }

    #[inline]
    #[must_use]
    pub const fn declaring_type(&self) -> TypeInfo {
        self.id.callable.declaring_type
    }

    #[inline]
    #[must_use]
    pub const fn declaration(&self) -> &Declaration {
        &self.declaration
    }
}

impl Annotated for ParameterInfo {
    #[inline]
    fn markers(&self) -> &BTreeSet<Marker> {
        self.declaration.markers()
    }
}
