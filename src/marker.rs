use core::fmt::{self, Display, Formatter};

use crate::any::TypeInfo;

/// Metadata marker attached to a component, field, callable or parameter.
///
/// A marker is identified by the Rust type standing for it, the same way an
/// annotation is identified by its annotation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Marker(TypeInfo);

impl Marker {
    #[inline]
    #[must_use]
    pub fn of<M: 'static>() -> Self {
        Self(TypeInfo::of::<M>())
    }

    #[inline]
    #[must_use]
    pub const fn type_info(&self) -> TypeInfo {
        self.0
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Marker narrowing which provider satisfies an injection point, with an optional value
/// (e.g. a name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Qualifier {
    pub marker: Marker,
    pub value: Option<&'static str>,
}

impl Qualifier {
    #[inline]
    #[must_use]
    pub fn of<M: 'static>() -> Self {
        Self {
            marker: Marker::of::<M>(),
            value: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_value<M: 'static>(value: &'static str) -> Self {
        Self {
            marker: Marker::of::<M>(),
            value: Some(value),
        }
    }
}

impl Display for Qualifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}(\"{value}\")", self.marker),
            None => write!(f, "{}", self.marker),
        }
    }
}

/// Requests a dependency for a field, constructor or initializer method.
pub struct Inject;

/// Declares a producer; producer fields are never injection points.
pub struct Produces;

/// Disposer method parameter receiving the instance being disposed.
pub struct Disposes;

/// Observer method parameter receiving the event payload.
pub struct Observes;

/// Decorator delegate injection point.
pub struct Delegate;

/// Session bean reference, gated by [`crate::Facility::EjbInjection`].
pub struct Ejb;

/// Persistence context, gated by [`crate::Facility::JpaInjection`].
pub struct PersistenceContext;

/// Persistence unit, gated by [`crate::Facility::JpaInjection`].
pub struct PersistenceUnit;

/// Environment resource, gated by [`crate::Facility::ResourceInjection`].
pub struct Resource;

/// Qualifier selecting a provider by name.
pub struct Named;
