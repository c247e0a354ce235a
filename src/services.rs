use alloc::collections::{BTreeMap, BTreeSet};

use crate::marker::{Ejb, Marker, PersistenceContext, PersistenceUnit, Resource};

/// Optional integration facility a container configuration may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Facility {
    EjbInjection,
    JpaInjection,
    ResourceInjection,
}

/// Field injection capability backed by a [`Facility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    Ejb,
    PersistenceContext,
    PersistenceUnit,
    Resource,
}

impl Capability {
    #[inline]
    #[must_use]
    pub const fn facility(self) -> Facility {
        match self {
            Capability::Ejb => Facility::EjbInjection,
            Capability::PersistenceContext | Capability::PersistenceUnit => Facility::JpaInjection,
            Capability::Resource => Facility::ResourceInjection,
        }
    }

    #[inline]
    #[must_use]
    pub fn default_marker(self) -> Marker {
        match self {
            Capability::Ejb => Marker::of::<Ejb>(),
            Capability::PersistenceContext => Marker::of::<PersistenceContext>(),
            Capability::PersistenceUnit => Marker::of::<PersistenceUnit>(),
            Capability::Resource => Marker::of::<Resource>(),
        }
    }
}

/// Capability registry facade.
pub trait CapabilityRegistry: Send + Sync {
    fn is_available(&self, facility: Facility) -> bool;

    /// Marker identifying fields of the capability.
    fn marker_type_for(&self, capability: Capability) -> Marker {
        capability.default_marker()
    }
}

/// Table of available facilities with optional marker overrides.
#[derive(Debug, Clone, Default)]
pub struct Services {
    available: BTreeSet<Facility>,
    markers: BTreeMap<Capability, Marker>,
}

impl Services {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            available: BTreeSet::new(),
            markers: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_facility(mut self, facility: Facility) -> Self {
        self.available.insert(facility);
        self
    }

    /// Uses `marker` instead of [`Capability::default_marker`].
    #[inline]
    #[must_use]
    pub fn with_marker(mut self, capability: Capability, marker: Marker) -> Self {
        self.markers.insert(capability, marker);
        self
    }
}

impl CapabilityRegistry for Services {
    #[inline]
    fn is_available(&self, facility: Facility) -> bool {
        self.available.contains(&facility)
    }

    #[inline]
    fn marker_type_for(&self, capability: Capability) -> Marker {
        self.markers
            .get(&capability)
            .copied()
            .unwrap_or_else(|| capability.default_marker())
    }
}
