#![no_std]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod bean;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod factory;
pub(crate) mod hooks;
pub(crate) mod injection_point;
pub(crate) mod instantiator;
pub(crate) mod lookup;
pub(crate) mod manager;
pub(crate) mod marker;
pub(crate) mod services;
pub(crate) mod types;

pub mod model;

pub use any::{Instance, TypeInfo};
pub use bean::{Bean, BeanRef};
pub use config::Config;
pub use errors::{DefinitionErrorKind, InstantiateErrorKind, InstantiatorErrorKind, ResolveErrorKind};
pub use factory::InjectionPointFactory;
pub use hooks::{ExtensionHooks, InjectionPointObserver, ObserverChain};
pub use injection_point::{
    ConstructorInjectionPoint, FieldInjectionPoint, InjectionPoint, InjectionPointAttributes, MemberKind, MethodInjectionPoint,
    ParameterInjectionPoint, ParameterRole,
};
pub use instantiator::{DefaultInstantiator, Instantiator};
pub use lookup::{Context, LookupContext};
pub use manager::Manager;
pub use marker::{
    Delegate, Disposes, Ejb, Inject, Marker, Named, Observes, PersistenceContext, PersistenceUnit, Produces, Qualifier, Resource,
};
pub use services::{Capability, CapabilityRegistry, Facility, Services};
pub use types::{RequiredType, TypeBindings};
