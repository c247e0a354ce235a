use crate::{any::TypeInfo, model::FieldId};

/// Structural definition error. Fatal, raised by the creation call that detected it.
#[derive(thiserror::Error, Debug)]
pub enum DefinitionErrorKind {
    #[error("Injected field {field} can't be final")]
    QualifierOnFinalField { field: FieldId },
    #[error("Can't create an instantiator for an interface type {component}")]
    InstantiatorForInterface { component: TypeInfo },
    #[error("Instantiator created for an abstract type {component}")]
    AbstractInstantiation { component: TypeInfo },
    #[error("Type {component} isn't known to the type model")]
    UnknownType { component: TypeInfo },
    #[error("Type {component} has neither a constructor marked with @Inject nor a parameterless constructor")]
    NoBeanConstructor { component: TypeInfo },
    #[error("Type {component} has {count} constructors marked with @Inject, expected at most one")]
    MultipleInjectConstructors { component: TypeInfo, count: usize },
    #[error(transparent)]
    Extension(anyhow::Error),
}
