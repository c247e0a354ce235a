use core::any::TypeId;

use super::{DefinitionErrorKind, InstantiateErrorKind, ResolveErrorKind};
use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum InstantiatorErrorKind {
    #[error(transparent)]
    Definition(#[from] DefinitionErrorKind),
    #[error("Argument {position} can't be resolved: {source}")]
    Deps { position: usize, source: ResolveErrorKind },
    #[error(transparent)]
    Factory(#[from] InstantiateErrorKind),
    #[error("Incorrect instance type. Actual: {actual:?}, expected: {expected}")]
    IncorrectType { expected: TypeInfo, actual: TypeId },
}
