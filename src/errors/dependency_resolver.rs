use core::any::TypeId;

use crate::{any::TypeInfo, types::RequiredType};

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("No instance satisfies required type {required_type}")]
    Unsatisfied { required_type: RequiredType },
    #[error("Incorrect resolved type. Actual: {actual:?}, expected: {expected}")]
    IncorrectType { expected: TypeInfo, actual: TypeId },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
