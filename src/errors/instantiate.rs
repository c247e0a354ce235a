use crate::{any::TypeInfo, model::CallableId};

/// Error returned by a constructor or method body.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Argument {position} wasn't supplied")]
    MissingArgument { position: usize },
    #[error("Argument {position} has an incorrect type, expected: {expected}")]
    IncorrectArgument { position: usize, expected: TypeInfo },
    #[error("Instance method {method} called without a receiver")]
    MissingReceiver { method: CallableId },
    #[error("Static method {method} called with a receiver")]
    UnexpectedReceiver { method: CallableId },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
