use alloc::{collections::BTreeMap, vec::Vec};
use core::fmt::{self, Display, Formatter};

use crate::any::TypeInfo;

/// Type variable name to the type bound to it.
pub type TypeBindings = BTreeMap<&'static str, RequiredType>;

/// Type an injection point requires, as declared on a field or parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RequiredType {
    Class(TypeInfo),
    Parameterized { raw: TypeInfo, arguments: Vec<RequiredType> },
    Variable(&'static str),
}

impl RequiredType {
    #[inline]
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Class(TypeInfo::of::<T>())
    }

    #[inline]
    #[must_use]
    pub fn parameterized<T: ?Sized + 'static>(arguments: impl IntoIterator<Item = RequiredType>) -> Self {
        Self::Parameterized {
            raw: TypeInfo::of::<T>(),
            arguments: arguments.into_iter().collect(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn variable(name: &'static str) -> Self {
        Self::Variable(name)
    }

    /// Raw type, `None` for a type variable.
    #[must_use]
    pub const fn raw(&self) -> Option<TypeInfo> {
        match self {
            Self::Class(raw) | Self::Parameterized { raw, .. } => Some(*raw),
            Self::Variable(_) => None,
        }
    }

    /// Substitutes bound type variables, recursively. Unbound variables are kept as is.
    #[must_use]
    pub fn resolve(&self, bindings: &TypeBindings) -> Self {
        match self {
            Self::Class(_) => self.clone(),
            Self::Parameterized { raw, arguments } => Self::Parameterized {
                raw: *raw,
                arguments: arguments.iter().map(|argument| argument.resolve(bindings)).collect(),
            },
            Self::Variable(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Class(_) => true,
            Self::Parameterized { arguments, .. } => arguments.iter().all(Self::is_resolved),
            Self::Variable(_) => false,
        }
    }
}

impl Display for RequiredType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(raw) => write!(f, "{raw}"),
            Self::Parameterized { raw, arguments } => {
                write!(f, "{raw}<")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(">")
            }
            Self::Variable(name) => f.write_str(name),
        }
    }
}
