use alloc::{collections::BTreeSet, sync::Arc, vec::Vec};
use core::fmt::{self, Debug, Formatter};

use super::member::{Annotated, CallableId, CallableKind, Declaration, ParameterInfo};
use crate::{
    any::{Instance, TypeInfo},
    errors::InstantiateErrorKind,
    marker::Marker,
};

pub type ConstructorFn = Arc<dyn Fn(Arguments) -> Result<Instance, InstantiateErrorKind> + Send + Sync>;
pub type MethodFn = Arc<dyn Fn(Option<&Instance>, Arguments) -> Result<Option<Instance>, InstantiateErrorKind> + Send + Sync>;

/// Resolved argument values, in parameter order.
#[derive(Clone, Default)]
pub struct Arguments(Vec<Instance>);

impl Arguments {
    #[inline]
    #[must_use]
    pub const fn new(values: Vec<Instance>) -> Self {
        Self(values)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the argument at `position` downcasted to `T`.
    ///
    /// # Errors
    /// - Returns [`InstantiateErrorKind::MissingArgument`] if there is no argument at `position`
    /// - Returns [`InstantiateErrorKind::IncorrectArgument`] if the argument isn't a `T`
    pub fn get<T: Send + Sync + 'static>(&self, position: usize) -> Result<Arc<T>, InstantiateErrorKind> {
        let value = self.0.get(position).ok_or(InstantiateErrorKind::MissingArgument { position })?;
        value.clone().downcast::<T>().map_err(|_| InstantiateErrorKind::IncorrectArgument {
            position,
            expected: TypeInfo::of::<T>(),
        })
    }

}

impl Debug for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments").field("len", &self.0.len()).finish()
    }
}

/// Callable whose parameters may be injection points.
pub trait Callable: Annotated {
    fn id(&self) -> CallableId;

    fn parameters(&self) -> &[ParameterInfo];
}

fn append_parameter(id: CallableId, parameters: &mut Vec<ParameterInfo>, declaration: Declaration) {
    let position = parameters.len();
    parameters.push(ParameterInfo::new(id, position, declaration));
}

fn redeclare_parameters(id: CallableId, parameters: Vec<ParameterInfo>) -> Vec<ParameterInfo> {
    parameters
        .into_iter()
        .map(|parameter| ParameterInfo::new(id, parameter.position(), parameter.declaration().clone()))
        .collect()
}

#[derive(Clone)]
pub struct ConstructorInfo {
    id: CallableId,
    parameters: Vec<ParameterInfo>,
    markers: BTreeSet<Marker>,
    body: ConstructorFn,
}

impl ConstructorInfo {
    /// Constructor of `T` named `name`.
    #[must_use]
    pub fn new<T, F>(name: &'static str, body: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(Arguments) -> Result<T, InstantiateErrorKind> + Send + Sync + 'static,
    {
        Self::with_body(
            TypeInfo::of::<T>(),
            name,
            Arc::new(move |arguments: Arguments| -> Result<Instance, InstantiateErrorKind> { Ok(Arc::new(body(arguments)?) as Instance) }),
        )
    }

    #[must_use]
    pub fn with_body(declaring_type: TypeInfo, name: &'static str, body: ConstructorFn) -> Self {
        Self {
            id: CallableId {
                declaring_type,
                name,
                kind: CallableKind::Constructor,
            },
            parameters: Vec::new(),
            markers: BTreeSet::new(),
            body,
        }
    }

    #[inline]
    #[must_use]
    pub fn parameter(mut self, declaration: Declaration) -> Self {
        append_parameter(self.id, &mut self.parameters, declaration);
        self
    }

    #[inline]
    #[must_use]
    pub fn marked<M: 'static>(mut self) -> Self {
        self.markers.insert(Marker::of::<M>());
        self
    }

    #[inline]
    #[must_use]
    pub const fn declaring_type(&self) -> TypeInfo {
        self.id.declaring_type
    }

    /// Moves the constructor and its parameters onto `declaring_type`.
    #[must_use]
    pub(crate) fn declared_on(mut self, declaring_type: TypeInfo) -> Self {
        self.id.declaring_type = declaring_type;
        self.parameters = redeclare_parameters(self.id, self.parameters);
        self
    }

    #[inline]
    #[must_use]
    pub fn is_parameterless(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Calls the constructor body.
    ///
    /// # Errors
    /// Returns the error of the constructor body
    #[inline]
    pub fn invoke(&self, arguments: Arguments) -> Result<Instance, InstantiateErrorKind> {
        (self.body)(arguments)
    }
}

impl Annotated for ConstructorInfo {
    #[inline]
    fn markers(&self) -> &BTreeSet<Marker> {
        &self.markers
    }
}

impl Callable for ConstructorInfo {
    #[inline]
    fn id(&self) -> CallableId {
        self.id
    }

    #[inline]
    fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }
}

impl Debug for ConstructorInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("id", &self.id)
            .field("parameters", &self.parameters)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct MethodInfo {
    id: CallableId,
    parameters: Vec<ParameterInfo>,
    markers: BTreeSet<Marker>,
    is_static: bool,
    body: MethodFn,
}

impl MethodInfo {
    #[must_use]
    pub fn new<F>(declaring_type: TypeInfo, name: &'static str, body: F) -> Self
    where
        F: Fn(Option<&Instance>, Arguments) -> Result<Option<Instance>, InstantiateErrorKind> + Send + Sync + 'static,
    {
        Self {
            id: CallableId {
                declaring_type,
                name,
                kind: CallableKind::Method,
            },
            parameters: Vec::new(),
            markers: BTreeSet::new(),
            is_static: false,
            body: Arc::new(body),
        }
    }

    #[inline]
    #[must_use]
    pub fn parameter(mut self, declaration: Declaration) -> Self {
        append_parameter(self.id, &mut self.parameters, declaration);
        self
    }

    #[inline]
    #[must_use]
    pub fn marked<M: 'static>(mut self) -> Self {
        self.markers.insert(Marker::of::<M>());
        self
    }

    #[inline]
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.name
    }

    #[inline]
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    #[must_use]
    pub(crate) fn declared_on(mut self, declaring_type: TypeInfo) -> Self {
        self.id.declaring_type = declaring_type;
        self.parameters = redeclare_parameters(self.id, self.parameters);
        self
    }

    /// Checks that a receiver is given exactly when the method isn't static.
    ///
    /// # Errors
    /// - Returns [`InstantiateErrorKind::MissingReceiver`] if an instance method has no receiver
    /// - Returns [`InstantiateErrorKind::UnexpectedReceiver`] if a static method has one
    pub fn check_receiver(&self, receiver: Option<&Instance>) -> Result<(), InstantiateErrorKind> {
        match (self.is_static, receiver.is_some()) {
            (false, false) => Err(InstantiateErrorKind::MissingReceiver { method: self.id }),
            (true, true) => Err(InstantiateErrorKind::UnexpectedReceiver { method: self.id }),
            _ => Ok(()),
        }
    }

    /// Calls the method body on `receiver`, `None` for static methods.
    ///
    /// # Errors
    /// - Returns [`InstantiateErrorKind`] if the receiver doesn't match the method
    /// - Returns the error of the method body
    #[inline]
    pub fn invoke(&self, receiver: Option<&Instance>, arguments: Arguments) -> Result<Option<Instance>, InstantiateErrorKind> {
        self.check_receiver(receiver)?;
        (self.body)(receiver, arguments)
    }
}

impl Annotated for MethodInfo {
    #[inline]
    fn markers(&self) -> &BTreeSet<Marker> {
        &self.markers
    }
}

impl Callable for MethodInfo {
    #[inline]
    fn id(&self) -> CallableId {
        self.id
    }

    #[inline]
    fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }
}

impl Debug for MethodInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("id", &self.id)
            .field("parameters", &self.parameters)
            .field("markers", &self.markers)
            .field("is_static", &self.is_static)
            .finish_non_exhaustive()
    }
}
