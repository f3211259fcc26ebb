use crate::{
    binding::{Describe, TypeDescriptor},
    constants::ARGUMENT_PREFIX,
};
use std::fmt;

/// Capability of a binding target to name itself on the wire.
///
/// The formatter asks for the hint instead of inspecting how a parameter was
/// declared, so any descriptor type can take part in binding.
pub trait NameHint {
    fn name_hint(&self) -> Option<&str>;
}

impl NameHint for Option<String> {
    fn name_hint(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// Resolves the wire prefix of the parameter at `index`.
///
/// The trimmed hint wins when it is non-blank; otherwise the prefix is
/// `argument{index}`.
pub fn binding_prefix(index: usize, hint: &dyn NameHint) -> String {
    match hint.name_hint().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{ARGUMENT_PREFIX}{index}"),
    }
}

/// One declared parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub descriptor: TypeDescriptor,
    pub name: Option<String>,
    /// Fail the bind when no key addresses this parameter.
    pub required: bool,
}

impl ParameterDescriptor {
    /// An unnamed parameter, bound as `argument{index}`.
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            name: None,
            required: false,
        }
    }

    pub fn of<T: Describe>() -> Self {
        Self::new(TypeDescriptor::of::<T>())
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl NameHint for ParameterDescriptor {
    fn name_hint(&self) -> Option<&str> {
        self.name.name_hint()
    }
}

/// The target signature a body is decoded against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub parameters: Vec<ParameterDescriptor>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn param(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.descriptor.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", self.name, parameters)
    }
}
