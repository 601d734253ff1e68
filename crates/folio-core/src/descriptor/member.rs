//! Functions, constants and class members.

use crate::{
    collection::OwnedList,
    descriptor::{DescriptorBase, DescriptorKind, Visibility, impl_descriptor},
};

/// An argument of a function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    name: String,
    description: String,
    types: Option<String>,
    default: Option<String>,
    by_reference: bool,
    variadic: bool,
}

impl ArgumentDescriptor {
    /// Creates an argument; a leading `$` in `name` is dropped.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim_start_matches('$').to_string(),
            ..Self::default()
        }
    }

    /// The argument name without `$`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description taken from the matching `@param` tag.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn types(&self) -> Option<&str> {
        self.types.as_deref()
    }

    pub fn set_types(&mut self, types: Option<String>) {
        self.types = types;
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn set_default_value(&mut self, default: Option<String>) {
        self.default = default;
    }

    pub fn is_by_reference(&self) -> bool {
        self.by_reference
    }

    pub fn set_by_reference(&mut self, by_reference: bool) {
        self.by_reference = by_reference;
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn set_variadic(&mut self, variadic: bool) {
        self.variadic = variadic;
    }
}

#[derive(Debug, Default)]
pub struct FunctionDescriptor {
    base: DescriptorBase,
    arguments: OwnedList<ArgumentDescriptor>,
    return_type: Option<String>,
}

impl_descriptor!(FunctionDescriptor, DescriptorKind::Function);

impl FunctionDescriptor {
    pub fn new(base: DescriptorBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn arguments(&self) -> &OwnedList<ArgumentDescriptor> {
        &self.arguments
    }

    pub fn arguments_mut(&mut self) -> &mut OwnedList<ArgumentDescriptor> {
        &mut self.arguments
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn set_return_type(&mut self, return_type: Option<String>) {
        self.return_type = return_type;
    }
}

#[derive(Debug, Default)]
pub struct MethodDescriptor {
    base: DescriptorBase,
    visibility: Visibility,
    is_abstract: bool,
    is_final: bool,
    is_static: bool,
    arguments: OwnedList<ArgumentDescriptor>,
    return_type: Option<String>,
}

impl_descriptor!(MethodDescriptor, DescriptorKind::Method, visibility);

impl MethodDescriptor {
    pub fn new(base: DescriptorBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn set_abstract(&mut self, is_abstract: bool) {
        self.is_abstract = is_abstract;
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn set_final(&mut self, is_final: bool) {
        self.is_final = is_final;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    pub fn arguments(&self) -> &OwnedList<ArgumentDescriptor> {
        &self.arguments
    }

    pub fn arguments_mut(&mut self) -> &mut OwnedList<ArgumentDescriptor> {
        &mut self.arguments
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn set_return_type(&mut self, return_type: Option<String>) {
        self.return_type = return_type;
    }
}

#[derive(Debug, Default)]
pub struct PropertyDescriptor {
    base: DescriptorBase,
    visibility: Visibility,
    is_static: bool,
    is_readonly: bool,
    types: Option<String>,
    default: Option<String>,
}

impl_descriptor!(PropertyDescriptor, DescriptorKind::Property, visibility);

impl PropertyDescriptor {
    pub fn new(base: DescriptorBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    pub fn is_readonly(&self) -> bool {
        self.is_readonly
    }

    pub fn set_readonly(&mut self, is_readonly: bool) {
        self.is_readonly = is_readonly;
    }

    pub fn types(&self) -> Option<&str> {
        self.types.as_deref()
    }

    pub fn set_types(&mut self, types: Option<String>) {
        self.types = types;
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn set_default_value(&mut self, default: Option<String>) {
        self.default = default;
    }
}

/// A global constant or a class constant.
#[derive(Debug, Default)]
pub struct ConstantDescriptor {
    base: DescriptorBase,
    value: String,
    visibility: Option<Visibility>,
    is_final: bool,
}

impl_descriptor!(ConstantDescriptor, DescriptorKind::Constant, visibility);

impl ConstantDescriptor {
    pub fn new(base: DescriptorBase, value: impl Into<String>) -> Self {
        Self {
            base,
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Class constants carry a visibility, global constants do not.
    pub fn set_visibility(&mut self, visibility: Option<Visibility>) {
        self.visibility = visibility;
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn set_final(&mut self, is_final: bool) {
        self.is_final = is_final;
    }
}
