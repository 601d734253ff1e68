//! Assemblers for functions, constants, methods, properties and arguments.

use folio_core::{
    collection::OwnedList,
    descriptor::{
        ArgumentDescriptor, ConstantDescriptor, DescriptorBase, DescriptorKind,
        FunctionDescriptor, MethodDescriptor, PropertyDescriptor, TagKind,
    },
    fqsen::{Fqsen, MEMBER_SEPARATOR},
};

use crate::{
    ProjectDescriptorBuilder,
    assembler::{
        Assembler, Built, Reflected, ReflectionKind, docblock::element_base, unexpected_input,
    },
    error::Result,
    reflection,
};

/// Builds the arguments of a function or method and copies the description
/// and type of the matching `@param` tag onto each one.
fn assemble_arguments(
    arguments: &[reflection::Argument],
    base: &DescriptorBase,
    builder: &ProjectDescriptorBuilder,
) -> Result<OwnedList<ArgumentDescriptor>> {
    let mut assembled = OwnedList::new();
    for argument in arguments {
        let Some(mut descriptor) = builder.build::<ArgumentDescriptor>(Reflected::Argument(argument))?
        else {
            continue;
        };

        let param = base.tags().get("param").iter().find(|tag| {
            matches!(tag.kind(), TagKind::Param { variable, .. } if variable == descriptor.name())
        });
        if let Some(param) = param {
            descriptor.set_description(param.description());
            if let TagKind::Param { types, .. } = param.kind() {
                if descriptor.types().is_none() && !types.is_empty() {
                    descriptor.set_types(Some(types.clone()));
                }
            }
        }
        assembled.push(descriptor);
    }
    Ok(assembled)
}

pub struct ArgumentAssembler;

impl Assembler for ArgumentAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Argument
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Argument
    }

    fn create(&self, data: Reflected<'_>, _: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Argument(argument) = data else {
            return Err(unexpected_input(self, data));
        };

        let mut descriptor = ArgumentDescriptor::new(&argument.name);
        descriptor.set_types(argument.types.clone());
        descriptor.set_default_value(argument.default.clone());
        descriptor.set_by_reference(argument.by_reference);
        descriptor.set_variadic(argument.variadic);
        Ok(Built::Argument(descriptor))
    }
}

pub struct FunctionAssembler;

impl Assembler for FunctionAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Function
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Function
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Function(function) = data else {
            return Err(unexpected_input(self, data));
        };

        let fqsen = Fqsen::new(&function.fqsen)?;
        let base = element_base(fqsen, function.line, function.docblock.as_ref(), builder)?;
        let arguments = assemble_arguments(&function.arguments, &base, builder)?;

        let mut descriptor = FunctionDescriptor::new(base);
        *descriptor.arguments_mut() = arguments;
        descriptor.set_return_type(function.return_type.clone());
        Ok(Built::Function(descriptor))
    }
}

pub struct ConstantAssembler;

impl Assembler for ConstantAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Constant
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Constant
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Constant(constant) = data else {
            return Err(unexpected_input(self, data));
        };

        let fqsen = Fqsen::new(&constant.fqsen)?;
        let base = element_base(fqsen, constant.line, constant.docblock.as_ref(), builder)?;

        let mut descriptor = ConstantDescriptor::new(base, constant.value.as_str());
        descriptor.set_visibility(constant.visibility);
        descriptor.set_final(constant.is_final);
        Ok(Built::Constant(descriptor))
    }
}

pub struct MethodAssembler;

impl Assembler for MethodAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Method
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Method
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Method(method) = data else {
            return Err(unexpected_input(self, data));
        };

        let fqsen = Fqsen::new(&method.fqsen)?;
        let base = element_base(fqsen, method.line, method.docblock.as_ref(), builder)?;
        let arguments = assemble_arguments(&method.arguments, &base, builder)?;

        let mut descriptor = MethodDescriptor::new(base);
        descriptor.set_visibility(method.visibility);
        descriptor.set_abstract(method.is_abstract);
        descriptor.set_final(method.is_final);
        descriptor.set_static(method.is_static);
        *descriptor.arguments_mut() = arguments;
        descriptor.set_return_type(method.return_type.clone());
        Ok(Built::Method(descriptor))
    }
}

pub struct PropertyAssembler;

impl Assembler for PropertyAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Property
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Property
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Property(property) = data else {
            return Err(unexpected_input(self, data));
        };

        // The element itself is named without `$`; only its index key keeps it.
        let member_marker = format!("{MEMBER_SEPARATOR}$");
        let fqsen = Fqsen::new(&property.fqsen.replacen(&member_marker, MEMBER_SEPARATOR, 1))?;
        let base = element_base(fqsen, property.line, property.docblock.as_ref(), builder)?;

        let types = property.types.clone().or_else(|| {
            base.tags().get("var").iter().find_map(|tag| match tag.kind() {
                TagKind::Var { types, .. } if !types.is_empty() => Some(types.clone()),
                _ => None,
            })
        });

        let mut descriptor = PropertyDescriptor::new(base);
        descriptor.set_visibility(property.visibility);
        descriptor.set_static(property.is_static);
        descriptor.set_readonly(property.is_readonly);
        descriptor.set_types(types);
        descriptor.set_default_value(property.default.clone());
        Ok(Built::Property(descriptor))
    }
}

#[cfg(test)]
mod tests {
    use folio_core::descriptor::{Descriptor, Visibility};

    use super::*;
    use crate::reflection::{Argument, DocBlock, Tag};

    #[test]
    fn test_method_arguments_pick_up_param_tags() {
        let builder = ProjectDescriptorBuilder::new();
        let method = reflection::Method {
            fqsen: "\\App\\User::rename()".to_string(),
            line: 20,
            visibility: Visibility::Protected,
            docblock: Some(DocBlock {
                summary: "Renames the user.".to_string(),
                tags: vec![Tag::new("param", "string $name The new name")],
                ..DocBlock::default()
            }),
            arguments: vec![Argument {
                name: "$name".to_string(),
                ..Argument::default()
            }],
            ..reflection::Method::default()
        };

        let descriptor = builder
            .build::<MethodDescriptor>(Reflected::Method(&method))
            .unwrap()
            .unwrap();

        assert_eq!(descriptor.base().name(), "rename");
        assert_eq!(descriptor.visibility(), Some(Visibility::Protected));
        let argument = descriptor.arguments().get(0).unwrap();
        assert_eq!(argument.name(), "name");
        assert_eq!(argument.description(), "The new name");
        assert_eq!(argument.types(), Some("string"));
    }

    #[test]
    fn test_property_fqsen_drops_dollar() {
        let builder = ProjectDescriptorBuilder::new();
        let property = reflection::Property {
            fqsen: "\\App\\User::$email".to_string(),
            docblock: Some(DocBlock {
                summary: "The address.".to_string(),
                tags: vec![Tag::new("var", "string")],
                ..DocBlock::default()
            }),
            ..reflection::Property::default()
        };

        let descriptor = builder
            .build::<PropertyDescriptor>(Reflected::Property(&property))
            .unwrap()
            .unwrap();

        assert_eq!(descriptor.base().fqsen().unwrap().as_string(), "\\App\\User::email");
        assert_eq!(descriptor.base().name(), "email");
        assert_eq!(descriptor.types(), Some("string"));
    }

    #[test]
    fn test_invalid_fqsen_is_an_error() {
        let builder = ProjectDescriptorBuilder::new();
        let function = reflection::Function {
            fqsen: "not a name".to_string(),
            ..reflection::Function::default()
        };

        let result = builder.build::<FunctionDescriptor>(Reflected::Function(&function));
        assert!(result.is_err());
    }
}
