//! Assembler for files and the elements declared in them.

use folio_core::{
    collection::OwnedList,
    descriptor::{
        ClassDescriptor, ConstantDescriptor, Descriptor, DescriptorBase, DescriptorKind,
        EnumDescriptor, FileDescriptor, FunctionDescriptor, InterfaceDescriptor, TagDescriptor,
        TraitDescriptor,
    },
    fqsen::Fqsen,
    reference::{Shared, shared},
};
use log::debug;

use crate::{
    ProjectDescriptorBuilder,
    assembler::{
        Assembled, Assembler, Built, Reflected, ReflectionKind, docblock::assemble_docblock,
        unexpected_input,
    },
    error::Result,
    reflection,
};

/// Tags a top-level element inherits from its file when it has no
/// `@package` of its own.
const INHERITED_TAGS: [&str; 2] = ["package", "subpackage"];

pub struct FileAssembler;

impl FileAssembler {
    /// Builds the top-level elements of one kind and applies package
    /// inheritance to them.
    fn elements<'a, R: 'a, T: Assembled + Descriptor>(
        reflected: &'a [R],
        wrap: impl Fn(&'a R) -> Reflected<'a>,
        inherited: &[TagDescriptor],
        builder: &ProjectDescriptorBuilder,
    ) -> Result<OwnedList<Shared<T>>> {
        let mut built = OwnedList::new();
        for element in reflected {
            if let Some(mut descriptor) = builder.build::<T>(wrap(element))? {
                inherit_package(descriptor.base_mut(), inherited);
                built.push(shared(descriptor));
            }
        }
        Ok(built)
    }
}

fn inherit_package(base: &mut DescriptorBase, inherited: &[TagDescriptor]) {
    if base.tags().contains("package") {
        return;
    }
    for tag in inherited {
        base.tags_mut().add(tag.clone());
    }
}

impl Assembler for FileAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::File
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::File
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::File(file) = data else {
            return Err(unexpected_input(self, data));
        };
        debug!(path = file.path.as_str(); "Assembling file");

        let mut descriptor = FileDescriptor::new(file.path.as_str(), file.hash.as_str());
        descriptor.set_source(file.source.clone());
        assemble_docblock(descriptor.base_mut(), file.docblock.as_ref(), builder)?;

        for (alias, name) in &file.namespace_aliases {
            descriptor.add_namespace_alias(alias.as_str(), Fqsen::new(name)?);
        }
        for include in &file.includes {
            descriptor.add_include(include.as_str());
        }

        let inherited: Vec<TagDescriptor> = INHERITED_TAGS
            .iter()
            .filter_map(|name| descriptor.base().tags().first(name).cloned())
            .collect();

        *descriptor.constants_mut() = Self::elements::<_, ConstantDescriptor>(
            &file.constants,
            Reflected::Constant,
            &inherited,
            builder,
        )?;
        *descriptor.functions_mut() = Self::elements::<_, FunctionDescriptor>(
            &file.functions,
            Reflected::Function,
            &inherited,
            builder,
        )?;
        *descriptor.classes_mut() = Self::elements::<_, ClassDescriptor>(
            &file.classes,
            Reflected::Class,
            &inherited,
            builder,
        )?;
        *descriptor.interfaces_mut() = Self::elements::<_, InterfaceDescriptor>(
            &file.interfaces,
            Reflected::Interface,
            &inherited,
            builder,
        )?;
        *descriptor.traits_mut() = Self::elements::<_, TraitDescriptor>(
            &file.traits,
            Reflected::Trait,
            &inherited,
            builder,
        )?;
        *descriptor.enums_mut() =
            Self::elements::<_, EnumDescriptor>(&file.enums, Reflected::Enum, &inherited, builder)?;

        Ok(Built::File(descriptor))
    }
}
