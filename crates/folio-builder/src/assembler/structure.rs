//! Assemblers for classes, interfaces, traits, enums and enum cases.

use folio_core::{
    collection::OwnedList,
    descriptor::{
        ClassDescriptor, ConstantDescriptor, DescriptorKind, EnumCaseDescriptor, EnumDescriptor,
        InterfaceDescriptor, MethodDescriptor, PropertyDescriptor, TraitDescriptor,
    },
    fqsen::Fqsen,
    reference::{Reference, Shared, shared},
};

use crate::{
    ProjectDescriptorBuilder,
    assembler::{
        Assembled, Assembler, Built, Reflected, ReflectionKind, docblock::element_base,
        unexpected_input,
    },
    error::Result,
    reflection,
};

/// Parses a list of referenced names into unresolved references.
fn references<T>(names: &[String]) -> Result<Vec<Reference<T>>> {
    names
        .iter()
        .map(|name| -> Result<Reference<T>> { Ok(Reference::from(Fqsen::new(name)?)) })
        .collect()
}

/// Builds each reflected member; members dropped by a filter are skipped.
fn members<'a, R: 'a, T: Assembled>(
    reflected: &'a [R],
    wrap: impl Fn(&'a R) -> Reflected<'a>,
    builder: &ProjectDescriptorBuilder,
) -> Result<OwnedList<Shared<T>>> {
    let mut built = OwnedList::new();
    for member in reflected {
        if let Some(descriptor) = builder.build::<T>(wrap(member))? {
            built.push(shared(descriptor));
        }
    }
    Ok(built)
}

pub struct ClassAssembler;

impl Assembler for ClassAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Class
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Class
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Class(class) = data else {
            return Err(unexpected_input(self, data));
        };

        let fqsen = Fqsen::new(&class.fqsen)?;
        let base = element_base(fqsen, class.line, class.docblock.as_ref(), builder)?;

        let mut descriptor = ClassDescriptor::new(base);
        if let Some(parent) = &class.parent {
            descriptor.set_parent(Reference::from(Fqsen::new(parent)?));
        }
        *descriptor.interfaces_mut() = references(&class.interfaces)?;
        *descriptor.used_traits_mut() = references(&class.used_traits)?;
        descriptor.set_abstract(class.is_abstract);
        descriptor.set_final(class.is_final);
        descriptor.set_readonly(class.is_readonly);
        *descriptor.constants_mut() =
            members::<_, ConstantDescriptor>(&class.constants, Reflected::Constant, builder)?;
        *descriptor.properties_mut() =
            members::<_, PropertyDescriptor>(&class.properties, Reflected::Property, builder)?;
        *descriptor.methods_mut() =
            members::<_, MethodDescriptor>(&class.methods, Reflected::Method, builder)?;

        Ok(Built::Class(descriptor))
    }
}

pub struct InterfaceAssembler;

impl Assembler for InterfaceAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Interface
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Interface
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Interface(interface) = data else {
            return Err(unexpected_input(self, data));
        };

        let fqsen = Fqsen::new(&interface.fqsen)?;
        let base = element_base(fqsen, interface.line, interface.docblock.as_ref(), builder)?;

        let mut descriptor = InterfaceDescriptor::new(base);
        *descriptor.parents_mut() = references(&interface.parents)?;
        *descriptor.constants_mut() =
            members::<_, ConstantDescriptor>(&interface.constants, Reflected::Constant, builder)?;
        *descriptor.methods_mut() =
            members::<_, MethodDescriptor>(&interface.methods, Reflected::Method, builder)?;

        Ok(Built::Interface(descriptor))
    }
}

pub struct TraitAssembler;

impl Assembler for TraitAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Trait
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Trait
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Trait(trait_) = data else {
            return Err(unexpected_input(self, data));
        };

        let fqsen = Fqsen::new(&trait_.fqsen)?;
        let base = element_base(fqsen, trait_.line, trait_.docblock.as_ref(), builder)?;

        let mut descriptor = TraitDescriptor::new(base);
        *descriptor.used_traits_mut() = references(&trait_.used_traits)?;
        *descriptor.constants_mut() =
            members::<_, ConstantDescriptor>(&trait_.constants, Reflected::Constant, builder)?;
        *descriptor.properties_mut() =
            members::<_, PropertyDescriptor>(&trait_.properties, Reflected::Property, builder)?;
        *descriptor.methods_mut() =
            members::<_, MethodDescriptor>(&trait_.methods, Reflected::Method, builder)?;

        Ok(Built::Trait(descriptor))
    }
}

pub struct EnumAssembler;

impl Assembler for EnumAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Enum
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Enum
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Enum(enum_) = data else {
            return Err(unexpected_input(self, data));
        };

        let fqsen = Fqsen::new(&enum_.fqsen)?;
        let base = element_base(fqsen, enum_.line, enum_.docblock.as_ref(), builder)?;

        let mut descriptor = EnumDescriptor::new(base);
        descriptor.set_backed_type(enum_.backed_type.clone());
        *descriptor.interfaces_mut() = references(&enum_.interfaces)?;
        *descriptor.used_traits_mut() = references(&enum_.used_traits)?;
        *descriptor.cases_mut() =
            members::<_, EnumCaseDescriptor>(&enum_.cases, Reflected::EnumCase, builder)?;
        *descriptor.constants_mut() =
            members::<_, ConstantDescriptor>(&enum_.constants, Reflected::Constant, builder)?;
        *descriptor.methods_mut() =
            members::<_, MethodDescriptor>(&enum_.methods, Reflected::Method, builder)?;

        Ok(Built::Enum(descriptor))
    }
}

pub struct EnumCaseAssembler;

impl Assembler for EnumCaseAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::EnumCase
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::EnumCase
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::EnumCase(case) = data else {
            return Err(unexpected_input(self, data));
        };

        let fqsen = Fqsen::new(&case.fqsen)?;
        let base = element_base(fqsen, case.line, case.docblock.as_ref(), builder)?;
        Ok(Built::EnumCase(EnumCaseDescriptor::new(base, case.value.clone())))
    }
}
