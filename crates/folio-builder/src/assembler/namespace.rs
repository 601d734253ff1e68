use folio_core::{
    descriptor::{Descriptor, DescriptorKind, NamespaceDescriptor},
    fqsen::Fqsen,
};

use crate::{
    ProjectDescriptorBuilder,
    assembler::{
        Assembler, Built, Reflected, ReflectionKind, docblock::assemble_docblock, unexpected_input,
    },
    error::Result,
};

pub struct NamespaceAssembler;

impl Assembler for NamespaceAssembler {
    fn input(&self) -> ReflectionKind {
        ReflectionKind::Namespace
    }

    fn output(&self) -> DescriptorKind {
        DescriptorKind::Namespace
    }

    fn create(&self, data: Reflected<'_>, builder: &ProjectDescriptorBuilder) -> Result<Built> {
        let Reflected::Namespace(namespace) = data else {
            return Err(unexpected_input(self, data));
        };

        let fqsen = match namespace.fqsen.as_str() {
            "" => Fqsen::root(),
            name => Fqsen::new(name)?,
        };
        let mut descriptor = NamespaceDescriptor::new(fqsen);
        assemble_docblock(descriptor.base_mut(), namespace.docblock.as_ref(), builder)?;
        Ok(Built::Namespace(descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::Namespace;

    #[test]
    fn test_empty_namespace_is_root() {
        let builder = ProjectDescriptorBuilder::new();
        let namespace = Namespace::default();

        let descriptor = builder
            .build::<NamespaceDescriptor>(Reflected::Namespace(&namespace))
            .unwrap()
            .unwrap();

        assert!(descriptor.base().fqsen().unwrap().is_root());
    }
}
