//! Small descriptor graphs for pass tests.

use folio_core::{
    descriptor::{
        ClassDescriptor, Descriptor, DescriptorBase, FileDescriptor, FunctionDescriptor,
        InterfaceDescriptor, MethodDescriptor, ProjectDescriptor, PropertyDescriptor,
        TagDescriptor, TraitDescriptor,
    },
    fqsen::Fqsen,
    reference::{Reference, Shared, shared},
};

use folio_builder::assembler::parse_tag;

use crate::compiler::{CompilerPass, passes::ElementsIndexBuilder};

pub fn fqsen(value: &str) -> Fqsen {
    Fqsen::new(value).unwrap()
}

/// A base named after `value` in the namespace of `value`.
pub fn base(value: &str) -> DescriptorBase {
    let fqsen = fqsen(value);
    let mut base = DescriptorBase::new(fqsen.name(), Some(fqsen));
    base.set_namespace(Reference::from(fqsen.namespace()));
    base
}

pub fn class(value: &str) -> Shared<ClassDescriptor> {
    shared(ClassDescriptor::new(base(value)))
}

pub fn interface(value: &str) -> Shared<InterfaceDescriptor> {
    shared(InterfaceDescriptor::new(base(value)))
}

pub fn trait_(value: &str) -> Shared<TraitDescriptor> {
    shared(TraitDescriptor::new(base(value)))
}

pub fn function(value: &str) -> Shared<FunctionDescriptor> {
    shared(FunctionDescriptor::new(base(value)))
}

pub fn method(value: &str) -> Shared<MethodDescriptor> {
    shared(MethodDescriptor::new(base(value)))
}

pub fn property(value: &str) -> Shared<PropertyDescriptor> {
    shared(PropertyDescriptor::new(base(value)))
}

/// Parses and adds a tag the way the builder does.
pub fn tag(base: &mut DescriptorBase, name: &str, body: &str) {
    base.tags_mut().add(parse_tag(name, body));
}

pub fn generic_tag(base: &mut DescriptorBase, name: &str, description: &str) {
    base.tags_mut().add(TagDescriptor::generic(name, description));
}

/// A project owning `files`, with back references set.
pub fn project(files: Vec<FileDescriptor>) -> ProjectDescriptor {
    let mut project = ProjectDescriptor::default();
    for file in files {
        let path = file.base().path().to_string();
        let file = shared(file);
        FileDescriptor::adopt_elements(&file);
        project.files_mut().set(path, file).unwrap();
    }
    project
}

/// A project owning `files` with its elements index built.
pub fn indexed_project(files: Vec<FileDescriptor>) -> ProjectDescriptor {
    let mut project = project(files);
    ElementsIndexBuilder.execute(&mut project).unwrap();
    project
}
