//! Classes, interfaces, traits and enums.
//!
//! Each of these owns its members. Relations to other structural elements
//! (`extends`, `implements`, `use`) start out as [`Reference::Unresolved`]
//! and are linked by the class and interface tree builders.

use crate::{
    collection::OwnedList,
    descriptor::{
        ConstantDescriptor, DescriptorBase, DescriptorKind, Element, MethodDescriptor,
        PropertyDescriptor, impl_descriptor,
    },
    reference::{Reference, Shared},
};

#[derive(Debug, Default)]
pub struct ClassDescriptor {
    base: DescriptorBase,
    parent: Option<Reference<ClassDescriptor>>,
    interfaces: Vec<Reference<InterfaceDescriptor>>,
    used_traits: Vec<Reference<TraitDescriptor>>,
    is_abstract: bool,
    is_final: bool,
    is_readonly: bool,
    constants: OwnedList<Shared<ConstantDescriptor>>,
    properties: OwnedList<Shared<PropertyDescriptor>>,
    methods: OwnedList<Shared<MethodDescriptor>>,
}

impl_descriptor!(ClassDescriptor, DescriptorKind::Class);

impl ClassDescriptor {
    pub fn new(base: DescriptorBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// The class this one extends, if any.
    pub fn parent(&self) -> Option<&Reference<ClassDescriptor>> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: Reference<ClassDescriptor>) {
        self.parent = Some(parent);
    }

    pub fn interfaces(&self) -> &[Reference<InterfaceDescriptor>] {
        &self.interfaces
    }

    pub fn interfaces_mut(&mut self) -> &mut Vec<Reference<InterfaceDescriptor>> {
        &mut self.interfaces
    }

    pub fn used_traits(&self) -> &[Reference<TraitDescriptor>] {
        &self.used_traits
    }

    pub fn used_traits_mut(&mut self) -> &mut Vec<Reference<TraitDescriptor>> {
        &mut self.used_traits
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

    pub fn is_readonly(&self) -> bool {
        self.is_readonly
    }

    pub fn set_readonly(&mut self, is_readonly: bool) {
        self.is_readonly = is_readonly;
    }

    pub fn constants(&self) -> &OwnedList<Shared<ConstantDescriptor>> {
        &self.constants
    }

    pub fn constants_mut(&mut self) -> &mut OwnedList<Shared<ConstantDescriptor>> {
        &mut self.constants
    }

    pub fn properties(&self) -> &OwnedList<Shared<PropertyDescriptor>> {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut OwnedList<Shared<PropertyDescriptor>> {
        &mut self.properties
    }

    pub fn methods(&self) -> &OwnedList<Shared<MethodDescriptor>> {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut OwnedList<Shared<MethodDescriptor>> {
        &mut self.methods
    }

    /// Constants, properties and methods as elements.
    pub fn members(&self) -> Vec<Element> {
        members(&self.constants, &self.properties, &self.methods)
    }
}

#[derive(Debug, Default)]
pub struct InterfaceDescriptor {
    base: DescriptorBase,
    parents: Vec<Reference<InterfaceDescriptor>>,
    constants: OwnedList<Shared<ConstantDescriptor>>,
    methods: OwnedList<Shared<MethodDescriptor>>,
}

impl_descriptor!(InterfaceDescriptor, DescriptorKind::Interface);

impl InterfaceDescriptor {
    pub fn new(base: DescriptorBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// The interfaces this one extends.
    pub fn parents(&self) -> &[Reference<InterfaceDescriptor>] {
        &self.parents
    }

    pub fn parents_mut(&mut self) -> &mut Vec<Reference<InterfaceDescriptor>> {
        &mut self.parents
    }

    pub fn constants(&self) -> &OwnedList<Shared<ConstantDescriptor>> {
        &self.constants
    }

    pub fn constants_mut(&mut self) -> &mut OwnedList<Shared<ConstantDescriptor>> {
        &mut self.constants
    }

    pub fn methods(&self) -> &OwnedList<Shared<MethodDescriptor>> {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut OwnedList<Shared<MethodDescriptor>> {
        &mut self.methods
    }

    pub fn members(&self) -> Vec<Element> {
        members(&self.constants, &OwnedList::new(), &self.methods)
    }
}

#[derive(Debug, Default)]
pub struct TraitDescriptor {
    base: DescriptorBase,
    used_traits: Vec<Reference<TraitDescriptor>>,
    constants: OwnedList<Shared<ConstantDescriptor>>,
    properties: OwnedList<Shared<PropertyDescriptor>>,
    methods: OwnedList<Shared<MethodDescriptor>>,
}

impl_descriptor!(TraitDescriptor, DescriptorKind::Trait);

impl TraitDescriptor {
    pub fn new(base: DescriptorBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn used_traits(&self) -> &[Reference<TraitDescriptor>] {
        &self.used_traits
    }

    pub fn used_traits_mut(&mut self) -> &mut Vec<Reference<TraitDescriptor>> {
        &mut self.used_traits
    }

    pub fn constants(&self) -> &OwnedList<Shared<ConstantDescriptor>> {
        &self.constants
    }

    pub fn constants_mut(&mut self) -> &mut OwnedList<Shared<ConstantDescriptor>> {
        &mut self.constants
    }

    pub fn properties(&self) -> &OwnedList<Shared<PropertyDescriptor>> {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut OwnedList<Shared<PropertyDescriptor>> {
        &mut self.properties
    }

    pub fn methods(&self) -> &OwnedList<Shared<MethodDescriptor>> {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut OwnedList<Shared<MethodDescriptor>> {
        &mut self.methods
    }

    pub fn members(&self) -> Vec<Element> {
        members(&self.constants, &self.properties, &self.methods)
    }
}

#[derive(Debug, Default)]
pub struct EnumDescriptor {
    base: DescriptorBase,
    backed_type: Option<String>,
    interfaces: Vec<Reference<InterfaceDescriptor>>,
    used_traits: Vec<Reference<TraitDescriptor>>,
    cases: OwnedList<Shared<EnumCaseDescriptor>>,
    constants: OwnedList<Shared<ConstantDescriptor>>,
    methods: OwnedList<Shared<MethodDescriptor>>,
}

impl_descriptor!(EnumDescriptor, DescriptorKind::Enum);

impl EnumDescriptor {
    pub fn new(base: DescriptorBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// The scalar type of a backed enum (`int` or `string`).
    pub fn backed_type(&self) -> Option<&str> {
        self.backed_type.as_deref()
    }

    pub fn set_backed_type(&mut self, backed_type: Option<String>) {
        self.backed_type = backed_type;
    }

    pub fn interfaces(&self) -> &[Reference<InterfaceDescriptor>] {
        &self.interfaces
    }

    pub fn interfaces_mut(&mut self) -> &mut Vec<Reference<InterfaceDescriptor>> {
        &mut self.interfaces
    }

    pub fn used_traits(&self) -> &[Reference<TraitDescriptor>] {
        &self.used_traits
    }

    pub fn used_traits_mut(&mut self) -> &mut Vec<Reference<TraitDescriptor>> {
        &mut self.used_traits
    }

    pub fn cases(&self) -> &OwnedList<Shared<EnumCaseDescriptor>> {
        &self.cases
    }

    pub fn cases_mut(&mut self) -> &mut OwnedList<Shared<EnumCaseDescriptor>> {
        &mut self.cases
    }

    pub fn constants(&self) -> &OwnedList<Shared<ConstantDescriptor>> {
        &self.constants
    }

    pub fn constants_mut(&mut self) -> &mut OwnedList<Shared<ConstantDescriptor>> {
        &mut self.constants
    }

    pub fn methods(&self) -> &OwnedList<Shared<MethodDescriptor>> {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut OwnedList<Shared<MethodDescriptor>> {
        &mut self.methods
    }

    /// Cases, constants and methods as elements.
    pub fn members(&self) -> Vec<Element> {
        let mut elements: Vec<Element> = self.cases.iter().cloned().map(Element::from).collect();
        elements.extend(members(&self.constants, &OwnedList::new(), &self.methods));
        elements
    }
}

#[derive(Debug, Default)]
pub struct EnumCaseDescriptor {
    base: DescriptorBase,
    value: Option<String>,
}

impl_descriptor!(EnumCaseDescriptor, DescriptorKind::EnumCase);

impl EnumCaseDescriptor {
    pub fn new(base: DescriptorBase, value: Option<String>) -> Self {
        Self { base, value }
    }

    /// The backing value of the case, if the enum is backed.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

fn members(
    constants: &OwnedList<Shared<ConstantDescriptor>>,
    properties: &OwnedList<Shared<PropertyDescriptor>>,
    methods: &OwnedList<Shared<MethodDescriptor>>,
) -> Vec<Element> {
    constants
        .iter()
        .cloned()
        .map(Element::from)
        .chain(properties.iter().cloned().map(Element::from))
        .chain(methods.iter().cloned().map(Element::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{descriptor::Descriptor, fqsen::Fqsen, reference::shared};

    fn base(fqsen: &str) -> DescriptorBase {
        let fqsen = Fqsen::new(fqsen).unwrap();
        DescriptorBase::new(fqsen.name(), Some(fqsen))
    }

    #[test]
    fn test_class_members_order() {
        let mut class = ClassDescriptor::new(base("\\A"));
        class
            .methods_mut()
            .push(shared(MethodDescriptor::new(base("\\A::run()"))));
        class
            .constants_mut()
            .push(shared(ConstantDescriptor::new(base("\\A::LIMIT"), "10")));
        class
            .properties_mut()
            .push(shared(PropertyDescriptor::new(base("\\A::name"))));

        let kinds: Vec<_> = class.members().iter().map(Element::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DescriptorKind::Constant,
                DescriptorKind::Property,
                DescriptorKind::Method
            ]
        );
    }

    #[test]
    fn test_parent_reference_starts_unresolved() {
        let mut class = ClassDescriptor::new(base("\\A\\Child"));
        let parent = Fqsen::new("\\A\\Base").unwrap();
        class.set_parent(Reference::Unresolved(parent));

        assert_eq!(class.parent().unwrap().unresolved(), Some(parent));
        assert_eq!(class.kind(), DescriptorKind::Class);
    }

    #[test]
    fn test_enum_members_start_with_cases() {
        let mut enum_ = EnumDescriptor::new(base("\\Suit"));
        enum_.set_backed_type(Some("string".to_string()));
        enum_
            .cases_mut()
            .push(shared(EnumCaseDescriptor::new(base("\\Suit::Hearts"), Some("H".to_string()))));

        let members = enum_.members();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].kind(), DescriptorKind::EnumCase);
        assert_eq!(enum_.backed_type(), Some("string"));
    }
}
