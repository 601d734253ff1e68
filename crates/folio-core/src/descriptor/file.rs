//! Source files and the elements they declare.

use indexmap::IndexMap;

use crate::{
    collection::OwnedList,
    descriptor::{
        ClassDescriptor, ConstantDescriptor, DescriptorBase, DescriptorKind, Element,
        EnumDescriptor, FunctionDescriptor, InterfaceDescriptor, TraitDescriptor,
        impl_descriptor,
    },
    fqsen::Fqsen,
    reference::Shared,
    validation::Diagnostic,
};

/// A `TODO`/`FIXME` style marker found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    kind: String,
    message: String,
    line: usize,
}

impl Marker {
    pub fn new(kind: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            line,
        }
    }

    /// The marker term, e.g. `TODO`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

/// A source file and everything declared in it.
///
/// The file owns its top-level elements; indexes and trees only hold shared
/// handles to them.
#[derive(Debug, Default)]
pub struct FileDescriptor {
    base: DescriptorBase,
    hash: String,
    source: Option<String>,
    namespace_aliases: IndexMap<String, Fqsen>,
    includes: Vec<String>,
    constants: OwnedList<Shared<ConstantDescriptor>>,
    functions: OwnedList<Shared<FunctionDescriptor>>,
    classes: OwnedList<Shared<ClassDescriptor>>,
    interfaces: OwnedList<Shared<InterfaceDescriptor>>,
    traits: OwnedList<Shared<TraitDescriptor>>,
    enums: OwnedList<Shared<EnumDescriptor>>,
    markers: OwnedList<Marker>,
}

impl_descriptor!(FileDescriptor, DescriptorKind::File);

impl FileDescriptor {
    /// Creates a file descriptor for `path`.
    pub fn new(path: impl Into<String>, hash: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        let mut base = DescriptorBase::new(name, None);
        base.set_path(path);
        Self {
            base,
            hash: hash.into(),
            ..Self::default()
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The raw source text; `None` when not loaded or removed.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: Option<String>) {
        self.source = source;
    }

    /// `use` imports of the file: alias → imported FQSEN.
    pub fn namespace_aliases(&self) -> &IndexMap<String, Fqsen> {
        &self.namespace_aliases
    }

    pub fn add_namespace_alias(&mut self, alias: impl Into<String>, fqsen: Fqsen) {
        self.namespace_aliases.insert(alias.into(), fqsen);
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    pub fn add_include(&mut self, include: impl Into<String>) {
        self.includes.push(include.into());
    }

    pub fn constants(&self) -> &OwnedList<Shared<ConstantDescriptor>> {
        &self.constants
    }

    pub fn constants_mut(&mut self) -> &mut OwnedList<Shared<ConstantDescriptor>> {
        &mut self.constants
    }

    pub fn functions(&self) -> &OwnedList<Shared<FunctionDescriptor>> {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut OwnedList<Shared<FunctionDescriptor>> {
        &mut self.functions
    }

    pub fn classes(&self) -> &OwnedList<Shared<ClassDescriptor>> {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut OwnedList<Shared<ClassDescriptor>> {
        &mut self.classes
    }

    pub fn interfaces(&self) -> &OwnedList<Shared<InterfaceDescriptor>> {
        &self.interfaces
    }

    pub fn interfaces_mut(&mut self) -> &mut OwnedList<Shared<InterfaceDescriptor>> {
        &mut self.interfaces
    }

    pub fn traits(&self) -> &OwnedList<Shared<TraitDescriptor>> {
        &self.traits
    }

    pub fn traits_mut(&mut self) -> &mut OwnedList<Shared<TraitDescriptor>> {
        &mut self.traits
    }

    pub fn enums(&self) -> &OwnedList<Shared<EnumDescriptor>> {
        &self.enums
    }

    pub fn enums_mut(&mut self) -> &mut OwnedList<Shared<EnumDescriptor>> {
        &mut self.enums
    }

    pub fn markers(&self) -> &OwnedList<Marker> {
        &self.markers
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    /// Every element declared in this file, including class members, in
    /// declaration order.
    pub fn elements(&self) -> Vec<Element> {
        let mut elements: Vec<Element> = Vec::new();
        elements.extend(self.constants.iter().cloned().map(Element::from));
        elements.extend(self.functions.iter().cloned().map(Element::from));
        for class in &self.classes {
            elements.push(Element::from(class.clone()));
            elements.extend(class.borrow().members());
        }
        for interface in &self.interfaces {
            elements.push(Element::from(interface.clone()));
            elements.extend(interface.borrow().members());
        }
        for trait_ in &self.traits {
            elements.push(Element::from(trait_.clone()));
            elements.extend(trait_.borrow().members());
        }
        for enum_ in &self.enums {
            elements.push(Element::from(enum_.clone()));
            elements.extend(enum_.borrow().members());
        }
        elements
    }

    /// Points the `file` back-reference of every owned element at `file`.
    pub fn adopt_elements(file: &Shared<FileDescriptor>) {
        let path = file.borrow().base.path().to_string();
        let elements = file.borrow().elements();
        for element in elements {
            element.with_base_mut(|base| {
                base.set_file(file);
                base.set_path(path.clone());
            });
        }
    }

    /// Diagnostics of the file itself and of every element it declares.
    pub fn all_errors(&self) -> Vec<Diagnostic> {
        let mut errors = self.base.errors().to_vec();
        for element in self.elements() {
            element.with_base(|base| errors.extend_from_slice(base.errors()));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        descriptor::{Descriptor, MethodDescriptor},
        reference::shared,
        validation::ErrorCode,
    };

    fn class_with_method() -> Shared<ClassDescriptor> {
        let class_fqsen = Fqsen::new("\\App\\User").unwrap();
        let mut class = ClassDescriptor::new(DescriptorBase::new("User", Some(class_fqsen)));
        let method_fqsen = class_fqsen.member("save()").unwrap();
        let mut method = MethodDescriptor::new(DescriptorBase::new("save", Some(method_fqsen)));
        method
            .base_mut()
            .push_error(Diagnostic::warning("missing summary").with_code(ErrorCode::W100));
        class.methods_mut().push(shared(method));
        shared(class)
    }

    #[test]
    fn test_name_is_basename() {
        let file = FileDescriptor::new("src/Model/User.php", "abc");
        assert_eq!(file.base().name(), "User.php");
        assert_eq!(file.base().path(), "src/Model/User.php");
        assert_eq!(file.hash(), "abc");
    }

    #[test]
    fn test_elements_include_members() {
        let mut file = FileDescriptor::new("User.php", "");
        file.classes_mut().push(class_with_method());

        let kinds: Vec<_> = file.elements().iter().map(Element::kind).collect();
        assert_eq!(kinds, vec![DescriptorKind::Class, DescriptorKind::Method]);
    }

    #[test]
    fn test_adopt_elements_sets_back_reference() {
        let mut file = FileDescriptor::new("User.php", "");
        file.classes_mut().push(class_with_method());
        let file = shared(file);

        FileDescriptor::adopt_elements(&file);

        for element in file.borrow().elements() {
            let owner = element.file().unwrap();
            assert!(std::rc::Rc::ptr_eq(&owner, &file));
            assert_eq!(element.with_base(|base| base.path().to_string()), "User.php");
        }
    }

    #[test]
    fn test_all_errors_collects_member_errors() {
        let mut file = FileDescriptor::new("User.php", "");
        file.classes_mut().push(class_with_method());

        let errors = file.all_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), Some(ErrorCode::W100));
    }
}
