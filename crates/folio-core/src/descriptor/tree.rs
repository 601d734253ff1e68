//! Namespace and package trees.
//!
//! Both trees are views over the elements owned by files: a node lists the
//! elements that belong to it per kind and links to its parent and children.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    collection::Index,
    descriptor::{
        ClassDescriptor, ConstantDescriptor, DescriptorBase, DescriptorKind, Element,
        EnumDescriptor, FileDescriptor, FunctionDescriptor, InterfaceDescriptor,
        TraitDescriptor, impl_descriptor,
    },
    fqsen::Fqsen,
    reference::Shared,
};

/// Elements grouped by kind, as listed under a namespace or package.
#[derive(Debug, Default)]
pub struct ElementViews {
    pub classes: Vec<Shared<ClassDescriptor>>,
    pub interfaces: Vec<Shared<InterfaceDescriptor>>,
    pub traits: Vec<Shared<TraitDescriptor>>,
    pub enums: Vec<Shared<EnumDescriptor>>,
    pub functions: Vec<Shared<FunctionDescriptor>>,
    pub constants: Vec<Shared<ConstantDescriptor>>,
    pub files: Vec<Shared<FileDescriptor>>,
}

impl ElementViews {
    /// Lists `element` under its kind. Returns `false` for kinds that are
    /// not listed in trees (members, namespaces, packages).
    pub fn add(&mut self, element: &Element) -> bool {
        match element {
            Element::Class(class) => self.classes.push(Rc::clone(class)),
            Element::Interface(interface) => self.interfaces.push(Rc::clone(interface)),
            Element::Trait(trait_) => self.traits.push(Rc::clone(trait_)),
            Element::Enum(enum_) => self.enums.push(Rc::clone(enum_)),
            Element::Function(function) => self.functions.push(Rc::clone(function)),
            Element::Constant(constant) => self.constants.push(Rc::clone(constant)),
            Element::File(file) => self.files.push(Rc::clone(file)),
            _ => return false,
        }
        true
    }

    pub fn len(&self) -> usize {
        self.classes.len()
            + self.interfaces.len()
            + self.traits.len()
            + self.enums.len()
            + self.functions.len()
            + self.constants.len()
            + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

macro_rules! tree_node {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            base: DescriptorBase,
            parent: Option<Weak<RefCell<$name>>>,
            children: Index<String, Shared<$name>>,
            elements: ElementViews,
        }

        impl_descriptor!($name, $kind);

        impl $name {
            /// Creates a node named after the last segment of `fqsen`.
            pub fn new(fqsen: Fqsen) -> Self {
                Self {
                    base: DescriptorBase::new(fqsen.name(), Some(fqsen)),
                    ..Self::default()
                }
            }

            /// The root node, `\`.
            pub fn root() -> Self {
                Self::new(Fqsen::root())
            }

            pub fn parent(&self) -> Option<Shared<$name>> {
                self.parent.as_ref().and_then(Weak::upgrade)
            }

            pub fn set_parent(&mut self, parent: &Shared<$name>) {
                self.parent = Some(Rc::downgrade(parent));
            }

            /// Child nodes keyed by their simple name.
            pub fn children(&self) -> &Index<String, Shared<$name>> {
                &self.children
            }

            pub fn children_mut(&mut self) -> &mut Index<String, Shared<$name>> {
                &mut self.children
            }

            pub fn elements(&self) -> &ElementViews {
                &self.elements
            }

            pub fn elements_mut(&mut self) -> &mut ElementViews {
                &mut self.elements
            }

            /// Drops the tree links and element views of this node.
            pub fn reset(&mut self) {
                self.parent = None;
                self.children.clear();
                self.elements.clear();
            }
        }
    };
}

tree_node!(
    /// A node of the namespace tree.
    NamespaceDescriptor,
    DescriptorKind::Namespace
);

tree_node!(
    /// A node of the package tree; packages also list files.
    PackageDescriptor,
    DescriptorKind::Package
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{descriptor::Descriptor, reference::shared};

    #[test]
    fn test_node_name_is_last_segment() {
        let namespace = NamespaceDescriptor::new(Fqsen::new("\\App\\Model").unwrap());
        assert_eq!(namespace.base().name(), "Model");
        assert_eq!(NamespaceDescriptor::root().base().name(), "");
    }

    #[test]
    fn test_views_only_accept_top_level_kinds() {
        let mut views = ElementViews::default();
        let class = Element::Class(shared(ClassDescriptor::default()));
        let namespace = Element::Namespace(shared(NamespaceDescriptor::root()));

        assert!(views.add(&class));
        assert!(!views.add(&namespace));
        assert_eq!(views.len(), 1);
    }

    #[test]
    fn test_reset_clears_links() {
        let root = shared(PackageDescriptor::root());
        let child = shared(PackageDescriptor::new(Fqsen::new("\\App").unwrap()));
        child.borrow_mut().set_parent(&root);
        root.borrow_mut()
            .children_mut()
            .set("App".to_string(), Rc::clone(&child))
            .unwrap();

        root.borrow_mut().reset();
        child.borrow_mut().reset();

        assert!(root.borrow().children().is_empty());
        assert!(child.borrow().parent().is_none());
        assert_eq!(child.borrow().kind(), DescriptorKind::Package);
    }
}
