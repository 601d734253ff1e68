//! Handles to descriptors of any kind.
//!
//! The global `elements` index and reference-carrying tags hold descriptors
//! of mixed types. [`Element`] is a strong handle to any of them,
//! [`WeakElement`] its non-owning counterpart.

use std::{
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    descriptor::{
        ClassDescriptor, ConstantDescriptor, Descriptor, DescriptorBase, DescriptorKind,
        EnumCaseDescriptor, EnumDescriptor, FileDescriptor, FunctionDescriptor,
        InterfaceDescriptor, MethodDescriptor, NamespaceDescriptor, PackageDescriptor,
        PropertyDescriptor, TraitDescriptor, Visibility,
    },
    fqsen::Fqsen,
    reference::Shared,
};

macro_rules! define_elements {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        /// A strong handle to a descriptor of any kind.
        #[derive(Clone)]
        pub enum Element {
            $($variant(Shared<$ty>),)+
        }

        /// A non-owning handle to a descriptor of any kind.
        #[derive(Clone)]
        pub enum WeakElement {
            $($variant(Weak<std::cell::RefCell<$ty>>),)+
        }

        impl Element {
            /// Runs `f` with a shared borrow of the descriptor.
            pub fn with_descriptor<R>(&self, f: impl FnOnce(&dyn Descriptor) -> R) -> R {
                match self {
                    $(Element::$variant(handle) => f(&*handle.borrow()),)+
                }
            }

            /// Runs `f` with an exclusive borrow of the descriptor.
            pub fn with_descriptor_mut<R>(&self, f: impl FnOnce(&mut dyn Descriptor) -> R) -> R {
                match self {
                    $(Element::$variant(handle) => f(&mut *handle.borrow_mut()),)+
                }
            }

            pub fn downgrade(&self) -> WeakElement {
                match self {
                    $(Element::$variant(handle) => WeakElement::$variant(Rc::downgrade(handle)),)+
                }
            }

            /// Returns `true` when both handles point at the same descriptor.
            pub fn ptr_eq(&self, other: &Element) -> bool {
                match (self, other) {
                    $((Element::$variant(left), Element::$variant(right)) => Rc::ptr_eq(left, right),)+
                    _ => false,
                }
            }

            fn address(&self) -> *const () {
                match self {
                    $(Element::$variant(handle) => Rc::as_ptr(handle) as *const (),)+
                }
            }
        }

        impl WeakElement {
            pub fn upgrade(&self) -> Option<Element> {
                match self {
                    $(WeakElement::$variant(handle) => handle.upgrade().map(Element::$variant),)+
                }
            }

            /// Returns `true` when this handle points at `element`.
            pub fn points_to(&self, element: &Element) -> bool {
                match (self, element) {
                    $((WeakElement::$variant(left), Element::$variant(right)) => {
                        std::ptr::eq(left.as_ptr(), Rc::as_ptr(right))
                    })+
                    _ => false,
                }
            }
        }

        $(
            impl From<Shared<$ty>> for Element {
                fn from(handle: Shared<$ty>) -> Self {
                    Element::$variant(handle)
                }
            }
        )+
    };
}

define_elements! {
    File => FileDescriptor,
    Namespace => NamespaceDescriptor,
    Package => PackageDescriptor,
    Class => ClassDescriptor,
    Interface => InterfaceDescriptor,
    Trait => TraitDescriptor,
    Enum => EnumDescriptor,
    EnumCase => EnumCaseDescriptor,
    Function => FunctionDescriptor,
    Constant => ConstantDescriptor,
    Method => MethodDescriptor,
    Property => PropertyDescriptor,
}

impl Element {
    pub fn kind(&self) -> DescriptorKind {
        self.with_descriptor(|descriptor| descriptor.kind())
    }

    /// Runs `f` with a shared borrow of the common descriptor fields.
    pub fn with_base<R>(&self, f: impl FnOnce(&DescriptorBase) -> R) -> R {
        self.with_descriptor(|descriptor| f(descriptor.base()))
    }

    /// Runs `f` with an exclusive borrow of the common descriptor fields.
    pub fn with_base_mut<R>(&self, f: impl FnOnce(&mut DescriptorBase) -> R) -> R {
        self.with_descriptor_mut(|descriptor| f(descriptor.base_mut()))
    }

    pub fn fqsen(&self) -> Option<Fqsen> {
        self.with_base(DescriptorBase::fqsen)
    }

    pub fn name(&self) -> String {
        self.with_base(|base| base.name().to_string())
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.with_descriptor(|descriptor| descriptor.visibility())
    }

    /// The file owning this element; a file owns itself.
    pub fn file(&self) -> Option<Shared<FileDescriptor>> {
        match self {
            Element::File(file) => Some(Rc::clone(file)),
            _ => self.with_base(DescriptorBase::file),
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fqsen() {
            Some(fqsen) => write!(f, "Element({} {fqsen})", self.kind()),
            None => write!(f, "Element({} {:p})", self.kind(), self.address()),
        }
    }
}

impl fmt::Debug for WeakElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(element) => write!(f, "Weak{element:?}"),
            None => write!(f, "WeakElement(dropped)"),
        }
    }
}
