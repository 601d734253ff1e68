//! The descriptor model.
//!
//! Descriptors are the documentation-oriented view of a code base. They are
//! created once by the builder, mutated in place by compiler passes and read
//! by renderers afterwards.
//!
//! - [`ProjectDescriptor`] - The root, holding files, trees, indexes and settings
//! - [`FileDescriptor`] - A source file owning the elements declared in it
//! - [`ClassDescriptor`], [`InterfaceDescriptor`], [`TraitDescriptor`], [`EnumDescriptor`] - Structural elements
//! - [`NamespaceDescriptor`], [`PackageDescriptor`] - Tree nodes aggregating elements
//! - [`Element`] - A handle to a descriptor of any kind

mod base;
mod classlike;
mod element;
mod file;
mod guide;
mod member;
mod project;
mod tag;
mod tree;

pub(crate) use base::impl_descriptor;

pub use base::{Descriptor, DescriptorBase, DescriptorKind, Visibility};
pub use classlike::{
    ClassDescriptor, EnumCaseDescriptor, EnumDescriptor, InterfaceDescriptor, TraitDescriptor,
};
pub use element::{Element, WeakElement};
pub use file::{FileDescriptor, Marker};
pub use guide::{DocumentDescriptor, Entry, EntryId, TocDescriptor, TocDirective, Tocs, store_toc};
pub use member::{
    ArgumentDescriptor, ConstantDescriptor, FunctionDescriptor, MethodDescriptor,
    PropertyDescriptor,
};
pub use project::{
    ApiSetDescriptor, DEFAULT_PACKAGE_NAME, DEFAULT_PROJECT_NAME, DocumentationSet,
    GuideSetDescriptor, Indexes, ProjectDescriptor, Settings, UnknownVisibilityError,
    VersionDescriptor, VisibilityFilter,
};
pub use tag::{ExampleLocation, TagCollection, TagDescriptor, TagKind, TagTarget};
pub use tree::{ElementViews, NamespaceDescriptor, PackageDescriptor};
