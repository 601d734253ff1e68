//! Data shared by every descriptor.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    descriptor::{FileDescriptor, NamespaceDescriptor, PackageDescriptor, TagCollection},
    fqsen::Fqsen,
    reference::{Reference, Shared},
    validation::Diagnostic,
};

/// The concrete type of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DescriptorKind {
    File,
    Namespace,
    Package,
    Class,
    Interface,
    Trait,
    Enum,
    EnumCase,
    Function,
    Constant,
    Method,
    Property,
    Argument,
    Tag,
}

impl DescriptorKind {
    /// Returns the kind as a lowercase string (e.g. "enum case").
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptorKind::File => "file",
            DescriptorKind::Namespace => "namespace",
            DescriptorKind::Package => "package",
            DescriptorKind::Class => "class",
            DescriptorKind::Interface => "interface",
            DescriptorKind::Trait => "trait",
            DescriptorKind::Enum => "enum",
            DescriptorKind::EnumCase => "enum case",
            DescriptorKind::Function => "function",
            DescriptorKind::Constant => "constant",
            DescriptorKind::Method => "method",
            DescriptorKind::Property => "property",
            DescriptorKind::Argument => "argument",
            DescriptorKind::Tag => "tag",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visibility of a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl FromStr for Visibility {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "private" => Ok(Self::Private),
            _ => Err("Unsupported visibility"),
        }
    }
}

impl From<Visibility> for &'static str {
    fn from(val: Visibility) -> Self {
        match val {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Fields every descriptor carries.
#[derive(Debug, Clone, Default)]
pub struct DescriptorBase {
    name: String,
    fqsen: Option<Fqsen>,
    summary: String,
    description: String,
    path: String,
    line: usize,
    tags: TagCollection,
    namespace: Option<Reference<NamespaceDescriptor>>,
    package: Option<Reference<PackageDescriptor>>,
    file: Option<Weak<RefCell<FileDescriptor>>>,
    errors: Vec<Diagnostic>,
}

impl DescriptorBase {
    /// Creates a base with a short name and an optional FQSEN.
    pub fn new(name: impl Into<String>, fqsen: Option<Fqsen>) -> Self {
        Self {
            name: name.into(),
            fqsen,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn fqsen(&self) -> Option<Fqsen> {
        self.fqsen
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Path of the source file this element was declared in.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    pub fn tags(&self) -> &TagCollection {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagCollection {
        &mut self.tags
    }

    pub fn namespace(&self) -> Option<&Reference<NamespaceDescriptor>> {
        self.namespace.as_ref()
    }

    pub fn set_namespace(&mut self, namespace: Reference<NamespaceDescriptor>) {
        self.namespace = Some(namespace);
    }

    pub fn package(&self) -> Option<&Reference<PackageDescriptor>> {
        self.package.as_ref()
    }

    pub fn set_package(&mut self, package: Reference<PackageDescriptor>) {
        self.package = Some(package);
    }

    /// Clears the package link, e.g. before the package tree is rebuilt.
    pub fn clear_package(&mut self) {
        self.package = None;
    }

    /// The file owning this element, if it is still alive.
    pub fn file(&self) -> Option<Shared<FileDescriptor>> {
        self.file.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_file(&mut self, file: &Shared<FileDescriptor>) {
        self.file = Some(Rc::downgrade(file));
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn push_error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }
}

/// Common behaviour of all descriptors.
pub trait Descriptor {
    fn kind(&self) -> DescriptorKind;

    fn base(&self) -> &DescriptorBase;

    fn base_mut(&mut self) -> &mut DescriptorBase;

    /// Visibility of class members; `None` for everything else.
    fn visibility(&self) -> Option<Visibility> {
        None
    }
}

macro_rules! impl_descriptor {
    ($ty:ty, $kind:expr) => {
        impl $crate::descriptor::Descriptor for $ty {
            fn kind(&self) -> $crate::descriptor::DescriptorKind {
                $kind
            }

            fn base(&self) -> &$crate::descriptor::DescriptorBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::descriptor::DescriptorBase {
                &mut self.base
            }
        }
    };
    ($ty:ty, $kind:expr, visibility) => {
        impl $crate::descriptor::Descriptor for $ty {
            fn kind(&self) -> $crate::descriptor::DescriptorKind {
                $kind
            }

            fn base(&self) -> &$crate::descriptor::DescriptorBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::descriptor::DescriptorBase {
                &mut self.base
            }

            fn visibility(&self) -> Option<$crate::descriptor::Visibility> {
                self.visibility.into()
            }
        }
    };
}

pub(crate) use impl_descriptor;
