//! The project descriptor: root of the whole graph.

use std::{fmt, ops::BitOr, rc::Rc, str::FromStr};

use thiserror::Error;

use crate::{
    collection::Index,
    descriptor::{
        ClassDescriptor, ConstantDescriptor, DocumentDescriptor, Element, EnumDescriptor,
        FileDescriptor, FunctionDescriptor, InterfaceDescriptor, NamespaceDescriptor,
        PackageDescriptor, TraitDescriptor, Visibility, guide::Tocs,
    },
    reference::{Shared, shared},
};

/// Name of a project that was not given one.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled project";

/// Package assigned to elements without a `@package` tag.
pub const DEFAULT_PACKAGE_NAME: &str = "Default";

/// Raised for a visibility name that is not one of `api`, `public`,
/// `protected`, `private` or `internal`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown visibility \"{0}\"; expected one of api, public, protected, private, internal")]
pub struct UnknownVisibilityError(pub String);

/// The set of visibilities that are documented.
///
/// # Examples
///
/// ```
/// use folio_core::descriptor::{Visibility, VisibilityFilter};
///
/// let filter = VisibilityFilter::PUBLIC | "protected".parse().unwrap();
/// assert!(filter.allows(Visibility::Protected));
/// assert!(!filter.allows(Visibility::Private));
/// assert!(!filter.contains(VisibilityFilter::INTERNAL));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibilityFilter(u8);

impl VisibilityFilter {
    /// Only elements tagged `@api`.
    pub const API: Self = Self(1);
    pub const PUBLIC: Self = Self(1 << 1);
    pub const PROTECTED: Self = Self(1 << 2);
    pub const PRIVATE: Self = Self(1 << 3);
    /// Elements tagged `@internal` and `{@internal}}` sections.
    pub const INTERNAL: Self = Self(1 << 4);
    pub const DEFAULT: Self = Self(Self::PUBLIC.0 | Self::PROTECTED.0 | Self::PRIVATE.0);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` when members with `visibility` are documented.
    pub fn allows(&self, visibility: Visibility) -> bool {
        match visibility {
            Visibility::Public => self.contains(Self::PUBLIC),
            Visibility::Protected => self.contains(Self::PROTECTED),
            Visibility::Private => self.contains(Self::PRIVATE),
        }
    }
}

impl Default for VisibilityFilter {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for VisibilityFilter {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl FromStr for VisibilityFilter {
    type Err = UnknownVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(Self::API),
            "public" => Ok(Self::PUBLIC),
            "protected" => Ok(Self::PROTECTED),
            "private" => Ok(Self::PRIVATE),
            "internal" => Ok(Self::INTERNAL),
            _ => Err(UnknownVisibilityError(s.to_string())),
        }
    }
}

impl FromIterator<VisibilityFilter> for VisibilityFilter {
    fn from_iter<I: IntoIterator<Item = VisibilityFilter>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), BitOr::bitor)
    }
}

impl fmt::Debug for VisibilityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (Self::API, "api"),
            (Self::PUBLIC, "public"),
            (Self::PROTECTED, "protected"),
            (Self::PRIVATE, "private"),
            (Self::INTERNAL, "internal"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect();
        write!(f, "VisibilityFilter({})", names.join(" | "))
    }
}

/// Project-wide settings consulted by filters and compiler passes.
#[derive(Debug, Clone)]
pub struct Settings {
    visibility: VisibilityFilter,
    markers: Vec<String>,
    include_source: bool,
    default_package: String,
    ignore_packages: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            visibility: VisibilityFilter::DEFAULT,
            markers: vec!["TODO".to_string(), "FIXME".to_string()],
            include_source: false,
            default_package: DEFAULT_PACKAGE_NAME.to_string(),
            ignore_packages: false,
        }
    }
}

impl Settings {
    pub fn visibility(&self) -> VisibilityFilter {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: VisibilityFilter) {
        self.visibility = visibility;
    }

    /// Comment markers collected from source code (e.g. `TODO`).
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn set_markers(&mut self, markers: Vec<String>) {
        self.markers = markers;
    }

    pub fn include_source(&self) -> bool {
        self.include_source
    }

    pub fn set_include_source(&mut self, include_source: bool) {
        self.include_source = include_source;
    }

    pub fn default_package(&self) -> &str {
        &self.default_package
    }

    pub fn set_default_package(&mut self, default_package: impl Into<String>) {
        self.default_package = default_package.into();
    }

    /// When set, no package tree is built.
    pub fn ignore_packages(&self) -> bool {
        self.ignore_packages
    }

    pub fn set_ignore_packages(&mut self, ignore_packages: bool) {
        self.ignore_packages = ignore_packages;
    }
}

/// Global lookup tables, each keyed by FQSEN string.
///
/// `elements` holds every structural element; namespaces are stored there
/// with a `~` prefix and properties as `\Class::$name`.
#[derive(Debug, Default)]
pub struct Indexes {
    pub elements: Index<String, Element>,
    pub constants: Index<String, Shared<ConstantDescriptor>>,
    pub functions: Index<String, Shared<FunctionDescriptor>>,
    pub classes: Index<String, Shared<ClassDescriptor>>,
    pub interfaces: Index<String, Shared<InterfaceDescriptor>>,
    pub traits: Index<String, Shared<TraitDescriptor>>,
    pub enums: Index<String, Shared<EnumDescriptor>>,
    pub namespaces: Index<String, Shared<NamespaceDescriptor>>,
    pub packages: Index<String, Shared<PackageDescriptor>>,
}

/// An API documentation set.
#[derive(Debug, Clone, Default)]
pub struct ApiSetDescriptor {
    name: String,
    include_source: bool,
    tocs: Tocs,
}

impl ApiSetDescriptor {
    pub fn new(name: impl Into<String>, include_source: bool) -> Self {
        Self {
            name: name.into(),
            include_source,
            tocs: Tocs::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether rendered documentation may show source code.
    pub fn include_source(&self) -> bool {
        self.include_source
    }

    pub fn tocs(&self) -> &Tocs {
        &self.tocs
    }

    pub fn tocs_mut(&mut self) -> &mut Tocs {
        &mut self.tocs
    }
}

/// A guide documentation set.
#[derive(Debug, Clone, Default)]
pub struct GuideSetDescriptor {
    name: String,
    documents: Index<String, DocumentDescriptor>,
    tocs: Tocs,
}

impl GuideSetDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documents keyed by their file.
    pub fn documents(&self) -> &Index<String, DocumentDescriptor> {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut Index<String, DocumentDescriptor> {
        &mut self.documents
    }

    pub fn tocs(&self) -> &Tocs {
        &self.tocs
    }

    pub fn tocs_mut(&mut self) -> &mut Tocs {
        &mut self.tocs
    }
}

#[derive(Debug, Clone)]
pub enum DocumentationSet {
    Api(ApiSetDescriptor),
    Guide(GuideSetDescriptor),
}

impl DocumentationSet {
    pub fn name(&self) -> &str {
        match self {
            DocumentationSet::Api(set) => set.name(),
            DocumentationSet::Guide(set) => set.name(),
        }
    }
}

/// A documented version of the project.
#[derive(Debug, Clone, Default)]
pub struct VersionDescriptor {
    number: String,
    documentation_sets: Vec<DocumentationSet>,
}

impl VersionDescriptor {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            documentation_sets: Vec::new(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn documentation_sets(&self) -> &[DocumentationSet] {
        &self.documentation_sets
    }

    pub fn documentation_sets_mut(&mut self) -> &mut Vec<DocumentationSet> {
        &mut self.documentation_sets
    }

    pub fn add_documentation_set(&mut self, set: DocumentationSet) {
        self.documentation_sets.push(set);
    }
}

/// The root of the descriptor graph.
#[derive(Debug)]
pub struct ProjectDescriptor {
    name: String,
    files: Index<String, Shared<FileDescriptor>>,
    namespace: Shared<NamespaceDescriptor>,
    package: Shared<PackageDescriptor>,
    indexes: Indexes,
    settings: Settings,
    versions: Vec<VersionDescriptor>,
}

impl Default for ProjectDescriptor {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_NAME)
    }
}

impl ProjectDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Index::new(),
            namespace: shared(NamespaceDescriptor::root()),
            package: shared(PackageDescriptor::root()),
            indexes: Indexes::default(),
            settings: Settings::default(),
            versions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Files keyed by path.
    pub fn files(&self) -> &Index<String, Shared<FileDescriptor>> {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut Index<String, Shared<FileDescriptor>> {
        &mut self.files
    }

    /// The root namespace, `\`.
    pub fn namespace(&self) -> Shared<NamespaceDescriptor> {
        Rc::clone(&self.namespace)
    }

    /// The root package, `\`.
    pub fn package(&self) -> Shared<PackageDescriptor> {
        Rc::clone(&self.package)
    }

    pub fn indexes(&self) -> &Indexes {
        &self.indexes
    }

    pub fn indexes_mut(&mut self) -> &mut Indexes {
        &mut self.indexes
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn versions(&self) -> &[VersionDescriptor] {
        &self.versions
    }

    pub fn versions_mut(&mut self) -> &mut Vec<VersionDescriptor> {
        &mut self.versions
    }

    pub fn add_version(&mut self, version: VersionDescriptor) {
        self.versions.push(version);
    }
}
